//! The `keno` server: wires cages built from the command line to an HTTP
//! listener and shuts the rotor blades down on Ctrl-C.

pub mod args;
pub mod exit_codes;
pub mod http;
pub mod logging;

use anyhow::Context;
use args::Cli;
use keno_core::CageSet;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

pub fn build_cages(cli: &Cli) -> anyhow::Result<CageSet> {
    CageSet::new(cli.cage_configs()).context("invalid cage configuration")
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let cages = Arc::new(build_cages(&cli)?);
    let listener = TcpListener::bind(cli.listen)
        .await
        .with_context(|| format!("failed to bind {}", cli.listen))?;
    info!(
        addr = %listener.local_addr()?,
        cages = cages.len(),
        "keno listening"
    );

    axum::serve(listener, http::router(Arc::clone(&cages)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server failed")?;

    cages.shutdown().await;
    info!("keno stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c, shutting down");
    }
}
