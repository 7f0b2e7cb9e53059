//! HTTP front-end: every request to `/` picks from each cage in order.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::any;
use axum::Router;
use keno_core::CageSet;
use std::sync::Arc;

pub fn router(cages: Arc<CageSet>) -> Router {
    Router::new().route("/", any(pick)).with_state(cages)
}

async fn pick(State(cages): State<Arc<CageSet>>) -> impl IntoResponse {
    let body = cages.render_picks().await;
    ([(header::CONTENT_TYPE, "text/plain")], body)
}
