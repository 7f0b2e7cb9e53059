use clap::Parser;
use keno_server::args::Cli;
use keno_server::exit_codes;

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = keno_server::logging::init(cli.log_format) {
        eprintln!("fatal: {e:?}");
        std::process::exit(exit_codes::CONFIG_ERROR);
    }
    let code = match keno_server::run(cli).await {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("fatal: {e:?}");
            exit_codes::CONFIG_ERROR
        }
    };
    std::process::exit(code);
}
