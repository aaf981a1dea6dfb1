//! # courier
//!
//! Entry point: parse arguments, set up logging, run, map errors to exit
//! codes. The actual work lives in `lib.rs` for testability.

use std::process::ExitCode;

use clap::Parser;
use courier_cli::{init_tracing, run, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let json = cli.json;
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(code = ?err.code, "Command failed");
            if json {
                match serde_json::to_string(&err) {
                    Ok(body) => eprintln!("{}", body),
                    Err(_) => eprintln!("{}", err.message),
                }
            } else {
                eprintln!("error: {}", err.message);
            }
            err.exit_code()
        }
    }
}
