//! Storefront CLI

use std::{fmt::Display, process::ExitCode};

use clap::Parser;
use storefront::observability::init_logging;
use tracing::error;

use crate::cli::Cli;

mod cli;

#[tokio::main]
pub async fn main() -> ExitCode {
    // Load .env file if present (ignore if missing)
    _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(init_error) = init_logging(&cli.logging) {
        report(&init_error);

        return ExitCode::FAILURE;
    }

    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(run_error) => {
            error!(%run_error, "command failed");
            report(&run_error);

            ExitCode::FAILURE
        }
    }
}

#[expect(
    clippy::print_stderr,
    reason = "errors must reach the terminal even when logging is filtered out"
)]
fn report(error: &dyn Display) {
    eprintln!("{error}");
}
