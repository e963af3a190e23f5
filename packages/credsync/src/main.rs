//! Main entry point for the rotate-access-keys CLI

use clap::Parser;
use credsync::cli::{self, Cli};
use credsync_common::LoggingTransformer;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize structured logging
    LoggingTransformer::init();

    let cli = Cli::parse();
    let strict = cli.strict_exit;

    let outcome = cli::run(cli).await;
    ExitCode::from(outcome.exit_status(strict))
}
