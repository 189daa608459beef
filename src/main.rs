//! walletscope - Native coin balances across chains.
//!
//! CLI entry point.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use clap::Parser;
use std::process::ExitCode;

use walletscope::cli::{self, Cli, OutputOptions};
use walletscope::render::error::render_error;
use walletscope::storage::ResolvedConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let (result, output) = match ResolvedConfig::resolve(&cli) {
        Ok(config) => (
            cli::run(&cli, &config).await,
            OutputOptions::from_config(&config),
        ),
        Err(e) => {
            walletscope::core::logging::init(&cli::log_settings(&cli, None));
            (Err(e), cli::fallback_output(&cli))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error_code = e.error_code(), "{}", e);
            eprintln!(
                "{}",
                render_error(&e, output.format, output.pretty, output.no_color)
            );
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
