//! CLI argument parsing and command dispatch.

pub mod args;
pub mod check;
pub mod networks;
pub mod portfolio;
pub mod wallets;

use std::sync::Arc;

pub use args::{Cli, Commands, OutputFormat};

use crate::core::fetcher::HttpBalanceFetcher;
use crate::core::logging::{self, LogLevel, LogSettings};
use crate::core::service::WalletService;
use crate::error::Result;
use crate::storage::{ResolvedConfig, WalletStore};
use crate::util::env::should_use_color;

/// Output options shared by every command.
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub pretty: bool,
    pub no_color: bool,
}

impl OutputOptions {
    #[must_use]
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            format: config.format,
            pretty: config.pretty,
            no_color: !should_use_color(config.no_color),
        }
    }
}

/// Output options before the config is resolved, used for early errors.
#[must_use]
pub fn fallback_output(cli: &Cli) -> OutputOptions {
    OutputOptions {
        format: cli.explicit_format().unwrap_or_default(),
        pretty: cli.pretty,
        no_color: !should_use_color(cli.no_color),
    }
}

/// Merge CLI flags, `WSCOPE_LOG*` and the config file's `log_level`.
#[must_use]
pub fn log_settings(cli: &Cli, config_level: Option<&str>) -> LogSettings {
    let mut settings = LogSettings::resolve(cli.log_level.as_deref(), cli.json_output, cli.verbose);
    let env_level = std::env::var(logging::LOG_LEVEL_ENV).is_ok_and(|v| !v.trim().is_empty());
    if cli.log_level.is_none() && !env_level && !cli.verbose {
        if let Some(level) = config_level.and_then(LogLevel::from_arg) {
            settings.level = level;
        }
    }
    settings
}

/// Build the service: HTTP fetcher with configured endpoints, and a store
/// seeded with the config file's saved wallets.
///
/// # Errors
///
/// Fails on invalid endpoint overrides or wallet entries, or if the HTTP
/// client cannot be built.
pub fn build_service(config: &ResolvedConfig) -> Result<WalletService> {
    let fetcher = HttpBalanceFetcher::new(config.timeout, config.file.endpoints()?)?;
    let store = Arc::new(WalletStore::default());

    for (input, active) in config.file.saved_wallets()? {
        let saved = store.create_saved_wallet(input);
        if !active {
            store.toggle_saved_wallet(&saved.id);
        }
    }
    tracing::debug!(
        wallets = config.file.wallets.len(),
        timeout_secs = config.timeout.as_secs(),
        "Service ready"
    );

    Ok(WalletService::new(Arc::new(fetcher), store).with_batch_timeout(config.timeout))
}

/// Initialize logging and run the selected command.
///
/// # Errors
///
/// Returns the command's error; the caller renders it and maps the exit code.
pub async fn run(cli: &Cli, config: &ResolvedConfig) -> Result<()> {
    logging::init(&log_settings(cli, config.log_level.as_deref()));
    tracing::debug!(sources = ?config.sources, "Configuration resolved");

    let output = OutputOptions::from_config(config);

    match &cli.command {
        Commands::Networks => networks::execute(output),
        Commands::Wallets => {
            let service = build_service(config)?;
            wallets::execute(&service, output)
        }
        Commands::Check(args) => {
            let service = build_service(config)?;
            check::execute(&service, args, output).await
        }
        Commands::Portfolio(args) => {
            let service = build_service(config)?;
            portfolio::execute(&service, args, output).await
        }
    }
}
