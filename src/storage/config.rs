//! Configuration file loading and resolution.
//!
//! Loads configuration from:
//! - Linux: `~/.config/walletscope/config.toml`
//! - macOS: `~/Library/Application Support/walletscope/config.toml`
//! - Windows: `%APPDATA%/walletscope/config.toml`
//!
//! ## Precedence
//!
//! Settings are resolved with the following precedence (highest first):
//! 1. CLI flags
//! 2. Environment variables
//! 3. Config file
//! 4. Built-in defaults
//!
//! ## Environment Variables
//!
//! - `WSCOPE_FORMAT`: Output format (human, json, md)
//! - `WSCOPE_TIMEOUT`: Upstream timeout in seconds
//! - `WSCOPE_NO_COLOR` or `NO_COLOR`: Disable colors
//! - `WSCOPE_PRETTY`: Pretty-print JSON output
//! - `WSCOPE_CONFIG`: Override config file path
//!
//! ## Example
//!
//! ```toml
//! [general]
//! timeout_seconds = 15
//!
//! [endpoints]
//! price_api = "https://api.coingecko.com/api/v3"
//! ethereum = "https://eth.llamarpc.com"
//!
//! [[wallets]]
//! label = "Cold storage"
//! address = "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq"
//! network = "bitcoin"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::cli::args::{Cli, OutputFormat};
use crate::core::fetcher::Endpoints;
use crate::core::models::SavedWalletInput;
use crate::core::network::NetworkTag;
use crate::core::validator;
use crate::error::{Result, WalletError};

// =============================================================================
// Environment Variable Names
// =============================================================================

pub const ENV_FORMAT: &str = "WSCOPE_FORMAT";
pub const ENV_TIMEOUT: &str = "WSCOPE_TIMEOUT";
pub const ENV_NO_COLOR: &str = "WSCOPE_NO_COLOR";
/// Standard environment variable to disable colors.
pub const ENV_NO_COLOR_STD: &str = "NO_COLOR";
pub const ENV_PRETTY: &str = "WSCOPE_PRETTY";
pub const ENV_CONFIG: &str = "WSCOPE_CONFIG";

/// Accepted upstream timeout range, in seconds.
pub const TIMEOUT_RANGE: std::ops::RangeInclusive<u64> = 1..=300;

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Final configuration after merging CLI, env vars, and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub format: OutputFormat,
    /// Upstream request timeout, also the per-wallet batch limit.
    pub timeout: Duration,
    pub no_color: bool,
    pub pretty: bool,
    /// Log level from the config file; CLI and env take precedence elsewhere.
    pub log_level: Option<String>,
    pub sources: ConfigSources,
    /// The loaded file, for endpoints and saved wallets.
    pub file: Config,
}

/// Tracks the source of each configuration value.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    pub format: ConfigSource,
    pub timeout: ConfigSource,
    pub no_color: ConfigSource,
    pub pretty: ConfigSource,
}

/// Where a configuration value came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigSource {
    Cli,
    Env,
    ConfigFile,
    #[default]
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI flag"),
            Self::Env => write!(f, "environment variable"),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

impl ResolvedConfig {
    /// Resolve from CLI args, the process environment and the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but is invalid, or if any
    /// resolved value is out of range.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let file = load_config()?;
        Self::resolve_with(cli, file, |key| std::env::var(key).ok())
    }

    /// Resolve against an explicit config and environment lookup.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid file contents or out-of-range values.
    pub fn resolve_with(
        cli: &Cli,
        file: Config,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        file.validate()?;

        let mut sources = ConfigSources::default();
        let format = resolve_format(cli, &file, &env, &mut sources.format)?;
        let timeout = resolve_timeout(cli, &file, &env, &mut sources.timeout)?;
        let no_color = resolve_no_color(cli, &file, &env, &mut sources.no_color);
        let pretty = resolve_pretty(cli, &file, &env, &mut sources.pretty);

        Ok(Self {
            format,
            timeout,
            no_color,
            pretty,
            log_level: file.general.log_level.clone(),
            sources,
            file,
        })
    }
}

fn load_config() -> Result<Config> {
    match std::env::var(ENV_CONFIG) {
        Ok(path) if !path.trim().is_empty() => Config::load_from(Path::new(path.trim())),
        _ => Config::load(),
    }
}

fn resolve_format(
    cli: &Cli,
    config: &Config,
    env: &impl Fn(&str) -> Option<String>,
    source: &mut ConfigSource,
) -> Result<OutputFormat> {
    if let Some(format) = cli.explicit_format() {
        *source = ConfigSource::Cli;
        return Ok(format);
    }
    if let Some(value) = env(ENV_FORMAT) {
        *source = ConfigSource::Env;
        return parse_format(&value);
    }
    if let Some(ref value) = config.output.format {
        *source = ConfigSource::ConfigFile;
        return parse_format(value);
    }
    *source = ConfigSource::Default;
    Ok(OutputFormat::Human)
}

/// Parse a format string into [`OutputFormat`].
///
/// # Errors
///
/// Returns `ConfigInvalid` for anything other than human, json, md.
pub fn parse_format(s: &str) -> Result<OutputFormat> {
    match s.trim().to_lowercase().as_str() {
        "human" => Ok(OutputFormat::Human),
        "json" => Ok(OutputFormat::Json),
        "md" | "markdown" => Ok(OutputFormat::Md),
        _ => Err(WalletError::ConfigInvalid {
            key: "format".to_string(),
            value: s.to_string(),
            message: "valid formats: human, json, md".to_string(),
        }),
    }
}

fn resolve_timeout(
    cli: &Cli,
    config: &Config,
    env: &impl Fn(&str) -> Option<String>,
    source: &mut ConfigSource,
) -> Result<Duration> {
    let seconds = if let Some(seconds) = cli.timeout {
        *source = ConfigSource::Cli;
        seconds
    } else if let Some(value) = env(ENV_TIMEOUT) {
        *source = ConfigSource::Env;
        value
            .trim()
            .parse::<u64>()
            .map_err(|_| WalletError::ConfigInvalid {
                key: ENV_TIMEOUT.to_string(),
                value: value.clone(),
                message: "expected whole seconds".to_string(),
            })?
    } else {
        *source = ConfigSource::ConfigFile;
        config.general.timeout_seconds
    };

    check_timeout(seconds)?;
    Ok(Duration::from_secs(seconds))
}

fn check_timeout(seconds: u64) -> Result<()> {
    if TIMEOUT_RANGE.contains(&seconds) {
        Ok(())
    } else {
        Err(WalletError::ConfigInvalid {
            key: "timeout_seconds".to_string(),
            value: seconds.to_string(),
            message: "timeout must be between 1 and 300 seconds".to_string(),
        })
    }
}

fn resolve_no_color(
    cli: &Cli,
    config: &Config,
    env: &impl Fn(&str) -> Option<String>,
    source: &mut ConfigSource,
) -> bool {
    if cli.no_color {
        *source = ConfigSource::Cli;
        return true;
    }
    if is_truthy(env(ENV_NO_COLOR)) || env(ENV_NO_COLOR_STD).is_some() {
        *source = ConfigSource::Env;
        return true;
    }
    if !config.output.color {
        *source = ConfigSource::ConfigFile;
        return true;
    }
    *source = ConfigSource::Default;
    false
}

fn resolve_pretty(
    cli: &Cli,
    config: &Config,
    env: &impl Fn(&str) -> Option<String>,
    source: &mut ConfigSource,
) -> bool {
    if cli.pretty {
        *source = ConfigSource::Cli;
        return true;
    }
    if is_truthy(env(ENV_PRETTY)) {
        *source = ConfigSource::Env;
        return true;
    }
    if config.output.pretty {
        *source = ConfigSource::ConfigFile;
        return true;
    }
    *source = ConfigSource::Default;
    false
}

fn is_truthy(value: Option<String>) -> bool {
    value.is_some_and(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

// =============================================================================
// Config File
// =============================================================================

/// Application configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub output: OutputConfig,
    pub endpoints: EndpointsConfig,
    /// Saved wallets loaded into the store at start-up.
    pub wallets: Vec<WalletEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Upstream request timeout in seconds.
    pub timeout_seconds: u64,
    /// Default log level (error, warn, info, debug, trace).
    pub log_level: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 10,
            log_level: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format (human, json, md).
    pub format: Option<String>,
    pub color: bool,
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
            pretty: false,
        }
    }
}

/// Upstream URL overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_api: Option<String>,
    /// Balance endpoint per network tag.
    #[serde(flatten)]
    pub networks: BTreeMap<String, String>,
}

/// One `[[wallets]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletEntry {
    pub label: String,
    pub address: String,
    pub network: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

impl Config {
    /// Load configuration from the default config file path.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific path.
    ///
    /// Returns default config if the file doesn't exist.
    /// Returns error only if the file exists but is invalid.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        tracing::debug!(?path, "Loading config file");
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| WalletError::ConfigParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| WalletError::Config(format!("failed to serialize config: {e}")))?;
        fs::write(path, content)?;
        tracing::debug!(?path, "Config file saved");
        Ok(())
    }

    #[must_use]
    pub fn config_path() -> PathBuf {
        AppPaths::new().config_file()
    }

    /// Validate configuration values.
    ///
    /// Checks the output format, the timeout range, endpoint network keys,
    /// and every saved wallet entry.
    pub fn validate(&self) -> Result<()> {
        if let Some(format) = &self.output.format {
            parse_format(format)?;
        }
        check_timeout(self.general.timeout_seconds)?;

        for key in self.endpoints.networks.keys() {
            NetworkTag::from_tag(key).map_err(|_| WalletError::ConfigInvalid {
                key: format!("endpoints.{key}"),
                value: key.clone(),
                message: format!("unknown network; valid networks: {}", network_list()),
            })?;
        }

        for entry in &self.wallets {
            entry.to_input()?;
        }
        Ok(())
    }

    /// Fetcher endpoints with file overrides applied.
    pub fn endpoints(&self) -> Result<Endpoints> {
        let mut endpoints = Endpoints::default();
        if let Some(price_api) = &self.endpoints.price_api {
            endpoints = endpoints.with_price_api(price_api.clone());
        }
        for (key, url) in &self.endpoints.networks {
            endpoints = endpoints.with_network(NetworkTag::from_tag(key)?, url.clone());
        }
        Ok(endpoints)
    }

    /// Saved wallet entries as store inputs, with their active flags.
    pub fn saved_wallets(&self) -> Result<Vec<(SavedWalletInput, bool)>> {
        self.wallets
            .iter()
            .map(|entry| Ok((entry.to_input()?, entry.active)))
            .collect()
    }
}

impl WalletEntry {
    fn to_input(&self) -> Result<SavedWalletInput> {
        let label = self.label.trim();
        if label.is_empty() {
            return Err(WalletError::ConfigInvalid {
                key: "wallets.label".to_string(),
                value: self.label.clone(),
                message: "label must not be empty".to_string(),
            });
        }
        let network = NetworkTag::from_tag(&self.network).map_err(|_| WalletError::ConfigInvalid {
            key: "wallets.network".to_string(),
            value: self.network.clone(),
            message: format!("unknown network; valid networks: {}", network_list()),
        })?;
        if !validator::is_valid_for(&self.address, network) {
            return Err(WalletError::ConfigInvalid {
                key: "wallets.address".to_string(),
                value: self.address.clone(),
                message: format!("not a valid {network} address"),
            });
        }
        Ok(SavedWalletInput {
            label: label.to_string(),
            address: self.address.clone(),
            network,
        })
    }
}

fn network_list() -> String {
    NetworkTag::ALL
        .iter()
        .map(|n| n.tag())
        .collect::<Vec<_>>()
        .join(", ")
}
