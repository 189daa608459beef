//! In-memory wallet store, configuration, and paths.

pub mod config;
pub mod memory;
pub mod paths;

pub use config::{
    Config, ConfigSource, ConfigSources, ENV_CONFIG, ENV_FORMAT, ENV_NO_COLOR, ENV_NO_COLOR_STD,
    ENV_PRETTY, ENV_TIMEOUT, ResolvedConfig, WalletEntry,
};
pub use memory::{RECENT_LIMIT, WalletStore};
pub use paths::AppPaths;
