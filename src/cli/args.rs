//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};

/// walletscope - Native coin balances across chains.
#[derive(Parser, Debug)]
#[command(name = "wscope")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    // === Global flags ===
    /// Output format [default: human]
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Shorthand for --format json
    #[arg(long, global = true)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Upstream request timeout in seconds (1-300)
    #[arg(long, value_name = "SECONDS", global = true)]
    pub timeout: Option<u64>,

    /// Log level
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Emit JSONL logs to stderr
    #[arg(long, global = true)]
    pub json_output: bool,

    /// Verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Output format given on the command line, if any.
    #[must_use]
    pub fn explicit_format(&self) -> Option<OutputFormat> {
        if self.json {
            Some(OutputFormat::Json)
        } else {
            self.format
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check the native balance of one address
    Check(CheckArgs),

    /// Refresh saved wallets and summarize the portfolio
    Portfolio(PortfolioArgs),

    /// List saved wallets from the config file
    Wallets,

    /// List supported networks
    Networks,
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Address to check
    pub address: String,

    /// Network tag (ethereum, bitcoin, solana, ...)
    #[arg(long, short = 'n', value_name = "NETWORK")]
    pub network: String,
}

/// Arguments for the `portfolio` command.
#[derive(Parser, Debug)]
pub struct PortfolioArgs {
    /// Saved wallet ids or labels to refresh (default: all active)
    #[arg(long, value_name = "ID", num_args = 1..)]
    pub ids: Vec<String>,
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    #[default]
    Human,
    /// JSON output
    Json,
    /// Markdown output
    Md,
}
