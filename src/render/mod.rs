//! Output rendering for human and robot modes.

pub mod error;
pub mod human;
pub mod robot;

use crate::cli::args::OutputFormat;
use crate::core::models::{SavedWallet, WalletBalance};
use crate::core::network::NetworkDescriptor;
use crate::core::portfolio::PortfolioReport;
use crate::error::Result;

/// Render a single balance check.
pub fn render_check(
    result: &WalletBalance,
    format: OutputFormat,
    pretty: bool,
    no_color: bool,
) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(human::render_check(result, !no_color)),
        OutputFormat::Json => robot::render_check_json(result, pretty),
        OutputFormat::Md => robot::render_check_md(result),
    }
}

/// Render a portfolio refresh.
pub fn render_portfolio(
    report: &PortfolioReport,
    format: OutputFormat,
    pretty: bool,
    no_color: bool,
) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(human::render_portfolio(report, !no_color)),
        OutputFormat::Json => robot::render_portfolio_json(report, pretty),
        OutputFormat::Md => robot::render_portfolio_md(report),
    }
}

/// Render saved wallets.
pub fn render_wallets(
    wallets: &[SavedWallet],
    format: OutputFormat,
    pretty: bool,
    no_color: bool,
) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(human::render_wallets(wallets, !no_color)),
        OutputFormat::Json => robot::render_wallets_json(wallets, pretty),
        OutputFormat::Md => robot::render_wallets_md(wallets),
    }
}

/// Render the supported networks.
pub fn render_networks(
    networks: &[&NetworkDescriptor],
    format: OutputFormat,
    pretty: bool,
    no_color: bool,
) -> Result<String> {
    match format {
        OutputFormat::Human => Ok(human::render_networks(networks.iter().copied(), !no_color)),
        OutputFormat::Json => robot::render_networks_json(networks, pretty),
        OutputFormat::Md => robot::render_networks_md(networks),
    }
}
