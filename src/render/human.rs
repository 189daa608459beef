//! Human-readable terminal output.

use std::fmt::Write as _;

use colored::{ColoredString, Colorize};

use crate::core::models::{SavedWallet, WalletBalance};
use crate::core::network::{NetworkDescriptor, NetworkTag};
use crate::core::portfolio::{PortfolioReport, RiskLevel};
use crate::util::{format_balance, format_percent, format_relative_time, format_usd, truncate_address};

/// Decimal places shown for balances.
const BALANCE_DECIMALS: u32 = 4;

/// Applies colors only when enabled.
#[derive(Debug, Clone, Copy)]
struct Painter {
    color: bool,
}

impl Painter {
    fn paint(self, text: &str, style: impl Fn(&str) -> ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn bold(self, text: &str) -> String {
        self.paint(text, |t| t.bold())
    }

    fn dim(self, text: &str) -> String {
        self.paint(text, |t| t.dimmed())
    }

    fn ok(self, text: &str) -> String {
        self.paint(text, |t| t.green())
    }

    fn err(self, text: &str) -> String {
        self.paint(text, |t| t.red())
    }

    fn accent(self, text: &str) -> String {
        self.paint(text, |t| t.cyan().bold())
    }
}

fn display_network(tag: &str) -> String {
    NetworkTag::from_tag(tag).map_or_else(|_| tag.to_string(), |n| n.display_name().to_string())
}

/// Render one balance check.
#[must_use]
pub fn render_check(result: &WalletBalance, color: bool) -> String {
    let p = Painter { color };
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} {}",
        p.accent(&display_network(&result.network)),
        p.dim(&result.address)
    );

    if result.is_valid {
        let _ = writeln!(
            out,
            "  {} {} {}",
            p.bold("Balance:"),
            format_balance(&result.balance, BALANCE_DECIMALS),
            result.symbol
        );
        let _ = writeln!(out, "  {} {}", p.bold("Value:  "), p.ok(&format_usd(&result.usd_value)));
        let _ = writeln!(
            out,
            "  {} {}",
            p.bold("Updated:"),
            p.dim(&format_relative_time(result.last_updated))
        );
    } else {
        let message = result.error.as_deref().unwrap_or("unknown error");
        let _ = writeln!(out, "  {} {}", p.err("✗"), p.err(message));
    }

    out
}

/// Render batch outcomes followed by the portfolio summary.
#[must_use]
pub fn render_portfolio(report: &PortfolioReport, color: bool) -> String {
    let p = Painter { color };
    let mut out = String::new();

    if report.outcomes.is_empty() {
        let _ = writeln!(out, "{}", p.dim("No active saved wallets to refresh."));
        return out;
    }

    let _ = writeln!(out, "{}", p.accent("Wallets"));
    for outcome in &report.outcomes {
        let wallet = &outcome.wallet;
        let result = &outcome.result;
        let status = if result.is_valid {
            p.ok("✓")
        } else {
            p.err("✗")
        };
        let detail = if result.is_valid {
            format!(
                "{} {}  {}",
                format_balance(&result.balance, BALANCE_DECIMALS),
                result.symbol,
                p.ok(&format_usd(&result.usd_value))
            )
        } else {
            p.err(result.error.as_deref().unwrap_or("unknown error"))
        };
        let _ = writeln!(
            out,
            "  {status} {:<16} {:<18} {:<14} {detail}",
            wallet.label,
            wallet.network.display_name(),
            truncate_address(&wallet.address),
        );
    }

    let summary = &report.summary;
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", p.accent("Portfolio"));
    let _ = writeln!(out, "  {} {}", p.bold("Total:"), p.ok(&format_usd(&summary.total_usd)));
    let _ = writeln!(
        out,
        "  {} {} ok, {} failed",
        p.bold("Checked:"),
        summary.valid_count,
        summary.failed_count
    );

    for allocation in &summary.allocations {
        let _ = writeln!(
            out,
            "  {:<18} {:>14} {:>7}",
            display_network(&allocation.network),
            format_usd(&allocation.usd_value),
            format_percent(allocation.percentage)
        );
    }

    if !summary.allocations.is_empty() {
        let risk = match summary.risk {
            RiskLevel::Low => p.ok(summary.risk.as_str()),
            RiskLevel::Medium => p.paint(summary.risk.as_str(), |t| t.yellow()),
            RiskLevel::High => p.err(summary.risk.as_str()),
        };
        let _ = writeln!(
            out,
            "  {} {risk} (top network {})",
            p.bold("Concentration:"),
            format_percent(summary.top_allocation)
        );
    }

    out
}

/// Render saved wallets in label order.
#[must_use]
pub fn render_wallets(wallets: &[SavedWallet], color: bool) -> String {
    let p = Painter { color };
    let mut out = String::new();

    if wallets.is_empty() {
        let _ = writeln!(
            out,
            "{}",
            p.dim("No saved wallets. Add [[wallets]] entries to config.toml.")
        );
        return out;
    }

    for wallet in wallets {
        let state = if wallet.is_active {
            p.ok("active")
        } else {
            p.dim("inactive")
        };
        let _ = writeln!(
            out,
            "{:<16} {:<18} {} [{state}]",
            p.bold(&wallet.label),
            wallet.network.display_name(),
            wallet.address
        );
    }
    out
}

/// Render the network registry.
#[must_use]
pub fn render_networks<'a>(
    networks: impl IntoIterator<Item = &'a NetworkDescriptor>,
    color: bool,
) -> String {
    let p = Painter { color };
    let mut out = String::new();
    for network in networks {
        let _ = writeln!(
            out,
            "{:<10} {:<18} {:<6} {}",
            p.bold(network.id.tag()),
            network.display_name,
            network.native_symbol,
            p.dim(network.default_endpoint)
        );
    }
    out
}
