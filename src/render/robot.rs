//! Robot-mode output (JSON and Markdown).
//!
//! JSON is always wrapped in the versioned [`RobotOutput`] envelope so
//! scripts can key on `schemaVersion` and `command`.

use std::fmt::Write as _;

use crate::core::models::{RobotOutput, SavedWallet, WalletBalance};
use crate::core::network::NetworkDescriptor;
use crate::core::portfolio::PortfolioReport;
use crate::error::Result;

/// Render any value as JSON.
pub fn render_json<T: serde::Serialize>(output: &T) -> Result<String> {
    Ok(serde_json::to_string(output)?)
}

/// Render any value as pretty JSON.
pub fn render_json_pretty<T: serde::Serialize>(output: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(output)?)
}

fn envelope<T: serde::Serialize>(output: &RobotOutput<T>, pretty: bool) -> Result<String> {
    if pretty {
        render_json_pretty(output)
    } else {
        render_json(output)
    }
}

/// Render a balance check as JSON. A failed check is reported in `errors`.
pub fn render_check_json(result: &WalletBalance, pretty: bool) -> Result<String> {
    let errors = result.error.iter().cloned().collect();
    envelope(&RobotOutput::with_errors("check", result, errors), pretty)
}

/// Render a balance check as Markdown.
pub fn render_check_md(result: &WalletBalance) -> Result<String> {
    let mut out = String::new();
    let _ = writeln!(out, "## {} ({})", result.address, result.network);
    if result.is_valid {
        let _ = writeln!(out, "- balance: {} {}", result.balance, result.symbol);
        let _ = writeln!(out, "- usd_value: {}", result.usd_value);
        if let Some(logo) = &result.logo_url {
            let _ = writeln!(out, "- logo: {logo}");
        }
        let _ = writeln!(out, "- updated: {}", result.last_updated.to_rfc3339());
    } else {
        let _ = writeln!(
            out,
            "- error: {}",
            result.error.as_deref().unwrap_or("unknown error")
        );
    }
    Ok(out)
}

/// Render a portfolio refresh as JSON. Failed wallets are listed in `errors`.
pub fn render_portfolio_json(report: &PortfolioReport, pretty: bool) -> Result<String> {
    let errors = report
        .outcomes
        .iter()
        .filter_map(|o| {
            o.result
                .error
                .as_ref()
                .map(|e| format!("{}: {e}", o.wallet.label))
        })
        .collect();
    envelope(&RobotOutput::with_errors("portfolio", report, errors), pretty)
}

/// Render a portfolio refresh as Markdown.
pub fn render_portfolio_md(report: &PortfolioReport) -> Result<String> {
    let mut out = String::new();
    let _ = writeln!(out, "## Wallets\n");
    let _ = writeln!(out, "| label | network | address | balance | usd | status |");
    let _ = writeln!(out, "|---|---|---|---|---|---|");
    for outcome in &report.outcomes {
        let result = &outcome.result;
        let status = result.error.as_deref().unwrap_or("ok");
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} {} | {} | {} |",
            outcome.wallet.label,
            outcome.wallet.network,
            outcome.wallet.address,
            result.balance,
            result.symbol,
            result.usd_value,
            status
        );
    }

    let summary = &report.summary;
    let _ = writeln!(out, "\n## Summary\n");
    let _ = writeln!(out, "- total_usd: {}", summary.total_usd);
    let _ = writeln!(out, "- valid: {}", summary.valid_count);
    let _ = writeln!(out, "- failed: {}", summary.failed_count);
    let _ = writeln!(out, "- concentration: {}", summary.risk.as_str());
    for allocation in &summary.allocations {
        let _ = writeln!(
            out,
            "- {}: {} ({:.1}%)",
            allocation.network, allocation.usd_value, allocation.percentage
        );
    }
    Ok(out)
}

/// Render saved wallets as JSON.
pub fn render_wallets_json(wallets: &[SavedWallet], pretty: bool) -> Result<String> {
    envelope(&RobotOutput::new("wallets", wallets), pretty)
}

/// Render saved wallets as Markdown.
pub fn render_wallets_md(wallets: &[SavedWallet]) -> Result<String> {
    let mut out = String::new();
    let _ = writeln!(out, "| id | label | network | address | active |");
    let _ = writeln!(out, "|---|---|---|---|---|");
    for wallet in wallets {
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} | {} |",
            wallet.id, wallet.label, wallet.network, wallet.address, wallet.is_active
        );
    }
    Ok(out)
}

/// Render the network registry as JSON.
pub fn render_networks_json(networks: &[&NetworkDescriptor], pretty: bool) -> Result<String> {
    envelope(&RobotOutput::new("networks", networks), pretty)
}

/// Render the network registry as Markdown.
pub fn render_networks_md(networks: &[&NetworkDescriptor]) -> Result<String> {
    let mut out = String::new();
    let _ = writeln!(out, "| tag | name | symbol | decimals | endpoint |");
    let _ = writeln!(out, "|---|---|---|---|---|");
    for network in networks {
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} | {} |",
            network.id,
            network.display_name,
            network.native_symbol,
            network.decimals,
            network.default_endpoint
        );
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fetcher::NativeBalance;
    use crate::core::models::BatchOutcome;
    use crate::core::network::{NetworkRegistry, NetworkTag};
    use chrono::Utc;

    fn eth_result() -> WalletBalance {
        WalletBalance::valid(
            "0x742d35Cc6634C0532925a3b844Bc454e4438f44e",
            NetworkTag::Ethereum,
            NativeBalance {
                balance: "1.5".into(),
                usd_value: "4500.00".into(),
                logo_url: "https://img/eth.png".into(),
            },
        )
    }

    #[test]
    fn check_json_envelope() {
        let json = render_check_json(&eth_result(), false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["schemaVersion"], "walletscope.v1");
        assert_eq!(value["command"], "check");
        assert_eq!(value["data"]["balance"], "1.5");
        assert_eq!(value["data"]["usdValue"], "4500.00");
        assert_eq!(value["data"]["isValid"], true);
        assert_eq!(value["data"]["logoUrl"], "https://img/eth.png");
        assert!(value["errors"].as_array().unwrap().is_empty());
        assert!(!json.contains('\n'));
    }

    #[test]
    fn failed_check_json_lists_error() {
        let result = WalletBalance::invalid("nope", "ethereum", "ETH", "invalid address format for network");
        let json = render_check_json(&result, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["data"]["isValid"], false);
        assert_eq!(value["data"]["balance"], "0");
        assert_eq!(value["errors"][0], "invalid address format for network");
        assert!(json.contains('\n'));
    }

    #[test]
    fn check_md_lists_fields() {
        let md = render_check_md(&eth_result()).unwrap();
        assert!(md.starts_with("## 0x742d35Cc6634C0532925a3b844Bc454e4438f44e (ethereum)"));
        assert!(md.contains("- balance: 1.5 ETH"));
        assert!(md.contains("- usd_value: 4500.00"));
    }

    #[test]
    fn portfolio_json_has_summary_and_errors() {
        let wallet = SavedWallet {
            id: "w1".into(),
            label: "cold".into(),
            address: "0x742d35Cc6634C0532925a3b844Bc454e4438f44e".into(),
            network: NetworkTag::Ethereum,
            balance: None,
            usd_value: None,
            logo_url: None,
            last_updated: Utc::now(),
            is_active: true,
        };
        let report = PortfolioReport::new(vec![BatchOutcome {
            wallet,
            result: WalletBalance::invalid("x", "ethereum", "ETH", "boom"),
        }]);
        let json = render_portfolio_json(&report, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["command"], "portfolio");
        assert_eq!(value["data"]["summary"]["failedCount"], 1);
        assert_eq!(value["errors"][0], "cold: boom");
    }

    #[test]
    fn networks_md_has_row_per_network() {
        let registry = NetworkRegistry::new();
        let networks: Vec<_> = registry.iter().collect();
        let md = render_networks_md(&networks).unwrap();
        assert_eq!(md.lines().count(), NetworkTag::ALL.len() + 2);
        assert!(md.contains("| solana | Solana | SOL | 9 |"));
    }
}
