//! Portfolio command implementation.

use crate::cli::OutputOptions;
use crate::cli::args::PortfolioArgs;
use crate::core::models::SavedWallet;
use crate::core::portfolio::PortfolioReport;
use crate::core::service::WalletService;
use crate::error::{Result, WalletError};
use crate::render;

/// Execute the portfolio command.
pub async fn execute(
    service: &WalletService,
    args: &PortfolioArgs,
    output: OutputOptions,
) -> Result<()> {
    let outcomes = if args.ids.is_empty() {
        service.refresh_all().await
    } else {
        let ids = resolve_ids(&service.list_saved_wallets(), &args.ids)?;
        service.batch_check(&ids).await
    };

    let report = PortfolioReport::new(outcomes);
    tracing::info!(
        total_usd = %report.summary.total_usd,
        valid = report.summary.valid_count,
        failed = report.summary.failed_count,
        "Portfolio refreshed"
    );

    let rendered = render::render_portfolio(&report, output.format, output.pretty, output.no_color)?;
    print!("{rendered}");

    if report.summary.failed_count > 0 {
        return Err(WalletError::PartialFailure {
            failed: report.summary.failed_count,
        });
    }
    Ok(())
}

/// Map each selector to a saved wallet id, matching the id first, then the
/// label (case-insensitive).
fn resolve_ids(wallets: &[SavedWallet], selectors: &[String]) -> Result<Vec<String>> {
    selectors
        .iter()
        .map(|selector| {
            wallets
                .iter()
                .find(|w| w.id == *selector)
                .or_else(|| wallets.iter().find(|w| w.label.eq_ignore_ascii_case(selector)))
                .map(|w| w.id.clone())
                .ok_or_else(|| WalletError::WalletNotFound(selector.clone()))
        })
        .collect()
}
