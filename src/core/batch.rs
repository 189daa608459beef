//! Concurrent refresh of saved wallets.

use std::time::Duration;

use tokio::time::timeout;

use super::aggregator::{BalanceAggregator, FETCH_FAILED_MESSAGE};
use super::models::{BatchOutcome, SavedWallet, SavedWalletPatch, WalletBalance};
use crate::error::WalletError;
use crate::storage::WalletStore;

/// Refresh the active saved wallets whose ids appear in `ids`.
///
/// Ids that are unknown or point at inactive wallets are dropped silently.
/// Every selected wallet is checked concurrently and the call returns once
/// all checks have settled; one failure never cancels the others. Successful
/// checks write their snapshot back to the store. Failed checks leave the
/// stored row untouched and report the failure in the outcome only.
///
/// Outcome order is not guaranteed.
pub async fn batch_check(
    aggregator: &BalanceAggregator,
    store: &WalletStore,
    ids: &[String],
    per_wallet_timeout: Duration,
) -> Vec<BatchOutcome> {
    let selected: Vec<SavedWallet> = store
        .list_saved_wallets()
        .into_iter()
        .filter(|w| w.is_active && ids.iter().any(|id| *id == w.id))
        .collect();

    tracing::debug!(
        requested = ids.len(),
        selected = selected.len(),
        "Starting batch check"
    );

    let futures: Vec<_> = selected
        .into_iter()
        .map(|wallet| refresh_one(aggregator, store, wallet, per_wallet_timeout))
        .collect();

    let outcomes = futures::future::join_all(futures).await;

    let failed = outcomes.iter().filter(|o| !o.is_success()).count();
    tracing::info!(
        total = outcomes.len(),
        failed,
        "Batch check complete"
    );

    outcomes
}

async fn refresh_one(
    aggregator: &BalanceAggregator,
    store: &WalletStore,
    wallet: SavedWallet,
    limit: Duration,
) -> BatchOutcome {
    let result = match timeout(limit, aggregator.check(&wallet.address, wallet.network)).await {
        Ok(result) => result,
        Err(_) => {
            let err = WalletError::TimeoutWithNetwork {
                network: wallet.network.tag().to_string(),
                seconds: limit.as_secs(),
            };
            tracing::warn!(label = %wallet.label, error = %err, "Saved wallet check timed out");
            WalletBalance::invalid(
                &wallet.address,
                wallet.network.tag(),
                wallet.network.native_symbol(),
                FETCH_FAILED_MESSAGE,
            )
        }
    };

    if !result.is_valid {
        return BatchOutcome { wallet, result };
    }

    let wallet = store
        .update_saved_wallet(&wallet.id, SavedWalletPatch::snapshot(&result))
        .unwrap_or(wallet);
    BatchOutcome { wallet, result }
}
