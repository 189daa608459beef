//! Use-case boundary.
//!
//! [`WalletService`] exposes one plain async or sync method per use case and
//! owns the wiring between aggregator, batch runner and store. Callers never
//! see transport or upstream types.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use super::aggregator::BalanceAggregator;
use super::batch;
use super::fetcher::BalanceFetcher;
use super::http::DEFAULT_TIMEOUT;
use super::models::{
    BatchOutcome, NewBalance, RecentWallet, SavedWallet, SavedWalletInput, SavedWalletPatch,
    WalletBalance,
};
use super::network::NetworkTag;
use super::validator;
use crate::error::{Result, WalletError};
use crate::storage::WalletStore;

pub struct WalletService {
    aggregator: BalanceAggregator,
    store: Arc<WalletStore>,
    batch_timeout: Duration,
}

impl WalletService {
    #[must_use]
    pub fn new(fetcher: Arc<dyn BalanceFetcher>, store: Arc<WalletStore>) -> Self {
        Self {
            aggregator: BalanceAggregator::new(fetcher),
            store,
            batch_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Per-wallet limit for batch refreshes.
    #[must_use]
    pub const fn with_batch_timeout(mut self, timeout: Duration) -> Self {
        self.batch_timeout = timeout;
        self
    }

    #[must_use]
    pub fn store(&self) -> &WalletStore {
        &self.store
    }

    /// Check one address and record the result.
    ///
    /// A format-valid address gets a wallet row even when the fetch fails;
    /// only successful fetches append to balance history.
    pub async fn check_balance(&self, address: &str, network: &str) -> WalletBalance {
        let result = self.aggregator.check_balance(address, network).await;

        let Ok(tag) = NetworkTag::from_tag(network) else {
            return result;
        };
        if !validator::is_valid_for(address, tag) {
            return result;
        }

        let wallet = self.store.get_or_create_wallet(address, tag);
        if result.is_valid {
            self.store.save_balance(NewBalance {
                wallet_id: wallet.id,
                balance: result.balance.clone(),
                usd_value: Some(result.usd_value.clone()),
                metadata: json!({ "symbol": result.symbol }),
            });
        }
        result
    }

    /// Most recently seen wallets with their latest balance.
    #[must_use]
    pub fn list_recent(&self) -> Vec<RecentWallet> {
        self.store
            .list_recent_wallets()
            .into_iter()
            .map(|wallet| {
                let latest = self.store.latest_balance(&wallet.id);
                let (balance, usd_value, last_updated) = match latest {
                    Some(b) => (
                        b.balance,
                        b.usd_value.unwrap_or_else(|| "0".to_string()),
                        b.last_updated,
                    ),
                    None => ("0".to_string(), "0".to_string(), wallet.created_at),
                };
                RecentWallet {
                    wallet,
                    balance,
                    usd_value,
                    last_updated,
                }
            })
            .collect()
    }

    #[must_use]
    pub fn list_saved_wallets(&self) -> Vec<SavedWallet> {
        self.store.list_saved_wallets()
    }

    /// Save a wallet for batch refresh.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a blank label, `InvalidAddress` when the address
    /// does not match the network.
    pub fn save_wallet(&self, input: SavedWalletInput) -> Result<SavedWallet> {
        let label = validate_label(&input.label)?;
        validate_pair(&input.address, input.network)?;
        Ok(self.store.create_saved_wallet(SavedWalletInput { label, ..input }))
    }

    /// Apply a partial update. `Ok(None)` when the id is unknown.
    ///
    /// # Errors
    ///
    /// Same checks as [`Self::save_wallet`] for the fields being changed.
    pub fn update_saved_wallet(
        &self,
        id: &str,
        mut patch: SavedWalletPatch,
    ) -> Result<Option<SavedWallet>> {
        let Some(current) = self.store.get_saved_wallet(id) else {
            return Ok(None);
        };
        if let Some(label) = &patch.label {
            patch.label = Some(validate_label(label)?);
        }
        if patch.address.is_some() || patch.network.is_some() {
            let address = patch.address.as_deref().unwrap_or(&current.address);
            validate_pair(address, patch.network.unwrap_or(current.network))?;
        }
        Ok(self.store.update_saved_wallet(id, patch))
    }

    /// Returns whether a wallet was deleted.
    pub fn delete_saved_wallet(&self, id: &str) -> bool {
        self.store.delete_saved_wallet(id)
    }

    pub fn toggle_saved_wallet(&self, id: &str) -> Option<SavedWallet> {
        self.store.toggle_saved_wallet(id)
    }

    /// Refresh the given saved wallets. See [`batch::batch_check`].
    pub async fn batch_check(&self, ids: &[String]) -> Vec<BatchOutcome> {
        batch::batch_check(&self.aggregator, &self.store, ids, self.batch_timeout).await
    }

    /// Refresh every active saved wallet.
    pub async fn refresh_all(&self) -> Vec<BatchOutcome> {
        let ids: Vec<String> = self
            .store
            .list_saved_wallets()
            .into_iter()
            .filter(|w| w.is_active)
            .map(|w| w.id)
            .collect();
        self.batch_check(&ids).await
    }
}

impl std::fmt::Debug for WalletService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletService")
            .field("batch_timeout", &self.batch_timeout)
            .finish_non_exhaustive()
    }
}

fn validate_label(label: &str) -> Result<String> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(WalletError::InvalidInput {
            field: "label".to_string(),
            message: "label must not be empty".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

fn validate_pair(address: &str, network: NetworkTag) -> Result<()> {
    if validator::is_valid_for(address, network) {
        Ok(())
    } else {
        Err(WalletError::InvalidAddress {
            address: address.to_string(),
            network: network.tag().to_string(),
        })
    }
}
