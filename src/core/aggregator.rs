//! Single address balance checks.
//!
//! Every outcome, including validation and upstream failures, is returned
//! as a [`WalletBalance`]. Nothing raised by a fetcher escapes this module.

use std::sync::Arc;

use super::fetcher::BalanceFetcher;
use super::models::WalletBalance;
use super::network::NetworkTag;
use super::validator;

/// Message for an address that does not match its network's format.
pub const INVALID_ADDRESS_MESSAGE: &str = "invalid address format for network";

/// Message for any upstream failure.
pub const FETCH_FAILED_MESSAGE: &str = "failed to fetch balance, check address and try again";

/// Validates an address, then fetches its balance.
#[derive(Clone)]
pub struct BalanceAggregator {
    fetcher: Arc<dyn BalanceFetcher>,
}

impl BalanceAggregator {
    #[must_use]
    pub fn new(fetcher: Arc<dyn BalanceFetcher>) -> Self {
        Self { fetcher }
    }

    /// Check `address` on the network named by `network`.
    ///
    /// Unknown tags and malformed addresses return an invalid result without
    /// any upstream call.
    pub async fn check_balance(&self, address: &str, network: &str) -> WalletBalance {
        let Ok(tag) = NetworkTag::from_tag(network) else {
            tracing::debug!(network, "Unknown network tag");
            return WalletBalance::invalid(address, network, "", INVALID_ADDRESS_MESSAGE);
        };
        self.check(address, tag).await
    }

    /// Check `address` on a known network.
    pub async fn check(&self, address: &str, network: NetworkTag) -> WalletBalance {
        if !validator::is_valid_for(address, network) {
            tracing::debug!(network = %network, "Address failed format validation");
            return WalletBalance::invalid(
                address,
                network.tag(),
                network.native_symbol(),
                INVALID_ADDRESS_MESSAGE,
            );
        }

        match self.fetcher.fetch_native_balance(address, network).await {
            Ok(fetched) => WalletBalance::valid(address, network, fetched),
            Err(e) => {
                tracing::warn!(
                    network = %network,
                    error = %e,
                    code = e.error_code(),
                    "Balance fetch failed"
                );
                WalletBalance::invalid(
                    address,
                    network.tag(),
                    network.native_symbol(),
                    FETCH_FAILED_MESSAGE,
                )
            }
        }
    }
}

impl std::fmt::Debug for BalanceAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BalanceAggregator").finish_non_exhaustive()
    }
}
