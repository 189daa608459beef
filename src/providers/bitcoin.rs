//! Bitcoin balance adapter (Esplora-style explorer API).
//!
//! Confirmed balance is `funded_txo_sum - spent_txo_sum` from `chain_stats`.

use serde::Deserialize;

use crate::core::http::HttpClient;
use crate::error::{Result, WalletError};

#[derive(Debug, Deserialize)]
struct AddressInfo {
    chain_stats: ChainStats,
}

#[derive(Debug, Deserialize)]
struct ChainStats {
    funded_txo_sum: u64,
    spent_txo_sum: u64,
}

impl ChainStats {
    fn confirmed_sats(&self) -> Result<u128> {
        self.funded_txo_sum
            .checked_sub(self.spent_txo_sum)
            .map(u128::from)
            .ok_or_else(|| {
                WalletError::ParseResponse(format!(
                    "spent ({}) exceeds funded ({})",
                    self.spent_txo_sum, self.funded_txo_sum
                ))
            })
    }
}

/// Fetch the confirmed satoshi balance of `address`.
///
/// # Errors
///
/// Transport failures, non-2xx responses and inconsistent totals.
pub async fn fetch_balance(
    client: &HttpClient,
    api_base: &str,
    address: &str,
) -> Result<u128> {
    let url = format!("{api_base}/address/{address}");
    let info: AddressInfo = client.get_json(&url).await?;
    info.chain_stats.confirmed_sats()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "address": "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa",
        "chain_stats": {"funded_txo_count": 10, "funded_txo_sum": 150000000, "spent_txo_count": 2, "spent_txo_sum": 50000000, "tx_count": 12},
        "mempool_stats": {"funded_txo_count": 0, "funded_txo_sum": 0, "spent_txo_count": 0, "spent_txo_sum": 0, "tx_count": 0}
    }"#;

    #[test]
    fn confirmed_balance_is_funded_minus_spent() {
        let info: AddressInfo = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(info.chain_stats.confirmed_sats().unwrap(), 100_000_000);
    }

    #[test]
    fn overspent_totals_are_rejected() {
        let stats = ChainStats {
            funded_txo_sum: 1,
            spent_txo_sum: 2,
        };
        assert!(stats.confirmed_sats().is_err());
    }
}
