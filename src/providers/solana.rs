//! Solana balance adapter (`getBalance`, lamports).

use serde::Deserialize;

use super::rpc;
use crate::core::http::HttpClient;
use crate::error::Result;

#[derive(Debug, Deserialize)]
struct BalanceResult {
    value: u64,
}

/// Fetch the lamport balance of `address`.
///
/// # Errors
///
/// Transport failures, JSON-RPC error objects and malformed results.
pub async fn fetch_balance(
    client: &HttpClient,
    rpc_url: &str,
    address: &str,
) -> Result<u128> {
    let result: BalanceResult =
        rpc::call(client, rpc_url, "solana", "getBalance", [address]).await?;
    Ok(u128::from(result.value))
}
