//! EVM-family balance adapter (`eth_getBalance`).

use super::rpc;
use crate::core::amount::parse_hex_quantity;
use crate::core::http::HttpClient;
use crate::core::network::NetworkTag;
use crate::error::Result;

/// Fetch the wei balance of `address` at the latest block.
///
/// # Errors
///
/// Transport failures, JSON-RPC error objects and malformed hex results.
pub async fn fetch_balance(
    client: &HttpClient,
    rpc_url: &str,
    network: NetworkTag,
    address: &str,
) -> Result<u128> {
    let hex: String = rpc::call(
        client,
        rpc_url,
        network.tag(),
        "eth_getBalance",
        (address, "latest"),
    )
    .await?;
    parse_hex_quantity(&hex)
}
