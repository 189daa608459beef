//! Wiremock responders for the upstreams a balance check touches.
//!
//! One server hosts everything: JSON-RPC nodes under `/rpc/{network}`, the
//! block explorer under `/btc`, and the price API under `/cg`.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use walletscope::core::fetcher::Endpoints;
use walletscope::core::network::NetworkTag;

pub const ONE_ETHER_WEI_HEX: &str = "0xde0b6b3a7640000";

/// Endpoints routed to `server`.
#[must_use]
pub fn endpoints_for(server: &MockServer) -> Endpoints {
    let base = server.uri();
    let mut endpoints = Endpoints::default().with_price_api(format!("{base}/cg"));
    for network in NetworkTag::ALL {
        let url = match network {
            NetworkTag::Bitcoin => format!("{base}/btc"),
            other => format!("{base}/rpc/{}", other.tag()),
        };
        endpoints = endpoints.with_network(*network, url);
    }
    endpoints
}

/// `[endpoints]` section pointing at `server`, for config files.
#[must_use]
pub fn endpoints_toml(server: &MockServer) -> String {
    let base = server.uri();
    let mut toml = format!("[endpoints]\nprice_api = \"{base}/cg\"\n");
    for network in NetworkTag::ALL {
        let url = match network {
            NetworkTag::Bitcoin => format!("{base}/btc"),
            other => format!("{base}/rpc/{}", other.tag()),
        };
        toml.push_str(&format!("{} = \"{url}\"\n", network.tag()));
    }
    toml
}

pub async fn mount_eth_balance(server: &MockServer, network: NetworkTag, hex_wei: &str) {
    Mock::given(method("POST"))
        .and(path(format!("/rpc/{}", network.tag())))
        .and(body_partial_json(json!({ "method": "eth_getBalance" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": hex_wei,
        })))
        .mount(server)
        .await;
}

/// `eth_getBalance` that answers after `delay`.
pub async fn mount_slow_eth_balance(
    server: &MockServer,
    network: NetworkTag,
    hex_wei: &str,
    delay: Duration,
) {
    Mock::given(method("POST"))
        .and(path(format!("/rpc/{}", network.tag())))
        .and(body_partial_json(json!({ "method": "eth_getBalance" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "jsonrpc": "2.0", "id": 1, "result": hex_wei }))
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

pub async fn mount_rpc_error(server: &MockServer, network: NetworkTag, code: i64, message: &str) {
    Mock::given(method("POST"))
        .and(path(format!("/rpc/{}", network.tag())))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": code, "message": message },
        })))
        .mount(server)
        .await;
}

pub async fn mount_sol_balance(server: &MockServer, lamports: u64) {
    Mock::given(method("POST"))
        .and(path("/rpc/solana"))
        .and(body_partial_json(json!({ "method": "getBalance" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": { "context": { "slot": 1 }, "value": lamports },
        })))
        .mount(server)
        .await;
}

pub async fn mount_btc_address(server: &MockServer, address: &str, funded: u64, spent: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/btc/address/{address}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "address": address,
            "chain_stats": {
                "funded_txo_count": 3,
                "funded_txo_sum": funded,
                "spent_txo_count": 1,
                "spent_txo_sum": spent,
                "tx_count": 4,
            },
        })))
        .mount(server)
        .await;
}

pub async fn mount_price(server: &MockServer, coin_id: &str, usd: f64) {
    Mock::given(method("GET"))
        .and(path("/cg/simple/price"))
        .and(query_param("ids", coin_id))
        .and(query_param("vs_currencies", "usd"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ coin_id: { "usd": usd } })),
        )
        .mount(server)
        .await;
}

pub async fn mount_logo(server: &MockServer, coin_id: &str, large: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/cg/coins/{coin_id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": coin_id,
            "image": { "thumb": "t.png", "small": "s.png", "large": large },
        })))
        .mount(server)
        .await;
}

pub async fn mount_status(server: &MockServer, method_name: &str, route: &str, status: u16) {
    Mock::given(method(method_name))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Logo endpoint that answers after `delay`.
pub async fn mount_slow_logo(server: &MockServer, coin_id: &str, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(format!("/cg/coins/{coin_id}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": coin_id, "image": { "large": "slow.png" } }))
                .set_delay(delay),
        )
        .mount(server)
        .await;
}
