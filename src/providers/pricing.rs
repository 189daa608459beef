//! CoinGecko price and logo lookups.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::core::amount::price_from_f64;
use crate::core::http::HttpClient;
use crate::error::{Result, WalletError};

#[derive(Debug, Deserialize)]
struct UsdQuote {
    usd: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct CoinDetail {
    #[serde(default)]
    image: Option<CoinImage>,
}

#[derive(Debug, Deserialize)]
struct CoinImage {
    #[serde(default)]
    large: Option<String>,
    #[serde(default)]
    small: Option<String>,
}

/// Spot USD price for a coin id. Never cached.
///
/// # Errors
///
/// Transport failures, or [`WalletError::MissingPrice`] when the response
/// has no USD quote for `coin_id`.
pub async fn fetch_usd_price(
    client: &HttpClient,
    api_base: &str,
    coin_id: &str,
) -> Result<Decimal> {
    let url = format!("{api_base}/simple/price?ids={coin_id}&vs_currencies=usd");
    let quotes: HashMap<String, UsdQuote> = client.get_json(&url).await?;
    extract_price(&quotes, coin_id)
}

fn extract_price(quotes: &HashMap<String, UsdQuote>, coin_id: &str) -> Result<Decimal> {
    let usd = quotes
        .get(coin_id)
        .and_then(|q| q.usd)
        .ok_or_else(|| WalletError::MissingPrice(coin_id.to_string()))?;
    price_from_f64(usd)
}

/// Logo URL for a coin id, or `""` on any failure.
pub async fn fetch_logo_url(client: &HttpClient, api_base: &str, coin_id: &str) -> String {
    let url = format!(
        "{api_base}/coins/{coin_id}?localization=false&tickers=false&market_data=false\
         &community_data=false&developer_data=false&sparkline=false"
    );
    match client.get_json::<CoinDetail>(&url).await {
        Ok(detail) => pick_logo(detail),
        Err(e) => {
            tracing::debug!(coin_id, error = %e, "Logo lookup failed");
            String::new()
        }
    }
}

fn pick_logo(detail: CoinDetail) -> String {
    detail
        .image
        .and_then(|image| image.large.or(image.small))
        .unwrap_or_default()
}
