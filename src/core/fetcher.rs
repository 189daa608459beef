//! Balance fetching.
//!
//! [`BalanceFetcher`] is the seam between the aggregator and the outside
//! world. [`HttpBalanceFetcher`] picks the chain adapter for a network,
//! then prices the balance and resolves a logo. Provider-specific response
//! shapes stay inside `crate::providers`.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::amount;
use super::http::HttpClient;
use super::network::{ChainFamily, NetworkTag};
use crate::error::{Result, WalletError};
use crate::providers::{bitcoin, evm, pricing, solana};

/// Default CoinGecko API base.
pub const DEFAULT_PRICE_API: &str = "https://api.coingecko.com/api/v3";

/// Normalized native balance for one address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeBalance {
    /// Decimal string in display units.
    pub balance: String,
    /// Decimal string, two decimal places.
    pub usd_value: String,
    /// Coin logo, empty when it could not be resolved.
    pub logo_url: String,
}

/// Fetches the native balance of an address on a network.
#[async_trait]
pub trait BalanceFetcher: Send + Sync {
    /// Fetch balance and USD value.
    ///
    /// # Errors
    ///
    /// Any failure of the balance or price lookup. A balance without a USD
    /// value is never returned.
    async fn fetch_native_balance(&self, address: &str, network: NetworkTag)
    -> Result<NativeBalance>;
}

// =============================================================================
// Endpoints
// =============================================================================

/// Upstream base URLs.
#[derive(Debug, Clone)]
pub struct Endpoints {
    price_api: String,
    overrides: HashMap<NetworkTag, String>,
}

impl Endpoints {
    /// Price API base URL.
    #[must_use]
    pub fn price_api(&self) -> &str {
        &self.price_api
    }

    /// Balance endpoint for a network, override first.
    #[must_use]
    pub fn balance_url(&self, network: NetworkTag) -> &str {
        self.overrides
            .get(&network)
            .map_or_else(|| network.default_endpoint(), String::as_str)
    }

    #[must_use]
    pub fn with_price_api(mut self, url: impl Into<String>) -> Self {
        self.price_api = trim_base(url.into());
        self
    }

    #[must_use]
    pub fn with_network(mut self, network: NetworkTag, url: impl Into<String>) -> Self {
        self.overrides.insert(network, trim_base(url.into()));
        self
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            price_api: DEFAULT_PRICE_API.to_string(),
            overrides: HashMap::new(),
        }
    }
}

fn trim_base(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

// =============================================================================
// HTTP Fetcher
// =============================================================================

/// Fetcher backed by public JSON-RPC nodes, a block explorer and CoinGecko.
///
/// The logo lookup runs alongside the balance and price requests and is cut
/// off after `logo_timeout`, which stays below the request timeout.
#[derive(Debug, Clone)]
pub struct HttpBalanceFetcher {
    client: HttpClient,
    endpoints: Endpoints,
    logo_timeout: Duration,
}

impl HttpBalanceFetcher {
    /// Build a fetcher whose requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be constructed.
    pub fn new(timeout: Duration, endpoints: Endpoints) -> Result<Self> {
        Ok(Self::with_client(HttpClient::new(timeout)?, endpoints))
    }

    #[must_use]
    pub fn with_client(client: HttpClient, endpoints: Endpoints) -> Self {
        let logo_timeout = client.timeout() / 2;
        Self {
            client,
            endpoints,
            logo_timeout,
        }
    }

    /// Cap on the best-effort logo lookup. Defaults to half the request timeout.
    #[must_use]
    pub const fn with_logo_timeout(mut self, timeout: Duration) -> Self {
        self.logo_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Balance in display units and its USD value.
    async fn fetch_priced(
        &self,
        address: &str,
        network: NetworkTag,
    ) -> Result<(Decimal, String)> {
        let raw = self.fetch_raw(address, network).await?;
        let balance = amount::from_smallest_units(raw, network.family().decimals())?;

        let unit_price = pricing::fetch_usd_price(
            &self.client,
            self.endpoints.price_api(),
            network.price_lookup_id(),
        )
        .await?;
        let usd_value = amount::usd_value(balance, unit_price)?;
        Ok((balance, usd_value))
    }

    /// Logo URL, or `""` when the lookup fails or outlives `logo_timeout`.
    async fn fetch_logo(&self, network: NetworkTag) -> String {
        let price_id = network.price_lookup_id();
        let lookup = pricing::fetch_logo_url(&self.client, self.endpoints.price_api(), price_id);
        tokio::time::timeout(self.logo_timeout, lookup)
            .await
            .unwrap_or_else(|_| {
                tracing::debug!(coin_id = price_id, "Logo lookup timed out");
                String::new()
            })
    }

    /// Smallest-unit balance from the chain adapter.
    async fn fetch_raw(&self, address: &str, network: NetworkTag) -> Result<u128> {
        let url = self.endpoints.balance_url(network);
        match network.family() {
            ChainFamily::Evm => evm::fetch_balance(&self.client, url, network, address).await,
            ChainFamily::Bitcoin => bitcoin::fetch_balance(&self.client, url, address).await,
            ChainFamily::Solana => solana::fetch_balance(&self.client, url, address).await,
        }
    }
}

#[async_trait]
impl BalanceFetcher for HttpBalanceFetcher {
    async fn fetch_native_balance(
        &self,
        address: &str,
        network: NetworkTag,
    ) -> Result<NativeBalance> {
        let ((balance, usd_value), logo_url) = tokio::try_join!(
            self.fetch_priced(address, network),
            async { Ok::<_, WalletError>(self.fetch_logo(network).await) },
        )?;

        tracing::debug!(
            network = %network,
            balance = %balance,
            usd_value = %usd_value,
            "Fetched native balance"
        );

        Ok(NativeBalance {
            balance: amount::format_balance(balance),
            usd_value,
            logo_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_default_to_registry() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.price_api(), DEFAULT_PRICE_API);
        assert_eq!(
            endpoints.balance_url(NetworkTag::Bitcoin),
            "https://blockstream.info/api"
        );
    }

    #[test]
    fn endpoint_overrides_trim_trailing_slash() {
        let endpoints = Endpoints::default()
            .with_price_api("http://127.0.0.1:9000/")
            .with_network(NetworkTag::Polygon, "http://127.0.0.1:9001//");
        assert_eq!(endpoints.price_api(), "http://127.0.0.1:9000");
        assert_eq!(endpoints.balance_url(NetworkTag::Polygon), "http://127.0.0.1:9001");
        assert_eq!(
            endpoints.balance_url(NetworkTag::Ethereum),
            NetworkTag::Ethereum.default_endpoint()
        );
    }
}
