//! HTTP client utilities.
//!
//! Provides the shared HTTP client and request helpers used by every
//! balance and price adapter.

use std::time::Duration;

use reqwest::{Client, ClientBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Result, WalletError};

/// Default timeout for upstream requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// `reqwest` client paired with the timeout it was built with.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Build a client whose requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns error if client construction fails.
    pub fn new(timeout: Duration) -> Result<Self> {
        let inner = ClientBuilder::new()
            .timeout(timeout)
            .user_agent(format!("walletscope/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WalletError::Network(e.to_string()))?;
        Ok(Self { inner, timeout })
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch JSON from a URL with GET.
    ///
    /// # Errors
    ///
    /// Returns error on network failure, non-success status, or JSON parse failure.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!(url, "GET");
        let response = self
            .inner
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;
        self.decode(response, url).await
    }

    /// POST a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns error on network failure, non-success status, or JSON parse failure.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T> {
        tracing::debug!(url, "POST");
        let response = self
            .inner
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;
        self.decode(response, url).await
    }

    async fn decode<T: DeserializeOwned>(&self, response: Response, url: &str) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(WalletError::UpstreamStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.json().await.map_err(|e| {
            if e.is_timeout() {
                WalletError::Timeout(self.timeout.as_secs())
            } else {
                WalletError::ParseResponse(e.to_string())
            }
        })
    }

    fn map_error(&self, e: reqwest::Error) -> WalletError {
        if e.is_timeout() {
            WalletError::Timeout(self.timeout.as_secs())
        } else {
            WalletError::Network(e.to_string())
        }
    }
}
