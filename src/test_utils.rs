//! Test utilities for walletscope.
//!
//! Provides a scripted [`BalanceFetcher`], sample addresses, data factories
//! and a temporary directory helper.
//!
//! # Usage
//!
//! ```rust,ignore
//! use walletscope::test_utils::*;
//!
//! let stub = StubFetcher::with_balance("1.5", "4500.00").fail_on(NetworkTag::Bitcoin);
//! let dir = TestDir::new();
//! dir.create_file("config.toml", "[general]\ntimeout_seconds = 30");
//! ```

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::core::fetcher::{BalanceFetcher, NativeBalance};
use crate::core::models::SavedWalletInput;
use crate::core::network::NetworkTag;
use crate::error::{Result, WalletError};

// =============================================================================
// Sample addresses
// =============================================================================

pub const EVM_ADDRESS: &str = "0x742d35Cc6634C0532925a3b844Bc454e4438f44e";
pub const BTC_ADDRESS: &str = "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq";
pub const BTC_LEGACY_ADDRESS: &str = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa";
pub const SOL_ADDRESS: &str = "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM";

// =============================================================================
// Stub fetcher
// =============================================================================

/// Scripted fetcher that counts calls.
///
/// Responses are chosen per network, falling back to a default. Networks
/// marked with [`StubFetcher::fail_on`] always fail.
#[derive(Debug, Default)]
pub struct StubFetcher {
    default: Option<NativeBalance>,
    per_network: HashMap<NetworkTag, NativeBalance>,
    failing: HashSet<NetworkTag>,
    delays: HashMap<NetworkTag, Duration>,
    calls: AtomicUsize,
}

impl StubFetcher {
    /// Every network returns the same balance.
    #[must_use]
    pub fn with_balance(balance: &str, usd_value: &str) -> Self {
        Self {
            default: Some(native(balance, usd_value)),
            ..Self::default()
        }
    }

    /// Every network fails.
    #[must_use]
    pub fn failing() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn respond(mut self, network: NetworkTag, balance: &str, usd_value: &str) -> Self {
        self.per_network.insert(network, native(balance, usd_value));
        self
    }

    #[must_use]
    pub fn fail_on(mut self, network: NetworkTag) -> Self {
        self.failing.insert(network);
        self
    }

    /// Sleep before answering for `network`.
    #[must_use]
    pub fn delay_on(mut self, network: NetworkTag, delay: Duration) -> Self {
        self.delays.insert(network, delay);
        self
    }

    /// Number of fetches so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BalanceFetcher for StubFetcher {
    async fn fetch_native_balance(
        &self,
        _address: &str,
        network: NetworkTag,
    ) -> Result<NativeBalance> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(&network) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(&network) {
            return Err(WalletError::Network(format!("stubbed failure for {network}")));
        }
        self.per_network
            .get(&network)
            .or(self.default.as_ref())
            .cloned()
            .ok_or_else(|| WalletError::Network(format!("no stubbed balance for {network}")))
    }
}

fn native(balance: &str, usd_value: &str) -> NativeBalance {
    NativeBalance {
        balance: balance.to_string(),
        usd_value: usd_value.to_string(),
        logo_url: String::new(),
    }
}

// =============================================================================
// Factories
// =============================================================================

/// Build a [`SavedWalletInput`].
#[must_use]
pub fn saved_input(label: &str, address: &str, network: NetworkTag) -> SavedWalletInput {
    SavedWalletInput {
        label: label.to_string(),
        address: address.to_string(),
        network,
    }
}

// =============================================================================
// Temporary directories
// =============================================================================

/// A temporary directory removed on drop.
pub struct TestDir {
    inner: tempfile::TempDir,
}

impl TestDir {
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: tempfile::tempdir().expect("Failed to create temp directory"),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    /// Write a file, creating parent directories. Returns its path.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn create_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.inner.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        let mut file = fs::File::create(&path).expect("Failed to create test file");
        file.write_all(content.as_bytes())
            .expect("Failed to write test file");
        path
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}
