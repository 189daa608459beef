//! Core data models.
//!
//! `WalletBalance` is the transient result of a balance check. `Wallet`,
//! `Balance` and `SavedWallet` are the rows held by the in-memory store.
//! All types serialize with camelCase field names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::fetcher::NativeBalance;
use super::network::NetworkTag;

// =============================================================================
// Wallet Balance
// =============================================================================

/// Result of checking one address on one network.
///
/// When `is_valid` is false, `error` is always set and `balance` /
/// `usd_value` are `"0"`. Build instances through [`WalletBalance::valid`]
/// or [`WalletBalance::invalid`]; a new check produces a new value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WalletBalance {
    pub address: String,
    /// Network tag as requested; may be a tag outside the registry on failure.
    pub network: String,
    /// Decimal string in the network's native unit.
    pub balance: String,
    /// Decimal string, two decimal places.
    pub usd_value: String,
    pub symbol: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,

    pub last_updated: DateTime<Utc>,
    pub is_valid: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WalletBalance {
    /// A successful check.
    #[must_use]
    pub fn valid(address: &str, network: NetworkTag, fetched: NativeBalance) -> Self {
        Self {
            address: address.to_string(),
            network: network.tag().to_string(),
            balance: fetched.balance,
            usd_value: fetched.usd_value,
            symbol: network.native_symbol().to_string(),
            logo_url: (!fetched.logo_url.is_empty()).then_some(fetched.logo_url),
            last_updated: Utc::now(),
            is_valid: true,
            error: None,
        }
    }

    /// A failed check. Balance and USD value are forced to zero.
    #[must_use]
    pub fn invalid(address: &str, network: &str, symbol: &str, error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            address: address.to_string(),
            network: network.to_string(),
            balance: "0".to_string(),
            usd_value: "0".to_string(),
            symbol: symbol.to_string(),
            logo_url: None,
            last_updated: Utc::now(),
            is_valid: false,
            error: Some(if error.is_empty() {
                "unknown error".to_string()
            } else {
                error
            }),
        }
    }
}

// =============================================================================
// Wallet / Balance rows
// =============================================================================

/// A wallet seen by a balance check. Identity is `(address, network)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub id: String,
    pub address: String,
    pub network: NetworkTag,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// Insert payload for [`Wallet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWallet {
    pub address: String,
    pub network: NetworkTag,
    pub label: Option<String>,
}

/// One recorded balance for a wallet. Rows are append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub id: String,
    /// Weak reference to [`Wallet::id`].
    pub wallet_id: String,
    pub balance: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub usd_value: Option<String>,

    pub last_updated: DateTime<Utc>,

    /// Extra fields such as the symbol.
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// Insert payload for [`Balance`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewBalance {
    pub wallet_id: String,
    pub balance: String,
    pub usd_value: Option<String>,
    pub metadata: serde_json::Value,
}

/// A recent wallet joined with its latest balance.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecentWallet {
    #[serde(flatten)]
    pub wallet: Wallet,
    pub balance: String,
    pub usd_value: String,
    pub last_updated: DateTime<Utc>,
}

// =============================================================================
// Saved wallets
// =============================================================================

/// A user-curated wallet tracked for batch refresh.
///
/// Not unique by address: the same address may be saved more than once.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SavedWallet {
    pub id: String,
    pub label: String,
    pub address: String,
    pub network: NetworkTag,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub usd_value: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,

    pub last_updated: DateTime<Utc>,
    pub is_active: bool,
}

/// Insert payload for [`SavedWallet`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedWalletInput {
    pub label: String,
    pub address: String,
    pub network: NetworkTag,
}

/// Partial update for [`SavedWallet`]. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SavedWalletPatch {
    pub label: Option<String>,
    pub address: Option<String>,
    pub network: Option<NetworkTag>,
    pub balance: Option<String>,
    pub usd_value: Option<String>,
    pub logo_url: Option<String>,
    pub is_active: Option<bool>,
}

impl SavedWalletPatch {
    /// Patch that writes a fresh balance snapshot.
    #[must_use]
    pub fn snapshot(result: &WalletBalance) -> Self {
        Self {
            balance: Some(result.balance.clone()),
            usd_value: Some(result.usd_value.clone()),
            logo_url: result.logo_url.clone(),
            ..Self::default()
        }
    }
}

// =============================================================================
// Batch outcome
// =============================================================================

/// Outcome of refreshing one saved wallet.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    /// Wallet as stored after the refresh.
    pub wallet: SavedWallet,
    pub result: WalletBalance,
}

impl BatchOutcome {
    /// Whether the balance check succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.result.is_valid
    }
}

// =============================================================================
// Robot Output
// =============================================================================

/// Versioned JSON envelope for machine-readable output.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotOutput<T> {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    pub command: String,
    pub data: T,
    pub errors: Vec<String>,
}

impl<T> RobotOutput<T> {
    /// Create a new robot output envelope.
    pub fn new(command: impl Into<String>, data: T) -> Self {
        Self::with_errors(command, data, Vec::new())
    }

    /// Create with errors.
    pub fn with_errors(command: impl Into<String>, data: T, errors: Vec<String>) -> Self {
        Self {
            schema_version: "walletscope.v1".to_string(),
            generated_at: Utc::now(),
            command: command.into(),
            data,
            errors,
        }
    }
}
