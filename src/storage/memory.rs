//! In-memory wallet store.
//!
//! Three independent tables: wallets seen by balance checks, their balance
//! history, and the user's saved wallets. Data lives for the lifetime of the
//! process. Each table sits behind its own mutex so every read-modify-write
//! on a row is atomic.

use std::cmp::Ordering;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use uuid::Uuid;

use crate::core::models::{
    Balance, NewBalance, NewWallet, SavedWallet, SavedWalletInput, SavedWalletPatch, Wallet,
};
use crate::core::network::NetworkTag;

/// Maximum number of rows returned by [`WalletStore::list_recent_wallets`].
pub const RECENT_LIMIT: usize = 10;

/// Process-lifetime store. Construct one per process (or per test).
#[derive(Debug, Default)]
pub struct WalletStore {
    wallets: Mutex<Vec<Wallet>>,
    balances: Mutex<Vec<Balance>>,
    saved: Mutex<Vec<SavedWallet>>,
}

fn lock<T>(table: &Mutex<T>) -> MutexGuard<'_, T> {
    table.lock().unwrap_or_else(PoisonError::into_inner)
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl WalletStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Wallet table
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn get_wallet(&self, id: &str) -> Option<Wallet> {
        lock(&self.wallets).iter().find(|w| w.id == id).cloned()
    }

    /// Look up a wallet by its natural key.
    #[must_use]
    pub fn get_wallet_by_address(&self, address: &str, network: NetworkTag) -> Option<Wallet> {
        lock(&self.wallets)
            .iter()
            .find(|w| w.address == address && w.network == network)
            .cloned()
    }

    pub fn create_wallet(&self, input: NewWallet) -> Wallet {
        let wallet = Wallet {
            id: new_id(),
            address: input.address,
            network: input.network,
            label: input.label,
            created_at: Utc::now(),
        };
        lock(&self.wallets).push(wallet.clone());
        wallet
    }

    /// Return the wallet for `(address, network)`, creating it if absent.
    ///
    /// Lookup and insert happen under one lock, so concurrent checks of the
    /// same address never create duplicate rows.
    pub fn get_or_create_wallet(&self, address: &str, network: NetworkTag) -> Wallet {
        let mut wallets = lock(&self.wallets);
        if let Some(existing) = wallets
            .iter()
            .find(|w| w.address == address && w.network == network)
        {
            return existing.clone();
        }
        let wallet = Wallet {
            id: new_id(),
            address: address.to_string(),
            network,
            label: None,
            created_at: Utc::now(),
        };
        wallets.push(wallet.clone());
        wallet
    }

    /// Newest wallets first, at most [`RECENT_LIMIT`].
    ///
    /// Rows created in the same instant are ordered by insertion, newest first.
    #[must_use]
    pub fn list_recent_wallets(&self) -> Vec<Wallet> {
        let wallets = lock(&self.wallets);
        let mut indexed: Vec<(usize, &Wallet)> = wallets.iter().enumerate().collect();
        indexed.sort_by(|(ia, a), (ib, b)| {
            b.created_at.cmp(&a.created_at).then_with(|| ib.cmp(ia))
        });
        indexed
            .into_iter()
            .take(RECENT_LIMIT)
            .map(|(_, w)| w.clone())
            .collect()
    }

    // -------------------------------------------------------------------------
    // Balance table
    // -------------------------------------------------------------------------

    /// Append a balance row. Earlier rows for the wallet are kept.
    pub fn save_balance(&self, input: NewBalance) -> Balance {
        let balance = Balance {
            id: new_id(),
            wallet_id: input.wallet_id,
            balance: input.balance,
            usd_value: input.usd_value,
            last_updated: Utc::now(),
            metadata: input.metadata,
        };
        lock(&self.balances).push(balance.clone());
        balance
    }

    /// Most recent balance row for a wallet.
    #[must_use]
    pub fn latest_balance(&self, wallet_id: &str) -> Option<Balance> {
        let balances = lock(&self.balances);
        balances
            .iter()
            .enumerate()
            .filter(|(_, b)| b.wallet_id == wallet_id)
            .max_by(|(ia, a), (ib, b)| {
                a.last_updated.cmp(&b.last_updated).then_with(|| ia.cmp(ib))
            })
            .map(|(_, b)| b.clone())
    }

    /// All balance rows for a wallet, oldest first.
    #[must_use]
    pub fn balance_history(&self, wallet_id: &str) -> Vec<Balance> {
        lock(&self.balances)
            .iter()
            .filter(|b| b.wallet_id == wallet_id)
            .cloned()
            .collect()
    }

    // -------------------------------------------------------------------------
    // Saved wallet table
    // -------------------------------------------------------------------------

    /// Saved wallets ordered by label.
    #[must_use]
    pub fn list_saved_wallets(&self) -> Vec<SavedWallet> {
        let mut saved = lock(&self.saved).clone();
        saved.sort_by(|a, b| compare_labels(&a.label, &b.label));
        saved
    }

    #[must_use]
    pub fn get_saved_wallet(&self, id: &str) -> Option<SavedWallet> {
        lock(&self.saved).iter().find(|w| w.id == id).cloned()
    }

    /// Insert a saved wallet. New rows are active.
    pub fn create_saved_wallet(&self, input: SavedWalletInput) -> SavedWallet {
        let wallet = SavedWallet {
            id: new_id(),
            label: input.label,
            address: input.address,
            network: input.network,
            balance: None,
            usd_value: None,
            logo_url: None,
            last_updated: Utc::now(),
            is_active: true,
        };
        lock(&self.saved).push(wallet.clone());
        wallet
    }

    /// Merge `patch` into a saved wallet and re-stamp `last_updated`.
    ///
    /// Returns `None` when `id` is absent.
    pub fn update_saved_wallet(&self, id: &str, patch: SavedWalletPatch) -> Option<SavedWallet> {
        let mut saved = lock(&self.saved);
        let wallet = saved.iter_mut().find(|w| w.id == id)?;

        if let Some(label) = patch.label {
            wallet.label = label;
        }
        if let Some(address) = patch.address {
            wallet.address = address;
        }
        if let Some(network) = patch.network {
            wallet.network = network;
        }
        if patch.balance.is_some() {
            wallet.balance = patch.balance;
        }
        if patch.usd_value.is_some() {
            wallet.usd_value = patch.usd_value;
        }
        if patch.logo_url.is_some() {
            wallet.logo_url = patch.logo_url;
        }
        if let Some(active) = patch.is_active {
            wallet.is_active = active;
        }
        wallet.last_updated = Utc::now();

        Some(wallet.clone())
    }

    /// Remove a saved wallet. Returns whether a row existed.
    pub fn delete_saved_wallet(&self, id: &str) -> bool {
        let mut saved = lock(&self.saved);
        let before = saved.len();
        saved.retain(|w| w.id != id);
        saved.len() != before
    }

    /// Flip `is_active`. Returns `None` when `id` is absent.
    pub fn toggle_saved_wallet(&self, id: &str) -> Option<SavedWallet> {
        let mut saved = lock(&self.saved);
        let wallet = saved.iter_mut().find(|w| w.id == id)?;
        wallet.is_active = !wallet.is_active;
        Some(wallet.clone())
    }
}

fn compare_labels(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}
