//! Core data models, balance fetching and wallet services.

pub mod aggregator;
pub mod amount;
pub mod batch;
pub mod fetcher;
pub mod http;
pub mod logging;
pub mod models;
pub mod network;
pub mod portfolio;
pub mod service;
pub mod validator;

pub use aggregator::{BalanceAggregator, FETCH_FAILED_MESSAGE, INVALID_ADDRESS_MESSAGE};
pub use fetcher::{BalanceFetcher, Endpoints, HttpBalanceFetcher, NativeBalance};
pub use models::{
    Balance, BatchOutcome, NewBalance, NewWallet, RecentWallet, RobotOutput, SavedWallet,
    SavedWalletInput, SavedWalletPatch, Wallet, WalletBalance,
};
pub use network::{ChainFamily, NetworkDescriptor, NetworkRegistry, NetworkTag};
pub use portfolio::{Allocation, PortfolioReport, PortfolioSummary, RiskLevel};
pub use service::WalletService;
pub use validator::validate_address;
