//! Utility functions.

pub mod env;
pub mod format;
pub mod time;

pub use format::{format_balance, format_percent, format_usd, truncate_address};
pub use time::format_relative_time;
