//! Error types for walletscope.
//!
//! Uses `thiserror` for structured error types that map to exit codes.
//!
//! ## Error Taxonomy
//!
//! Errors are categorized into five main categories:
//! - **Validation**: Malformed addresses, unknown networks, bad user input
//! - **Network**: Connection, timeout, or transport issues talking to upstreams
//! - **Configuration**: Config file parsing, validation, or missing values
//! - **Upstream**: Balance/price sources answering with errors or bad payloads
//! - **Internal**: Unexpected errors, bugs, or unclassified issues
//!
//! Each error has a stable error code (e.g., `WSC-V001`) for programmatic handling.
//!
//! Nothing in this enum crosses the aggregator boundary as a raised fault:
//! balance checks convert every variant into a failed `WalletBalance`.

use thiserror::Error;

// =============================================================================
// Error Categories
// =============================================================================

/// High-level error categories for classification and routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Input rejected before any upstream call.
    Validation,
    /// Network issues (timeout, connection refused, transport failures).
    Network,
    /// Configuration issues (parse errors, invalid values).
    Configuration,
    /// Upstream source answered, but not with something usable.
    Upstream,
    /// Internal errors (bugs, unexpected state, unclassified).
    Internal,
}

impl ErrorCategory {
    /// Returns a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Validation => "Validation error",
            Self::Network => "Network error",
            Self::Configuration => "Configuration error",
            Self::Upstream => "Upstream error",
            Self::Internal => "Internal error",
        }
    }

    /// Returns a short code prefix for this category.
    #[must_use]
    pub const fn code_prefix(&self) -> &'static str {
        match self {
            Self::Validation => "V",
            Self::Network => "N",
            Self::Configuration => "C",
            Self::Upstream => "U",
            Self::Internal => "X",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

// =============================================================================
// Exit Codes
// =============================================================================

/// Process exit codes for the `wscope` binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// Unexpected failure, or at least one balance fetch failed
    GeneralError = 1,
    /// Saved wallet id not found
    NotFound = 2,
    /// Invalid input, unknown network, bad config
    ParseError = 3,
    /// Timeout
    Timeout = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as Self
    }
}

/// Main error type for walletscope operations.
#[derive(Error, Debug)]
pub enum WalletError {
    // ==========================================================================
    // Validation errors (Category: Validation)
    // ==========================================================================
    /// Address does not match the network's format.
    #[error("invalid address format for {network}: {address}")]
    InvalidAddress { address: String, network: String },

    /// Network tag is not in the registry.
    #[error("unknown network: {0}")]
    UnknownNetwork(String),

    /// A user-supplied field is missing or malformed.
    #[error("invalid {field}: {message}")]
    InvalidInput { field: String, message: String },

    /// Saved wallet id does not exist.
    #[error("wallet not found: {0}")]
    WalletNotFound(String),

    // ==========================================================================
    // Network errors (Category: Network)
    // ==========================================================================
    /// Request timed out after the configured duration.
    #[error("request timeout after {0}s")]
    Timeout(u64),

    /// Per-network timeout raised by the batch pipeline.
    #[error("balance check for {network} timed out after {seconds}s")]
    TimeoutWithNetwork { network: String, seconds: u64 },

    /// Transport-level failure.
    #[error("network error: {0}")]
    Network(String),

    // ==========================================================================
    // Configuration errors (Category: Configuration)
    // ==========================================================================
    /// Error parsing configuration file.
    #[error("config parse error at {path}: {message}")]
    ConfigParse { path: String, message: String },

    /// Invalid value in configuration.
    #[error("invalid config value for '{key}': {message}")]
    ConfigInvalid {
        key: String,
        value: String,
        message: String,
    },

    /// Generic configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    // ==========================================================================
    // Upstream errors (Category: Upstream)
    // ==========================================================================
    /// Upstream answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}")]
    UpstreamStatus { url: String, status: u16 },

    /// JSON-RPC node answered with an error object.
    #[error("RPC error {code} from {network}: {message}")]
    Rpc {
        network: String,
        code: i64,
        message: String,
    },

    /// Failed to parse an upstream response.
    #[error("failed to parse response: {0}")]
    ParseResponse(String),

    /// Price source has no USD quote for the coin id.
    #[error("no USD price for {0}")]
    MissingPrice(String),

    /// Generic fetch failure.
    #[error("fetch failed for {network}: {reason}")]
    FetchFailed { network: String, reason: String },

    /// Some wallets in a batch failed.
    #[error("partial failure: {failed} wallet(s) failed")]
    PartialFailure { failed: usize },

    // ==========================================================================
    // Internal errors (Category: Internal)
    // ==========================================================================
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for other errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WalletError {
    /// Map error to process exit code.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::WalletNotFound(_) => ExitCode::NotFound,

            Self::InvalidAddress { .. }
            | Self::UnknownNetwork(_)
            | Self::InvalidInput { .. }
            | Self::ConfigParse { .. }
            | Self::ConfigInvalid { .. }
            | Self::Config(_) => ExitCode::ParseError,

            Self::Timeout(_) | Self::TimeoutWithNetwork { .. } => ExitCode::Timeout,

            Self::Network(_)
            | Self::UpstreamStatus { .. }
            | Self::Rpc { .. }
            | Self::ParseResponse(_)
            | Self::MissingPrice(_)
            | Self::FetchFailed { .. }
            | Self::PartialFailure { .. }
            | Self::Io(_)
            | Self::Json(_)
            | Self::Other(_) => ExitCode::GeneralError,
        }
    }

    /// Returns the error category for classification and routing.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidAddress { .. }
            | Self::UnknownNetwork(_)
            | Self::InvalidInput { .. }
            | Self::WalletNotFound(_) => ErrorCategory::Validation,

            Self::Timeout(_) | Self::TimeoutWithNetwork { .. } | Self::Network(_) => {
                ErrorCategory::Network
            }

            Self::ConfigParse { .. } | Self::ConfigInvalid { .. } | Self::Config(_) => {
                ErrorCategory::Configuration
            }

            Self::UpstreamStatus { .. }
            | Self::Rpc { .. }
            | Self::ParseResponse(_)
            | Self::MissingPrice(_)
            | Self::FetchFailed { .. }
            | Self::PartialFailure { .. } => ErrorCategory::Upstream,

            Self::Io(_) | Self::Json(_) | Self::Other(_) => ErrorCategory::Internal,
        }
    }

    /// Returns a stable error code for programmatic handling.
    ///
    /// Format: `WSC-{category}{number}`.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAddress { .. } => "WSC-V001",
            Self::UnknownNetwork(_) => "WSC-V002",
            Self::InvalidInput { .. } => "WSC-V003",
            Self::WalletNotFound(_) => "WSC-V004",

            Self::Timeout(_) => "WSC-N001",
            Self::TimeoutWithNetwork { .. } => "WSC-N002",
            Self::Network(_) => "WSC-N099",

            Self::ConfigParse { .. } => "WSC-C001",
            Self::ConfigInvalid { .. } => "WSC-C002",
            Self::Config(_) => "WSC-C003",

            Self::UpstreamStatus { .. } => "WSC-U001",
            Self::Rpc { .. } => "WSC-U002",
            Self::ParseResponse(_) => "WSC-U003",
            Self::MissingPrice(_) => "WSC-U004",
            Self::FetchFailed { .. } => "WSC-U010",
            Self::PartialFailure { .. } => "WSC-U030",

            Self::Io(_) => "WSC-X001",
            Self::Json(_) => "WSC-X002",
            Self::Other(_) => "WSC-X099",
        }
    }

    /// Returns whether the error is potentially recoverable by retrying.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::TimeoutWithNetwork { .. } | Self::Network(_) => true,
            Self::UpstreamStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Returns the network tag if this error is network-specific.
    #[must_use]
    pub fn network(&self) -> Option<&str> {
        match self {
            Self::InvalidAddress { network, .. }
            | Self::TimeoutWithNetwork { network, .. }
            | Self::Rpc { network, .. }
            | Self::FetchFailed { network, .. } => Some(network),
            Self::UnknownNetwork(n) => Some(n),
            _ => None,
        }
    }
}

/// Result type alias for walletscope operations.
pub type Result<T> = std::result::Result<T, WalletError>;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_category_code_prefix() {
        assert_eq!(ErrorCategory::Validation.code_prefix(), "V");
        assert_eq!(ErrorCategory::Network.code_prefix(), "N");
        assert_eq!(ErrorCategory::Configuration.code_prefix(), "C");
        assert_eq!(ErrorCategory::Upstream.code_prefix(), "U");
        assert_eq!(ErrorCategory::Internal.code_prefix(), "X");
    }

    #[test]
    fn error_codes_match_category_prefix() {
        let errors: Vec<WalletError> = vec![
            WalletError::UnknownNetwork("dogecoin".to_string()),
            WalletError::Timeout(10),
            WalletError::Config("bad".to_string()),
            WalletError::ParseResponse("eof".to_string()),
            WalletError::Other(anyhow::anyhow!("boom")),
        ];

        for err in errors {
            let code = err.error_code();
            let expected = format!("WSC-{}", err.category().code_prefix());
            assert!(
                code.starts_with(&expected),
                "Error code {code} should start with {expected}"
            );
        }
    }

    #[test]
    fn error_codes_are_unique() {
        use std::collections::HashSet;

        let codes: Vec<&str> = vec![
            WalletError::InvalidAddress { address: String::new(), network: String::new() }
                .error_code(),
            WalletError::UnknownNetwork(String::new()).error_code(),
            WalletError::InvalidInput { field: String::new(), message: String::new() }
                .error_code(),
            WalletError::WalletNotFound(String::new()).error_code(),
            WalletError::Timeout(0).error_code(),
            WalletError::TimeoutWithNetwork { network: String::new(), seconds: 0 }.error_code(),
            WalletError::Network(String::new()).error_code(),
            WalletError::ConfigParse { path: String::new(), message: String::new() }.error_code(),
            WalletError::Config(String::new()).error_code(),
            WalletError::UpstreamStatus { url: String::new(), status: 500 }.error_code(),
            WalletError::Rpc { network: String::new(), code: 0, message: String::new() }
                .error_code(),
            WalletError::ParseResponse(String::new()).error_code(),
            WalletError::MissingPrice(String::new()).error_code(),
            WalletError::FetchFailed { network: String::new(), reason: String::new() }
                .error_code(),
        ];

        let unique: HashSet<_> = codes.iter().collect();
        assert_eq!(codes.len(), unique.len(), "Error codes should be unique");
    }

    #[test]
    fn retryable_errors() {
        assert!(WalletError::Timeout(10).is_retryable());
        assert!(WalletError::Network("reset".to_string()).is_retryable());
        assert!(
            WalletError::UpstreamStatus { url: "u".to_string(), status: 503 }.is_retryable()
        );
        assert!(
            WalletError::UpstreamStatus { url: "u".to_string(), status: 429 }.is_retryable()
        );
    }

    #[test]
    fn non_retryable_errors() {
        assert!(!WalletError::UnknownNetwork("x".to_string()).is_retryable());
        assert!(
            !WalletError::UpstreamStatus { url: "u".to_string(), status: 404 }.is_retryable()
        );
        assert!(!WalletError::ParseResponse("x".to_string()).is_retryable());
    }

    #[test]
    fn network_extraction() {
        let err = WalletError::FetchFailed {
            network: "polygon".to_string(),
            reason: "test".to_string(),
        };
        assert_eq!(err.network(), Some("polygon"));
        assert_eq!(WalletError::Timeout(3).network(), None);
    }

    #[test]
    fn exit_codes_are_correct() {
        assert_eq!(
            WalletError::UnknownNetwork("x".to_string()).exit_code(),
            ExitCode::ParseError
        );
        assert_eq!(
            WalletError::WalletNotFound("id".to_string()).exit_code(),
            ExitCode::NotFound
        );
        assert_eq!(WalletError::Timeout(30).exit_code(), ExitCode::Timeout);
        assert_eq!(
            WalletError::PartialFailure { failed: 1 }.exit_code(),
            ExitCode::GeneralError
        );
        assert_eq!(i32::from(ExitCode::Timeout), 4);
    }
}
