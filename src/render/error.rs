//! Error rendering for walletscope.
//!
//! Human mode prints a one-line header plus a hint; JSON and Markdown modes
//! print a structured object for scripts.

use colored::Colorize;

use crate::cli::args::OutputFormat;
use crate::error::{ErrorCategory, WalletError};

/// Render an error for stderr.
#[must_use]
pub fn render_error(error: &WalletError, format: OutputFormat, pretty: bool, no_color: bool) -> String {
    match format {
        OutputFormat::Json => render_error_json(error, pretty),
        OutputFormat::Md => render_error_json(error, true),
        OutputFormat::Human if no_color => render_simple(error),
        OutputFormat::Human => render_colored(error),
    }
}

/// Render error as structured JSON for machine consumption.
#[must_use]
pub fn render_error_json(error: &WalletError, pretty: bool) -> String {
    let error_json = ErrorJson::from_error(error);
    let rendered = if pretty {
        serde_json::to_string_pretty(&error_json)
    } else {
        serde_json::to_string(&error_json)
    };
    rendered.unwrap_or_else(|_| render_simple(error))
}

fn render_simple(error: &WalletError) -> String {
    let mut lines = vec![format!("Error [{}]: {}", error.error_code(), error)];
    if let Some(hint) = hint(error) {
        lines.push(format!("Hint: {hint}"));
    }
    lines.join("\n")
}

fn render_colored(error: &WalletError) -> String {
    let mut lines = vec![format!(
        "{} {}",
        format!("error[{}]:", error.error_code()).red().bold(),
        error
    )];
    if let Some(hint) = hint(error) {
        lines.push(format!("  {} {hint}", "hint:".cyan()));
    }
    lines.join("\n")
}

fn hint(error: &WalletError) -> Option<&'static str> {
    match error {
        WalletError::UnknownNetwork(_) => Some("run `wscope networks` to list supported tags"),
        WalletError::InvalidAddress { .. } => {
            Some("EVM addresses are 0x + 40 hex chars; Bitcoin accepts 1/3/bc1 forms")
        }
        WalletError::WalletNotFound(_) => Some("run `wscope wallets` to list saved wallet ids"),
        _ => match error.category() {
            ErrorCategory::Configuration => Some("check config.toml or the WSCOPE_* variables"),
            ErrorCategory::Network => Some("retry, or raise --timeout"),
            _ => None,
        },
    }
}

/// JSON representation of an error for machine consumption.
#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorJson {
    error_code: &'static str,
    category: String,
    message: String,
    is_retryable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    network: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<&'static str>,
}

impl ErrorJson {
    fn from_error(error: &WalletError) -> Self {
        Self {
            error_code: error.error_code(),
            category: error.category().to_string(),
            message: error.to_string(),
            is_retryable: error.is_retryable(),
            network: error.network().map(String::from),
            hint: hint(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_render_includes_code_and_hint() {
        let error = WalletError::UnknownNetwork("dogecoin".into());
        let output = render_error(&error, OutputFormat::Human, false, true);
        assert!(output.starts_with("Error [WSC-V002]: unknown network: dogecoin"));
        assert!(output.contains("wscope networks"));
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn json_render_includes_fields() {
        let error = WalletError::TimeoutWithNetwork {
            network: "bitcoin".into(),
            seconds: 5,
        };
        let output = render_error(&error, OutputFormat::Json, false, true);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["errorCode"], "WSC-N002");
        assert_eq!(value["category"], "Network error");
        assert_eq!(value["isRetryable"], true);
        assert_eq!(value["network"], "bitcoin");
        assert!(!output.contains('\n'));
    }

    #[test]
    fn json_render_omits_missing_fields() {
        let error = WalletError::Other(anyhow::anyhow!("boom"));
        let value: serde_json::Value = serde_json::from_str(&render_error_json(&error, false)).unwrap();
        assert!(value.get("network").is_none());
        assert!(value.get("hint").is_none());
        assert_eq!(value["message"], "boom");
    }

    #[test]
    fn md_format_is_pretty_json() {
        let error = WalletError::Config("bad".into());
        let output = render_error(&error, OutputFormat::Md, false, true);
        assert!(output.contains('\n'));
        assert!(serde_json::from_str::<serde_json::Value>(&output).is_ok());
    }
}
