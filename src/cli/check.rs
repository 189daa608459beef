//! Check command implementation.

use crate::cli::OutputOptions;
use crate::cli::args::CheckArgs;
use crate::core::models::WalletBalance;
use crate::core::network::NetworkTag;
use crate::core::service::WalletService;
use crate::core::validator;
use crate::error::{Result, WalletError};
use crate::render;

/// Execute the check command.
///
/// The result is always printed; a failed check is then returned as an error
/// so the process exits non-zero.
pub async fn execute(service: &WalletService, args: &CheckArgs, output: OutputOptions) -> Result<()> {
    tracing::debug!(address = %args.address, network = %args.network, "Checking balance");

    let result = service.check_balance(&args.address, &args.network).await;
    let rendered = render::render_check(&result, output.format, output.pretty, output.no_color)?;
    print!("{rendered}");

    failure_for(&result).map_or(Ok(()), Err)
}

/// Classify a failed check for exit code mapping.
fn failure_for(result: &WalletBalance) -> Option<WalletError> {
    if result.is_valid {
        return None;
    }
    let network = match NetworkTag::from_tag(&result.network) {
        Ok(network) => network,
        Err(e) => return Some(e),
    };
    if !validator::is_valid_for(&result.address, network) {
        return Some(WalletError::InvalidAddress {
            address: result.address.clone(),
            network: network.tag().to_string(),
        });
    }
    Some(WalletError::FetchFailed {
        network: network.tag().to_string(),
        reason: result.error.clone().unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregator::{FETCH_FAILED_MESSAGE, INVALID_ADDRESS_MESSAGE};
    use crate::error::ExitCode;
    use crate::test_utils::EVM_ADDRESS;

    #[test]
    fn success_has_no_failure() {
        let result = WalletBalance::valid(
            EVM_ADDRESS,
            NetworkTag::Ethereum,
            crate::core::fetcher::NativeBalance {
                balance: "1".into(),
                usd_value: "3000.00".into(),
                logo_url: String::new(),
            },
        );
        assert!(failure_for(&result).is_none());
    }

    #[test]
    fn failures_map_to_exit_codes() {
        let unknown = WalletBalance::invalid(EVM_ADDRESS, "dogecoin", "", INVALID_ADDRESS_MESSAGE);
        assert_eq!(failure_for(&unknown).unwrap().exit_code(), ExitCode::ParseError);

        let bad = WalletBalance::invalid("0x123", "ethereum", "ETH", INVALID_ADDRESS_MESSAGE);
        assert!(matches!(
            failure_for(&bad),
            Some(WalletError::InvalidAddress { .. })
        ));

        let fetch = WalletBalance::invalid(EVM_ADDRESS, "ethereum", "ETH", FETCH_FAILED_MESSAGE);
        let error = failure_for(&fetch).unwrap();
        assert_eq!(error.exit_code(), ExitCode::GeneralError);
        assert!(error.to_string().contains(FETCH_FAILED_MESSAGE));
    }
}
