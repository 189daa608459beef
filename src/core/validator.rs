//! Address syntax validation.
//!
//! Pure, side-effect free checks shared by the CLI input path and the
//! balance aggregator. Validity is always relative to a network; there is
//! no global notion of a "valid address".

use std::sync::LazyLock;

use regex::Regex;

use super::network::{ChainFamily, NetworkTag};

static EVM_ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("valid EVM pattern"));

/// Legacy (P2PKH) and P2SH addresses.
static BTC_BASE58: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[13][a-km-zA-HJ-NP-Z1-9]{25,34}$").expect("valid base58 BTC pattern")
});

static BTC_BECH32: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^bc1[a-z0-9]{39,59}$").expect("valid bech32 BTC pattern"));

static SOLANA_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[1-9A-HJ-NP-Za-km-z]{32,44}$").expect("valid Solana pattern")
});

/// Check an address against the format of a network given by its tag.
///
/// Returns `false` for an empty address or a tag that is not in the
/// registry.
#[must_use]
pub fn validate_address(address: &str, network: &str) -> bool {
    NetworkTag::from_tag(network).is_ok_and(|tag| is_valid_for(address, tag))
}

/// Check an address against the format of a known network.
#[must_use]
pub fn is_valid_for(address: &str, network: NetworkTag) -> bool {
    if address.is_empty() {
        return false;
    }
    match network.family() {
        ChainFamily::Evm => EVM_ADDRESS.is_match(address),
        ChainFamily::Bitcoin => BTC_BASE58.is_match(address) || BTC_BECH32.is_match(address),
        ChainFamily::Solana => SOLANA_ADDRESS.is_match(address),
    }
}
