//! Network tags and registry.
//!
//! Defines every supported chain and the static metadata the fetchers and
//! renderers share.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, WalletError};

// =============================================================================
// Network Tag
// =============================================================================

/// Supported blockchain networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkTag {
    Ethereum,
    Bitcoin,
    Polygon,
    Bsc,
    Arbitrum,
    Avalanche,
    Optimism,
    Fantom,
    Harmony,
    Moonriver,
    Cronos,
    Solana,
}

impl NetworkTag {
    /// All networks in display order.
    pub const ALL: &'static [Self] = &[
        Self::Ethereum,
        Self::Bitcoin,
        Self::Polygon,
        Self::Bsc,
        Self::Arbitrum,
        Self::Avalanche,
        Self::Optimism,
        Self::Fantom,
        Self::Harmony,
        Self::Moonriver,
        Self::Cronos,
        Self::Solana,
    ];

    /// Wire / CLI name for this network.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Ethereum => "ethereum",
            Self::Bitcoin => "bitcoin",
            Self::Polygon => "polygon",
            Self::Bsc => "bsc",
            Self::Arbitrum => "arbitrum",
            Self::Avalanche => "avalanche",
            Self::Optimism => "optimism",
            Self::Fantom => "fantom",
            Self::Harmony => "harmony",
            Self::Moonriver => "moonriver",
            Self::Cronos => "cronos",
            Self::Solana => "solana",
        }
    }

    /// Display name for human output.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Ethereum => "Ethereum",
            Self::Bitcoin => "Bitcoin",
            Self::Polygon => "Polygon",
            Self::Bsc => "BNB Smart Chain",
            Self::Arbitrum => "Arbitrum One",
            Self::Avalanche => "Avalanche C-Chain",
            Self::Optimism => "Optimism",
            Self::Fantom => "Fantom",
            Self::Harmony => "Harmony",
            Self::Moonriver => "Moonriver",
            Self::Cronos => "Cronos",
            Self::Solana => "Solana",
        }
    }

    /// Which adapter family serves this network.
    #[must_use]
    pub const fn family(self) -> ChainFamily {
        match self {
            Self::Bitcoin => ChainFamily::Bitcoin,
            Self::Solana => ChainFamily::Solana,
            Self::Ethereum
            | Self::Polygon
            | Self::Bsc
            | Self::Arbitrum
            | Self::Avalanche
            | Self::Optimism
            | Self::Fantom
            | Self::Harmony
            | Self::Moonriver
            | Self::Cronos => ChainFamily::Evm,
        }
    }

    /// Native coin ticker.
    #[must_use]
    pub const fn native_symbol(self) -> &'static str {
        match self {
            Self::Ethereum | Self::Arbitrum | Self::Optimism => "ETH",
            Self::Bitcoin => "BTC",
            Self::Polygon => "MATIC",
            Self::Bsc => "BNB",
            Self::Avalanche => "AVAX",
            Self::Fantom => "FTM",
            Self::Harmony => "ONE",
            Self::Moonriver => "MOVR",
            Self::Cronos => "CRO",
            Self::Solana => "SOL",
        }
    }

    /// CoinGecko coin id used for price and logo lookups.
    #[must_use]
    pub const fn price_lookup_id(self) -> &'static str {
        match self {
            Self::Ethereum | Self::Arbitrum | Self::Optimism => "ethereum",
            Self::Bitcoin => "bitcoin",
            Self::Polygon => "matic-network",
            Self::Bsc => "binancecoin",
            Self::Avalanche => "avalanche-2",
            Self::Fantom => "fantom",
            Self::Harmony => "harmony",
            Self::Moonriver => "moonriver",
            Self::Cronos => "crypto-com-chain",
            Self::Solana => "solana",
        }
    }

    /// Default public endpoint for balance lookups.
    ///
    /// JSON-RPC URL for EVM and Solana, explorer API base for Bitcoin.
    #[must_use]
    pub const fn default_endpoint(self) -> &'static str {
        match self {
            Self::Ethereum => "https://ethereum-rpc.publicnode.com",
            Self::Bitcoin => "https://blockstream.info/api",
            Self::Polygon => "https://polygon-rpc.com",
            Self::Bsc => "https://bsc-dataseed.binance.org",
            Self::Arbitrum => "https://arb1.arbitrum.io/rpc",
            Self::Avalanche => "https://api.avax.network/ext/bc/C/rpc",
            Self::Optimism => "https://mainnet.optimism.io",
            Self::Fantom => "https://rpcapi.fantom.network",
            Self::Harmony => "https://api.harmony.one",
            Self::Moonriver => "https://rpc.api.moonriver.moonbeam.network",
            Self::Cronos => "https://evm.cronos.org",
            Self::Solana => "https://api.mainnet-beta.solana.com",
        }
    }

    /// Parse from a network tag string (case-insensitive).
    pub fn from_tag(name: &str) -> Result<Self> {
        let lower = name.trim().to_lowercase();
        Self::ALL
            .iter()
            .find(|n| n.tag() == lower)
            .copied()
            .ok_or_else(|| WalletError::UnknownNetwork(name.to_string()))
    }
}

impl fmt::Display for NetworkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for NetworkTag {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_tag(s)
    }
}

// =============================================================================
// Chain Family
// =============================================================================

/// Balance API shape shared by a group of networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainFamily {
    /// `eth_getBalance` over JSON-RPC, wei.
    Evm,
    /// Block explorer funded/spent totals, satoshi.
    Bitcoin,
    /// `getBalance` over JSON-RPC, lamports.
    Solana,
}

impl ChainFamily {
    /// Decimal exponent between the smallest unit and the display unit.
    #[must_use]
    pub const fn decimals(self) -> u32 {
        match self {
            Self::Evm => 18,
            Self::Bitcoin => 8,
            Self::Solana => 9,
        }
    }
}

// =============================================================================
// Network Descriptor
// =============================================================================

/// Branding information for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkBranding {
    /// Icon class (font-awesome style) for web front-ends.
    pub icon: &'static str,
    /// Primary color (hex).
    pub color: &'static str,
}

/// Complete network descriptor.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDescriptor {
    pub id: NetworkTag,
    pub display_name: &'static str,
    pub native_symbol: &'static str,
    pub price_lookup_id: &'static str,
    pub decimals: u32,
    pub default_endpoint: &'static str,
    pub branding: NetworkBranding,
}

// =============================================================================
// Network Registry
// =============================================================================

/// Registry of all network descriptors.
#[derive(Debug)]
pub struct NetworkRegistry {
    descriptors: HashMap<NetworkTag, NetworkDescriptor>,
}

impl NetworkRegistry {
    /// Create the registry with all networks.
    #[must_use]
    pub fn new() -> Self {
        let descriptors = NetworkTag::ALL
            .iter()
            .map(|&network| {
                (
                    network,
                    NetworkDescriptor {
                        id: network,
                        display_name: network.display_name(),
                        native_symbol: network.native_symbol(),
                        price_lookup_id: network.price_lookup_id(),
                        decimals: network.family().decimals(),
                        default_endpoint: network.default_endpoint(),
                        branding: branding_for(network),
                    },
                )
            })
            .collect();

        Self { descriptors }
    }

    /// Get descriptor for a network.
    #[must_use]
    pub fn get(&self, network: NetworkTag) -> Option<&NetworkDescriptor> {
        self.descriptors.get(&network)
    }

    /// Look up a descriptor by its tag string.
    #[must_use]
    pub fn lookup(&self, tag: &str) -> Option<&NetworkDescriptor> {
        NetworkTag::from_tag(tag).ok().and_then(|n| self.get(n))
    }

    /// Iterate descriptors in display order.
    pub fn iter(&self) -> impl Iterator<Item = &NetworkDescriptor> {
        NetworkTag::ALL.iter().filter_map(|n| self.descriptors.get(n))
    }
}

impl Default for NetworkRegistry {
    fn default() -> Self {
        Self::new()
    }
}

const fn branding_for(network: NetworkTag) -> NetworkBranding {
    let (icon, color) = match network {
        NetworkTag::Ethereum => ("fab fa-ethereum", "#627EEA"),
        NetworkTag::Bitcoin => ("fab fa-bitcoin", "#F7931A"),
        NetworkTag::Polygon => ("fas fa-gem", "#8247E5"),
        NetworkTag::Bsc => ("fas fa-coins", "#F0B90B"),
        NetworkTag::Arbitrum => ("fas fa-layer-group", "#28A0F0"),
        NetworkTag::Avalanche => ("fas fa-mountain", "#E84142"),
        NetworkTag::Optimism => ("fas fa-circle", "#FF0420"),
        NetworkTag::Fantom => ("fas fa-ghost", "#1969FF"),
        NetworkTag::Harmony => ("fas fa-music", "#00AEE9"),
        NetworkTag::Moonriver => ("fas fa-moon", "#F2B705"),
        NetworkTag::Cronos => ("fas fa-clock", "#002D74"),
        NetworkTag::Solana => ("fas fa-sun", "#9945FF"),
    };
    NetworkBranding { icon, color }
}
