//! Portfolio totals and per-network allocation.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::models::{BatchOutcome, WalletBalance};

/// Concentration of the largest allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Above 70% is high, above 50% medium.
    #[must_use]
    pub fn from_top_allocation(percentage: f64) -> Self {
        if percentage > 70.0 {
            Self::High
        } else if percentage > 50.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// USD value held on one network.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub network: String,
    /// Two decimal places.
    pub usd_value: String,
    /// Share of the total, one decimal place.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_usd: String,
    /// Largest first.
    pub allocations: Vec<Allocation>,
    pub valid_count: usize,
    pub failed_count: usize,
    pub top_allocation: f64,
    pub risk: RiskLevel,
}

impl PortfolioSummary {
    /// Summarize a set of check results. Failed results only count towards
    /// `failed_count`.
    #[must_use]
    pub fn from_results<'a>(results: impl IntoIterator<Item = &'a WalletBalance>) -> Self {
        let mut by_network: BTreeMap<&str, Decimal> = BTreeMap::new();
        let mut valid_count = 0;
        let mut failed_count = 0;

        for result in results {
            if !result.is_valid {
                failed_count += 1;
                continue;
            }
            valid_count += 1;
            let value = Decimal::from_str(&result.usd_value).unwrap_or(Decimal::ZERO);
            *by_network.entry(result.network.as_str()).or_default() += value;
        }

        let total: Decimal = by_network.values().copied().sum();

        let mut allocations: Vec<Allocation> = by_network
            .into_iter()
            .map(|(network, value)| Allocation {
                network: network.to_string(),
                usd_value: format!("{:.2}", round_cents(value)),
                percentage: share(value, total),
            })
            .collect();
        allocations.sort_by(|a, b| {
            b.percentage
                .total_cmp(&a.percentage)
                .then_with(|| a.network.cmp(&b.network))
        });

        let top_allocation = allocations.first().map_or(0.0, |a| a.percentage);

        Self {
            total_usd: format!("{:.2}", round_cents(total)),
            allocations,
            valid_count,
            failed_count,
            top_allocation,
            risk: RiskLevel::from_top_allocation(top_allocation),
        }
    }
}

/// Batch refresh outcomes with their summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioReport {
    pub outcomes: Vec<BatchOutcome>,
    pub summary: PortfolioSummary,
}

impl PortfolioReport {
    #[must_use]
    pub fn new(outcomes: Vec<BatchOutcome>) -> Self {
        let summary = PortfolioSummary::from_results(outcomes.iter().map(|o| &o.result));
        Self { outcomes, summary }
    }
}

fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn share(value: Decimal, total: Decimal) -> f64 {
    if total.is_zero() {
        return 0.0;
    }
    (value * Decimal::ONE_HUNDRED / total)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fetcher::NativeBalance;
    use crate::core::network::NetworkTag;

    fn ok(network: NetworkTag, usd: &str) -> WalletBalance {
        WalletBalance::valid(
            "addr",
            network,
            NativeBalance {
                balance: "1".into(),
                usd_value: usd.into(),
                logo_url: String::new(),
            },
        )
    }

    #[test]
    fn totals_and_sorted_allocations() {
        let results = vec![
            ok(NetworkTag::Ethereum, "600.00"),
            ok(NetworkTag::Bitcoin, "300.00"),
            ok(NetworkTag::Ethereum, "100.00"),
            WalletBalance::invalid("x", "solana", "SOL", "boom"),
        ];
        let summary = PortfolioSummary::from_results(&results);

        assert_eq!(summary.total_usd, "1000.00");
        assert_eq!(summary.valid_count, 3);
        assert_eq!(summary.failed_count, 1);
        assert_eq!(summary.allocations.len(), 2);
        assert_eq!(summary.allocations[0].network, "ethereum");
        assert_eq!(summary.allocations[0].usd_value, "700.00");
        assert!((summary.allocations[0].percentage - 70.0).abs() < f64::EPSILON);
        assert!((summary.allocations[1].percentage - 30.0).abs() < f64::EPSILON);
        assert_eq!(summary.risk, RiskLevel::Medium);
    }

    #[test]
    fn percentages_round_to_one_place() {
        let results = vec![
            ok(NetworkTag::Ethereum, "1.00"),
            ok(NetworkTag::Bitcoin, "1.00"),
            ok(NetworkTag::Solana, "1.00"),
        ];
        let summary = PortfolioSummary::from_results(&results);
        assert!(summary.allocations.iter().all(|a| (a.percentage - 33.3).abs() < 1e-9));
        assert_eq!(summary.risk, RiskLevel::Low);
    }

    #[test]
    fn empty_portfolio_is_zero() {
        let summary = PortfolioSummary::from_results(&Vec::<WalletBalance>::new());
        assert_eq!(summary.total_usd, "0.00");
        assert!(summary.allocations.is_empty());
        assert!(summary.top_allocation.abs() < f64::EPSILON);
    }

    #[test]
    fn risk_thresholds() {
        assert_eq!(RiskLevel::from_top_allocation(70.1), RiskLevel::High);
        assert_eq!(RiskLevel::from_top_allocation(70.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_top_allocation(50.0), RiskLevel::Low);
    }
}
