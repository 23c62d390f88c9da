//! Tier eligibility evaluation for the referral program
//!
//! A tier is unlocked by simultaneously meeting a wallet-balance threshold
//! and a downline-size threshold. The table of tiers is static, ordered
//! ascending by level, and its first entry carries zero thresholds so that
//! every account qualifies for at least the base tier.
//!
//! The evaluator scans the table in ascending order and keeps the last tier
//! whose thresholds are both satisfied (last-match-wins). Thresholds are
//! inclusive. The function is pure and safe to call repeatedly with the
//! same inputs.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::error::{AppError, AppResult};

/// A single rank in the referral program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    /// Rank position, starting at 1 and strictly increasing
    pub level: u32,
    /// Display label (Starter, Bronze, Silver, ...)
    pub title: String,
    /// Minimum wallet balance required, inclusive
    pub min_wallet: Decimal,
    /// Minimum total downline member count required, inclusive
    pub min_downline_count: u32,
}

impl Tier {
    /// Check whether the given metrics satisfy this tier's thresholds
    pub fn is_satisfied_by(&self, wallet_balance: Decimal, downline_count: u32) -> bool {
        wallet_balance >= self.min_wallet && downline_count >= self.min_downline_count
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{} {}", self.level, self.title)
    }
}

/// The built-in tier table of the rewards program
///
/// Used when the configuration file does not override the table.
pub static DEFAULT_TIERS: Lazy<Vec<Tier>> = Lazy::new(|| {
    vec![
        Tier {
            level: 1,
            title: "Starter".to_string(),
            min_wallet: Decimal::ZERO,
            min_downline_count: 0,
        },
        Tier {
            level: 2,
            title: "Bronze".to_string(),
            min_wallet: dec!(500),
            min_downline_count: 6,
        },
        Tier {
            level: 3,
            title: "Silver".to_string(),
            min_wallet: dec!(1000),
            min_downline_count: 20,
        },
        Tier {
            level: 4,
            title: "Gold".to_string(),
            min_wallet: dec!(2500),
            min_downline_count: 50,
        },
        Tier {
            level: 5,
            title: "Platinum".to_string(),
            min_wallet: dec!(5000),
            min_downline_count: 120,
        },
        Tier {
            level: 6,
            title: "Elite".to_string(),
            min_wallet: dec!(10000),
            min_downline_count: 300,
        },
    ]
});

/// Validated, ascending tier table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Tier>", into = "Vec<Tier>")]
pub struct TierTable(Vec<Tier>);

impl TierTable {
    /// Build a table from an ordered list of tiers, enforcing the table
    /// invariants: non-empty, strictly increasing levels, non-decreasing
    /// thresholds, and a zero-threshold first tier.
    pub fn new(tiers: Vec<Tier>) -> AppResult<Self> {
        let first = tiers
            .first()
            .ok_or_else(|| AppError::config("Tier table must not be empty"))?;

        if first.min_wallet != Decimal::ZERO || first.min_downline_count != 0 {
            return Err(AppError::config(
                "First tier must have zero wallet and downline thresholds",
            ));
        }

        for window in tiers.windows(2) {
            let (prev, next) = (&window[0], &window[1]);
            if next.level <= prev.level {
                return Err(AppError::config(format!(
                    "Tier levels must be strictly increasing: {} then {}",
                    prev.level, next.level
                )));
            }
            if next.min_wallet < prev.min_wallet || next.min_downline_count < prev.min_downline_count
            {
                return Err(AppError::config(format!(
                    "Tier thresholds must be non-decreasing between L{} and L{}",
                    prev.level, next.level
                )));
            }
        }

        Ok(Self(tiers))
    }

    /// The built-in table of the rewards program
    pub fn default_table() -> Self {
        Self(DEFAULT_TIERS.clone())
    }

    /// Access the underlying tiers in ascending order
    pub fn tiers(&self) -> &[Tier] {
        &self.0
    }

    /// Number of tiers in the table
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the table holds no tiers (never constructible via `new`)
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Evaluate the highest tier whose wallet and downline thresholds are
    /// both satisfied
    ///
    /// Scans ascending and keeps the last satisfying tier; the zero-threshold
    /// first tier guarantees a match. Negative wallet balances are rejected,
    /// as the backend ledger never reports them.
    pub fn evaluate(&self, wallet_balance: Decimal, downline_count: u32) -> AppResult<&Tier> {
        if wallet_balance < Decimal::ZERO {
            return Err(AppError::validation_field(
                format!("Wallet balance must be non-negative, got {wallet_balance}"),
                "wallet_balance".to_string(),
            ));
        }

        let mut matched = &self.0[0];
        for tier in &self.0 {
            if tier.is_satisfied_by(wallet_balance, downline_count) {
                matched = tier;
            }
        }
        Ok(matched)
    }

    /// Tier immediately above the given one, if any
    pub fn next_after(&self, tier: &Tier) -> Option<&Tier> {
        self.0.iter().find(|t| t.level > tier.level)
    }

    /// Evaluate the current tier together with progress toward the next one
    pub fn standing(&self, wallet_balance: Decimal, downline_count: u32) -> AppResult<TierStanding> {
        let current = self.evaluate(wallet_balance, downline_count)?.clone();
        let next = self.next_after(&current).cloned();

        let (wallet_progress, downline_progress) = match &next {
            Some(next_tier) => (
                progress(wallet_balance, next_tier.min_wallet),
                progress(
                    Decimal::from(downline_count),
                    Decimal::from(next_tier.min_downline_count),
                ),
            ),
            // Top tier reached, both meters pegged.
            None => (dec!(100), dec!(100)),
        };

        Ok(TierStanding {
            current,
            next,
            wallet_progress,
            downline_progress,
        })
    }
}

impl TryFrom<Vec<Tier>> for TierTable {
    type Error = AppError;

    fn try_from(tiers: Vec<Tier>) -> Result<Self, Self::Error> {
        Self::new(tiers)
    }
}

impl From<TierTable> for Vec<Tier> {
    fn from(table: TierTable) -> Self {
        table.0
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self::default_table()
    }
}

/// Evaluator output enriched for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierStanding {
    /// Highest tier currently unlocked
    pub current: Tier,
    /// Next tier to work toward, absent at the top of the table
    pub next: Option<Tier>,
    /// Percentage progress of the wallet balance toward the next tier
    pub wallet_progress: Decimal,
    /// Percentage progress of the downline count toward the next tier
    pub downline_progress: Decimal,
}

/// Percentage progress of a metric toward a threshold
///
/// `min(current / threshold * 100, 100)`, clamped to 0 for a zero threshold
/// so that no undefined ratio can reach the caller. Values are exact
/// decimals; rounding is left to the presentation layer.
pub fn progress(current: Decimal, threshold: Decimal) -> Decimal {
    if threshold.is_zero() {
        return Decimal::ZERO;
    }
    let pct = current / threshold * dec!(100);
    pct.min(dec!(100))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn three_tier_table() -> TierTable {
        TierTable::new(vec![
            Tier {
                level: 1,
                title: "L1".to_string(),
                min_wallet: Decimal::ZERO,
                min_downline_count: 0,
            },
            Tier {
                level: 2,
                title: "L2".to_string(),
                min_wallet: dec!(500),
                min_downline_count: 6,
            },
            Tier {
                level: 3,
                title: "L3".to_string(),
                min_wallet: dec!(1000),
                min_downline_count: 20,
            },
        ])
        .unwrap()
    }

    #[test]
    fn zero_inputs_match_first_tier() {
        let table = three_tier_table();
        let tier = table.evaluate(Decimal::ZERO, 0).unwrap();
        assert_eq!(tier.level, 1);
    }

    #[test]
    fn inclusive_boundary_unlocks_tier() {
        let table = three_tier_table();
        assert_eq!(table.evaluate(dec!(500), 6).unwrap().level, 2);
        assert_eq!(table.evaluate(dec!(1000), 20).unwrap().level, 3);
    }

    #[test]
    fn both_thresholds_must_hold() {
        let table = three_tier_table();
        // Wallet short of L3
        assert_eq!(table.evaluate(dec!(999), 6).unwrap().level, 2);
        // Downline short of L3
        assert_eq!(table.evaluate(dec!(1000), 5).unwrap().level, 2);
    }

    #[test]
    fn negative_wallet_is_rejected() {
        let table = three_tier_table();
        let err = table.evaluate(dec!(-1), 0).unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[test]
    fn table_invariants_are_enforced() {
        assert!(TierTable::new(vec![]).is_err());

        // Non-zero first tier
        assert!(TierTable::new(vec![Tier {
            level: 1,
            title: "L1".to_string(),
            min_wallet: dec!(10),
            min_downline_count: 0,
        }])
        .is_err());

        // Descending thresholds
        assert!(TierTable::new(vec![
            Tier {
                level: 1,
                title: "L1".to_string(),
                min_wallet: Decimal::ZERO,
                min_downline_count: 0,
            },
            Tier {
                level: 2,
                title: "L2".to_string(),
                min_wallet: dec!(500),
                min_downline_count: 6,
            },
            Tier {
                level: 3,
                title: "L3".to_string(),
                min_wallet: dec!(400),
                min_downline_count: 20,
            },
        ])
        .is_err());

        // Duplicate levels
        assert!(TierTable::new(vec![
            Tier {
                level: 1,
                title: "L1".to_string(),
                min_wallet: Decimal::ZERO,
                min_downline_count: 0,
            },
            Tier {
                level: 1,
                title: "again".to_string(),
                min_wallet: Decimal::ZERO,
                min_downline_count: 0,
            },
        ])
        .is_err());
    }

    #[test]
    fn standing_reports_progress_toward_next_tier() {
        let table = three_tier_table();
        let standing = table.standing(dec!(250), 3).unwrap();

        assert_eq!(standing.current.level, 1);
        assert_eq!(standing.next.as_ref().unwrap().level, 2);
        assert_eq!(standing.wallet_progress, dec!(50));
        assert_eq!(standing.downline_progress, dec!(50));
    }

    #[test]
    fn standing_at_top_tier_is_pegged() {
        let table = three_tier_table();
        let standing = table.standing(dec!(5000), 100).unwrap();

        assert_eq!(standing.current.level, 3);
        assert!(standing.next.is_none());
        assert_eq!(standing.wallet_progress, dec!(100));
        assert_eq!(standing.downline_progress, dec!(100));
    }

    #[test]
    fn progress_examples() {
        assert_eq!(progress(dec!(250), dec!(500)), dec!(50));
        assert_eq!(progress(dec!(600), dec!(500)), dec!(100));
        assert_eq!(progress(dec!(250), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn default_table_is_valid() {
        let table = TierTable::default();
        assert_eq!(table.len(), 6);
        assert_eq!(table.tiers()[0].min_wallet, Decimal::ZERO);
        // Re-validating the built-in table must always succeed.
        assert!(TierTable::new(table.tiers().to_vec()).is_ok());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn wallet_strategy() -> impl Strategy<Value = Decimal> {
            (0u64..2_000_000).prop_map(|cents| Decimal::new(cents as i64, 2))
        }

        proptest! {
            #[test]
            fn first_tier_is_the_floor(wallet in wallet_strategy(), downline in 0u32..10_000) {
                let table = TierTable::default();
                let tier = table.evaluate(wallet, downline).unwrap();
                prop_assert!(tier.level >= 1);
            }

            #[test]
            fn evaluation_is_monotonic(
                w1 in wallet_strategy(),
                w2 in wallet_strategy(),
                d1 in 0u32..10_000,
                d2 in 0u32..10_000,
            ) {
                let table = TierTable::default();
                let (lo_w, hi_w) = if w1 <= w2 { (w1, w2) } else { (w2, w1) };
                let (lo_d, hi_d) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };

                let lo = table.evaluate(lo_w, lo_d).unwrap();
                let hi = table.evaluate(hi_w, hi_d).unwrap();
                prop_assert!(lo.level <= hi.level);
            }

            #[test]
            fn matched_tier_thresholds_are_satisfied(
                wallet in wallet_strategy(),
                downline in 0u32..10_000,
            ) {
                let table = TierTable::default();
                let tier = table.evaluate(wallet, downline).unwrap();
                prop_assert!(tier.is_satisfied_by(wallet, downline));
            }

            #[test]
            fn progress_is_always_clamped(
                current in wallet_strategy(),
                threshold in wallet_strategy(),
            ) {
                let pct = progress(current, threshold);
                prop_assert!(pct >= Decimal::ZERO);
                prop_assert!(pct <= dec!(100));
            }
        }
    }
}
