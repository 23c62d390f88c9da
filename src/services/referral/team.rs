//! Downline team snapshot and aggregation
//!
//! The backend returns the downline grouped by referral depth (level 1 is a
//! direct referral, level 6 the deepest tracked indirection). The snapshot
//! keeps that grouping and derives the aggregate count and wallet sums the
//! dashboard and the tier evaluator need.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::types::Username;
use crate::services::api::types::{TeamLevelsDto, TeamMemberDto};
use crate::utils::time::parse_date_flexible;

/// One downline member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    /// Member username
    pub username: Username,
    /// Member email address, when the backend shares it
    pub email: Option<String>,
    /// Member wallet balance
    pub wallet: Decimal,
    /// Member registration date, when parseable
    pub join_date: Option<DateTime<Utc>>,
}

impl From<TeamMemberDto> for TeamMember {
    fn from(dto: TeamMemberDto) -> Self {
        Self {
            username: Username::new_unchecked(dto.username),
            email: dto.email,
            wallet: dto.wallet,
            // Downline rows are informational; a bad date is not worth
            // failing the whole snapshot over.
            join_date: dto.join_date.and_then(|d| parse_date_flexible(&d).ok()),
        }
    }
}

/// Per-depth aggregate used for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSummary {
    /// Referral depth, 1-based
    pub depth: u8,
    /// Member count at this depth
    pub members: u32,
    /// Sum of member wallets at this depth
    pub wallet_total: Decimal,
}

/// Downline snapshot grouped by referral depth
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamSnapshot {
    levels: BTreeMap<u8, Vec<TeamMember>>,
}

impl TeamSnapshot {
    /// Build a snapshot from the wire shape, keeping at most `depth_limit`
    /// levels
    pub fn from_wire(dto: TeamLevelsDto, depth_limit: u8) -> Self {
        let groups = [
            dto.level1, dto.level2, dto.level3, dto.level4, dto.level5, dto.level6,
        ];

        let mut levels = BTreeMap::new();
        for (index, members) in groups.into_iter().enumerate() {
            let depth = (index + 1) as u8;
            if depth > depth_limit {
                break;
            }
            levels.insert(depth, members.into_iter().map(TeamMember::from).collect());
        }

        Self { levels }
    }

    /// Members at the given depth
    pub fn members_at(&self, depth: u8) -> &[TeamMember] {
        self.levels.get(&depth).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total downline member count across all depths
    pub fn total_members(&self) -> u32 {
        self.levels.values().map(|v| v.len() as u32).sum()
    }

    /// Sum of downline wallet balances across all depths
    pub fn total_wallet(&self) -> Decimal {
        self.levels
            .values()
            .flat_map(|v| v.iter())
            .map(|m| m.wallet)
            .sum()
    }

    /// Per-depth aggregates in ascending depth order
    pub fn level_summaries(&self) -> Vec<LevelSummary> {
        self.levels
            .iter()
            .map(|(depth, members)| LevelSummary {
                depth: *depth,
                members: members.len() as u32,
                wallet_total: members.iter().map(|m| m.wallet).sum(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn member(name: &str, wallet: Decimal) -> TeamMemberDto {
        TeamMemberDto {
            username: name.to_string(),
            email: None,
            wallet,
            join_date: None,
        }
    }

    #[test]
    fn test_aggregation_across_sparse_levels() {
        let dto = TeamLevelsDto {
            level1: vec![member("a", dec!(100)), member("b", dec!(50))],
            level3: vec![member("c", dec!(25.50))],
            ..Default::default()
        };

        let snapshot = TeamSnapshot::from_wire(dto, 6);
        assert_eq!(snapshot.total_members(), 3);
        assert_eq!(snapshot.total_wallet(), dec!(175.50));
        assert_eq!(snapshot.members_at(1).len(), 2);
        assert!(snapshot.members_at(2).is_empty());
        assert_eq!(snapshot.members_at(3).len(), 1);
    }

    #[test]
    fn test_depth_limit_is_applied() {
        let dto = TeamLevelsDto {
            level1: vec![member("a", dec!(1))],
            level2: vec![member("b", dec!(1))],
            level3: vec![member("c", dec!(1))],
            ..Default::default()
        };

        let snapshot = TeamSnapshot::from_wire(dto, 2);
        assert_eq!(snapshot.total_members(), 2);
        assert!(snapshot.members_at(3).is_empty());
    }

    #[test]
    fn test_level_summaries_order_and_sums() {
        let dto = TeamLevelsDto {
            level1: vec![member("a", dec!(10))],
            level2: vec![member("b", dec!(20)), member("c", dec!(30))],
            ..Default::default()
        };

        let summaries = TeamSnapshot::from_wire(dto, 6).level_summaries();
        assert_eq!(summaries.len(), 6);
        assert_eq!(summaries[0].depth, 1);
        assert_eq!(summaries[0].wallet_total, dec!(10));
        assert_eq!(summaries[1].members, 2);
        assert_eq!(summaries[1].wallet_total, dec!(50));
        assert_eq!(summaries[5].members, 0);
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = TeamSnapshot::from_wire(TeamLevelsDto::default(), 6);
        assert_eq!(snapshot.total_members(), 0);
        assert_eq!(snapshot.total_wallet(), Decimal::ZERO);
    }
}
