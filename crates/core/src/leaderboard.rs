//! Leaderboard categories, limits and ranking.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Default number of entries returned.
pub const DEFAULT_LIMIT: i64 = 50;

/// Hard ceiling for any leaderboard query, including user rank scans.
pub const MAX_LIMIT: i64 = 500;

/// Ceiling for limits supplied by HTTP callers.
pub const MAX_PUBLIC_LIMIT: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Ranking points, filtered to `> 0`.
    #[default]
    Ranking,
    /// Total real-money spend, filtered to `> 0`.
    Spending,
    /// Sum of `base_power + fed_power` over owned characters.
    Power,
    /// Distinct characters owned.
    Collection,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Self::Ranking,
        Self::Spending,
        Self::Power,
        Self::Collection,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ranking => "ranking",
            Self::Spending => "spending",
            Self::Power => "power",
            Self::Collection => "collection",
        }
    }

    pub fn meta(self) -> CategoryMeta {
        let (title, value_label, secondary_label) = match self {
            Self::Ranking => ("Battle Rankings", "Ranking Points", "Total Spent ($)"),
            Self::Spending => ("Whale Watch", "Total Spent ($)", "Ranking Points"),
            Self::Power => ("Power Rankings", "Total Power", "Total Spent ($)"),
            Self::Collection => ("Portfolio Size", "Characters Owned", "Total Spent ($)"),
        };
        CategoryMeta {
            title,
            value_label,
            secondary_label,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid category '{s}'. Use ranking, spending, power, or collection."
                ))
            })
    }
}

/// Display labels for a category.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMeta {
    pub title: &'static str,
    pub value_label: &'static str,
    pub secondary_label: &'static str,
}

/// Clamp a library-level limit into `1..=500`, defaulting to 50.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Validate a caller-supplied limit (`1..=100`).
pub fn validate_public_limit(limit: Option<i64>) -> Result<i64, CoreError> {
    match limit {
        None => Ok(DEFAULT_LIMIT),
        Some(l) if (1..=MAX_PUBLIC_LIMIT).contains(&l) => Ok(l),
        Some(_) => Err(CoreError::Validation(format!(
            "limit must be between 1 and {MAX_PUBLIC_LIMIT}"
        ))),
    }
}

/// Spend amounts are stored in cents and shown in dollars.
pub fn cents_to_dollars(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// One row of a board before ranks are assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct Standing {
    pub user_id: DbId,
    pub display_name: Option<String>,
    pub username: Option<String>,
    pub value: f64,
    pub secondary: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: i64,
    pub user_id: DbId,
    pub display_name: Option<String>,
    pub username: Option<String>,
    pub value: f64,
    pub secondary: f64,
}

/// Number rows 1..n in the order given. Ties keep query order.
pub fn assign_ranks(standings: Vec<Standing>) -> Vec<LeaderboardEntry> {
    standings
        .into_iter()
        .zip(1..)
        .map(|(s, rank)| LeaderboardEntry {
            rank,
            user_id: s.user_id,
            display_name: s.display_name,
            username: s.username,
            value: s.value,
            secondary: s.secondary,
        })
        .collect()
}

/// 1-based position of a user in a ranked board.
pub fn rank_of(entries: &[LeaderboardEntry], user_id: DbId) -> Option<i64> {
    entries.iter().find(|e| e.user_id == user_id).map(|e| e.rank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn standing(user_id: DbId, value: f64) -> Standing {
        Standing {
            user_id,
            display_name: None,
            username: None,
            value,
            secondary: 0.0,
        }
    }

    #[test]
    fn category_parses_snake_case() {
        assert_eq!("power".parse::<Category>().unwrap(), Category::Power);
        assert_matches!("whales".parse::<Category>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn limits_clamp_and_validate() {
        assert_eq!(clamp_limit(None), 50);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(10_000)), 500);
        assert_eq!(validate_public_limit(Some(100)).unwrap(), 100);
        assert_matches!(validate_public_limit(Some(101)), Err(CoreError::Validation(_)));
        assert_matches!(validate_public_limit(Some(0)), Err(CoreError::Validation(_)));
    }

    #[test]
    fn ranks_are_positional_even_on_ties() {
        let entries = assign_ranks(vec![standing(7, 50.0), standing(3, 50.0), standing(9, 10.0)]);
        let ranks: Vec<_> = entries.iter().map(|e| (e.user_id, e.rank)).collect();
        assert_eq!(ranks, vec![(7, 1), (3, 2), (9, 3)]);
        assert_eq!(rank_of(&entries, 9), Some(3));
        assert_eq!(rank_of(&entries, 1), None);
    }

    #[test]
    fn spending_meta_swaps_labels() {
        let meta = Category::Spending.meta();
        assert_eq!(meta.title, "Whale Watch");
        assert_eq!(meta.secondary_label, "Ranking Points");
    }

    #[test]
    fn cents_convert_to_dollars() {
        assert_eq!(cents_to_dollars(9999), 99.99);
    }
}
