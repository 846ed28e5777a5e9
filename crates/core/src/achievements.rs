//! Achievement rule table.
//!
//! The catalogue itself (names, rewards) lives in the database; this module
//! maps each catalogue key to a predicate over an [`AchievementProgress`]
//! snapshot. Keys with no rule are never granted.

use std::str::FromStr;

use serde::Serialize;

use crate::gacha::PITY_THRESHOLD;

/// Total spend (in cents) that earns whale status.
pub const WHALE_SPEND_CENTS: i64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementKey {
    FirstPull,
    Collect5,
    Collect10,
    CollectAll,
    First5Star,
    FirstBattle,
    Win10,
    Win50,
    PityPull,
    WhaleStatus,
}

impl AchievementKey {
    pub const ALL: [AchievementKey; 10] = [
        Self::FirstPull,
        Self::Collect5,
        Self::Collect10,
        Self::CollectAll,
        Self::First5Star,
        Self::FirstBattle,
        Self::Win10,
        Self::Win50,
        Self::PityPull,
        Self::WhaleStatus,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstPull => "first_pull",
            Self::Collect5 => "collect_5",
            Self::Collect10 => "collect_10",
            Self::CollectAll => "collect_all",
            Self::First5Star => "first_5star",
            Self::FirstBattle => "first_battle",
            Self::Win10 => "win_10",
            Self::Win50 => "win_50",
            Self::PityPull => "pity_pull",
            Self::WhaleStatus => "whale_status",
        }
    }

    /// Evaluate this rule against a progress snapshot.
    pub fn is_met(self, progress: &AchievementProgress) -> bool {
        match self {
            Self::FirstPull => progress.character_count >= 1,
            Self::Collect5 => progress.character_count >= 5,
            Self::Collect10 => progress.character_count >= 10,
            Self::CollectAll => {
                progress.catalog_size > 0 && progress.character_count >= progress.catalog_size
            }
            Self::First5Star => progress.owns_legendary,
            Self::FirstBattle => progress.wins >= 1,
            Self::Win10 => progress.wins >= 10,
            Self::Win50 => progress.wins >= 50,
            Self::PityPull => progress.total_pulls >= i64::from(PITY_THRESHOLD),
            Self::WhaleStatus => progress.total_spent_cents >= WHALE_SPEND_CENTS,
        }
    }
}

impl FromStr for AchievementKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|k| k.as_str() == s).ok_or(())
    }
}

/// Everything the rule table looks at, loaded once per check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AchievementProgress {
    pub character_count: i64,
    pub catalog_size: i64,
    pub owns_legendary: bool,
    pub wins: i64,
    pub total_pulls: i64,
    pub total_spent_cents: i64,
}

/// True if the catalogue key names a known rule and that rule is satisfied.
pub fn is_earned(key: &str, progress: &AchievementProgress) -> bool {
    key.parse::<AchievementKey>()
        .map(|k| k.is_met(progress))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_progress_earns_nothing() {
        let progress = AchievementProgress {
            catalog_size: 25,
            ..Default::default()
        };
        for key in AchievementKey::ALL {
            assert!(!key.is_met(&progress), "{} granted with no progress", key.as_str());
        }
    }

    #[test]
    fn collection_thresholds() {
        let progress = AchievementProgress {
            character_count: 10,
            catalog_size: 25,
            ..Default::default()
        };
        assert!(AchievementKey::FirstPull.is_met(&progress));
        assert!(AchievementKey::Collect5.is_met(&progress));
        assert!(AchievementKey::Collect10.is_met(&progress));
        assert!(!AchievementKey::CollectAll.is_met(&progress));
    }

    #[test]
    fn collect_all_needs_whole_catalog() {
        let progress = AchievementProgress {
            character_count: 25,
            catalog_size: 25,
            ..Default::default()
        };
        assert!(AchievementKey::CollectAll.is_met(&progress));
    }

    #[test]
    fn pity_pull_uses_explicit_counter() {
        let mut progress = AchievementProgress {
            total_pulls: 99,
            ..Default::default()
        };
        assert!(!AchievementKey::PityPull.is_met(&progress));
        progress.total_pulls = 100;
        assert!(AchievementKey::PityPull.is_met(&progress));
    }

    #[test]
    fn whale_status_at_one_hundred_dollars() {
        let mut progress = AchievementProgress {
            total_spent_cents: 9_999,
            ..Default::default()
        };
        assert!(!AchievementKey::WhaleStatus.is_met(&progress));
        progress.total_spent_cents = 10_000;
        assert!(AchievementKey::WhaleStatus.is_met(&progress));
    }

    #[test]
    fn unknown_keys_are_never_earned() {
        let progress = AchievementProgress {
            character_count: 100,
            wins: 100,
            ..Default::default()
        };
        assert!(!is_earned("speedrun", &progress));
        assert!(is_earned("win_50", &progress));
    }
}
