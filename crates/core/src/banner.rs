//! Banner rate-up and the 5★ 50/50 guarantee.

use rand::Rng;
use serde::Serialize;

use crate::rarity::Rarity;
use crate::types::DbId;

/// Chance, in percent, of winning the 5★ coin flip.
pub const FIFTY_FIFTY_WIN_PERCENT: f64 = 50.0;

/// The active banner as seen by a single pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannerContext {
    pub featured_character_id: DbId,
    pub featured_rarity: Rarity,
    pub rate_up_percent: i32,
}

/// Whether the pull awards the featured character or falls through to random selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerDecision {
    Featured,
    Random,
}

/// Result of banner evaluation plus the `guaranteed_banner` flag to commit afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannerOutcome {
    pub decision: BannerDecision,
    pub guaranteed_banner: bool,
    /// True only when a 5★ coin flip was lost on this pull.
    pub lost_fifty_fifty: bool,
}

impl BannerOutcome {
    fn unchanged(guaranteed_banner: bool) -> Self {
        Self {
            decision: BannerDecision::Random,
            guaranteed_banner,
            lost_fifty_fifty: false,
        }
    }
}

/// Decide the banner outcome for a rolled rarity.
///
/// `draw` is a uniform value in `[0, 100)`. At 5★ it is the coin flip
/// (unused when the guarantee is held); below 5★ it is compared against the
/// banner's rate-up percent. Rarities that don't match the featured
/// character's never touch the banner or the flag.
pub fn resolve_banner(
    rarity: Rarity,
    banner: Option<&BannerContext>,
    guaranteed_banner: bool,
    draw: f64,
) -> BannerOutcome {
    let Some(banner) = banner else {
        return BannerOutcome::unchanged(guaranteed_banner);
    };
    if banner.featured_rarity != rarity {
        return BannerOutcome::unchanged(guaranteed_banner);
    }

    if rarity == Rarity::LEGENDARY {
        if guaranteed_banner {
            return BannerOutcome {
                decision: BannerDecision::Featured,
                guaranteed_banner: false,
                lost_fifty_fifty: false,
            };
        }
        if draw < FIFTY_FIFTY_WIN_PERCENT {
            return BannerOutcome {
                decision: BannerDecision::Featured,
                guaranteed_banner: false,
                lost_fifty_fifty: false,
            };
        }
        return BannerOutcome {
            decision: BannerDecision::Random,
            guaranteed_banner: true,
            lost_fifty_fifty: true,
        };
    }

    let decision = if draw < f64::from(banner.rate_up_percent) {
        BannerDecision::Featured
    } else {
        BannerDecision::Random
    };
    BannerOutcome {
        decision,
        guaranteed_banner,
        lost_fifty_fifty: false,
    }
}

/// [`resolve_banner`] with a fresh draw from the caller's RNG.
pub fn roll_banner<R: Rng + ?Sized>(
    rng: &mut R,
    rarity: Rarity,
    banner: Option<&BannerContext>,
    guaranteed_banner: bool,
) -> BannerOutcome {
    let draw = rng.random::<f64>() * 100.0;
    resolve_banner(rarity, banner, guaranteed_banner, draw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legendary_banner() -> BannerContext {
        BannerContext {
            featured_character_id: 21,
            featured_rarity: Rarity::LEGENDARY,
            rate_up_percent: 50,
        }
    }

    fn rare_banner() -> BannerContext {
        BannerContext {
            featured_character_id: 11,
            featured_rarity: Rarity::RARE,
            rate_up_percent: 30,
        }
    }

    #[test]
    fn no_banner_is_random_and_keeps_flag() {
        let outcome = resolve_banner(Rarity::LEGENDARY, None, true, 0.0);
        assert_eq!(outcome.decision, BannerDecision::Random);
        assert!(outcome.guaranteed_banner);
    }

    #[test]
    fn rarity_mismatch_skips_banner() {
        let banner = legendary_banner();
        let outcome = resolve_banner(Rarity::SUPER_RARE, Some(&banner), false, 0.0);
        assert_eq!(outcome.decision, BannerDecision::Random);
        assert!(!outcome.guaranteed_banner);
    }

    #[test]
    fn guarantee_awards_featured_and_clears() {
        let banner = legendary_banner();
        let outcome = resolve_banner(Rarity::LEGENDARY, Some(&banner), true, 99.0);
        assert_eq!(outcome.decision, BannerDecision::Featured);
        assert!(!outcome.guaranteed_banner);
        assert!(!outcome.lost_fifty_fifty);
    }

    #[test]
    fn winning_coin_flip_awards_featured() {
        let banner = legendary_banner();
        let outcome = resolve_banner(Rarity::LEGENDARY, Some(&banner), false, 49.9);
        assert_eq!(outcome.decision, BannerDecision::Featured);
        assert!(!outcome.guaranteed_banner);
    }

    #[test]
    fn losing_coin_flip_sets_guarantee() {
        let banner = legendary_banner();
        let outcome = resolve_banner(Rarity::LEGENDARY, Some(&banner), false, 50.0);
        assert_eq!(outcome.decision, BannerDecision::Random);
        assert!(outcome.guaranteed_banner);
        assert!(outcome.lost_fifty_fifty);
    }

    #[test]
    fn lower_rarity_uses_rate_up_percent() {
        let banner = rare_banner();
        let hit = resolve_banner(Rarity::RARE, Some(&banner), false, 29.9);
        let miss = resolve_banner(Rarity::RARE, Some(&banner), false, 30.0);
        assert_eq!(hit.decision, BannerDecision::Featured);
        assert_eq!(miss.decision, BannerDecision::Random);
    }

    #[test]
    fn lower_rarity_never_touches_guarantee() {
        let banner = rare_banner();
        let outcome = resolve_banner(Rarity::RARE, Some(&banner), true, 0.0);
        assert!(outcome.guaranteed_banner);
        let outcome = resolve_banner(Rarity::RARE, Some(&banner), false, 99.0);
        assert!(!outcome.guaranteed_banner);
    }
}
