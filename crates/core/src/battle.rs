//! Battle resolution: preconditions, variance rolls, winner selection and
//! ranking point transfer.

use rand::Rng;
use serde::Serialize;

use crate::buzzword::{apply_effect, BuzzwordEffect};
use crate::error::CoreError;
use crate::rounding::round_half_up;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Each side's variance is drawn from `[-5%, +5%]` of its boosted power.
pub const MAX_VARIANCE_PERCENT: f64 = 5.0;

pub const BASE_RANKING_POINTS: i64 = 25;
pub const MIN_RANKING_CHANGE: i64 = 10;
pub const MAX_RANKING_CHANGE: i64 = 50;

/// Ranking difference worth one extra (or one fewer) point.
pub const RANKING_DIFF_DIVISOR: f64 = 50.0;

/// Minimum time between two battles started by the same attacker.
pub const BATTLE_COOLDOWN_SECS: i64 = 30;

/// Opponents are first searched within this many ranking points.
pub const MATCHMAKING_RANGE: i64 = 500;

/// Candidates considered per search before a random pick.
pub const MATCHMAKING_POOL_SIZE: i64 = 10;

// ---------------------------------------------------------------------------
// Preconditions
// ---------------------------------------------------------------------------

/// Whole seconds left on the attacker's cooldown, rounded up. `None` when clear.
pub fn cooldown_remaining_secs(last_battle_at: Option<Timestamp>, now: Timestamp) -> Option<i64> {
    let last = last_battle_at?;
    let elapsed_ms = (now - last).num_milliseconds();
    let cooldown_ms = BATTLE_COOLDOWN_SECS * 1000;
    if elapsed_ms >= cooldown_ms {
        return None;
    }
    let remaining_ms = cooldown_ms - elapsed_ms;
    Some((remaining_ms + 999) / 1000)
}

/// Attacker checks that run before matchmaking, in order: characters, cooldown, power.
pub fn check_attacker(
    character_count: i64,
    last_battle_at: Option<Timestamp>,
    total_power: i64,
    now: Timestamp,
) -> Result<(), CoreError> {
    if character_count < 1 {
        return Err(CoreError::NoCharacters);
    }
    if let Some(remaining_secs) = cooldown_remaining_secs(last_battle_at, now) {
        return Err(CoreError::CooldownActive { remaining_secs });
    }
    if total_power <= 0 {
        return Err(CoreError::ZeroPower);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Variance and winner
// ---------------------------------------------------------------------------

/// Variance for a given percent in `[-5, 5]`.
pub fn variance_for(power: i64, percent: f64) -> i64 {
    round_half_up(power as f64 * percent / 100.0)
}

pub fn roll_variance<R: Rng + ?Sized>(rng: &mut R, power: i64) -> i64 {
    let percent = (rng.random::<f64>() * 2.0 - 1.0) * MAX_VARIANCE_PERCENT;
    variance_for(power, percent)
}

pub fn final_power(boosted_power: i64, roll: i64) -> i64 {
    (boosted_power + roll).max(1)
}

/// One side of a resolved fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidePower {
    pub base_power: i64,
    pub boosted_power: i64,
    pub roll: i64,
    pub final_power: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fight {
    pub attacker: SidePower,
    pub defender: SidePower,
    pub attacker_won: bool,
}

/// Resolve a fight from fixed rolls. Ties go to the attacker.
pub fn fight_with_rolls(
    attacker_base: i64,
    defender_base: i64,
    effect: Option<BuzzwordEffect>,
    attacker_roll: i64,
    defender_roll: i64,
) -> Fight {
    let boosted = apply_effect(effect, attacker_base, defender_base);
    let attacker = SidePower {
        base_power: attacker_base,
        boosted_power: boosted.attacker,
        roll: attacker_roll,
        final_power: final_power(boosted.attacker, attacker_roll),
    };
    let defender = SidePower {
        base_power: defender_base,
        boosted_power: boosted.defender,
        roll: defender_roll,
        final_power: final_power(boosted.defender, defender_roll),
    };
    Fight {
        attacker,
        defender,
        attacker_won: attacker.final_power >= defender.final_power,
    }
}

/// Apply the buzzword, roll independent variance for each side, pick the winner.
pub fn resolve_fight<R: Rng + ?Sized>(
    rng: &mut R,
    attacker_base: i64,
    defender_base: i64,
    effect: Option<BuzzwordEffect>,
) -> Fight {
    let boosted = apply_effect(effect, attacker_base, defender_base);
    let attacker_roll = roll_variance(rng, boosted.attacker);
    let defender_roll = roll_variance(rng, boosted.defender);
    fight_with_rolls(attacker_base, defender_base, effect, attacker_roll, defender_roll)
}

// ---------------------------------------------------------------------------
// Ranking points
// ---------------------------------------------------------------------------

/// Points the winner gains: `25 + round((loser - winner) / 50)`, clamped to `[10, 50]`.
pub fn ranking_points_change(winner_ranking: i64, loser_ranking: i64) -> i64 {
    let modifier = round_half_up((loser_ranking - winner_ranking) as f64 / RANKING_DIFF_DIVISOR);
    (BASE_RANKING_POINTS + modifier).clamp(MIN_RANKING_CHANGE, MAX_RANKING_CHANGE)
}

/// Ranking deltas to commit after a fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingSettlement {
    /// Full amount credited to the winner.
    pub change: i64,
    /// Amount debited from the loser, capped at their balance.
    pub loss: i64,
    pub attacker_after: i64,
    pub defender_after: i64,
}

pub fn settle_ranking(attacker_ranking: i64, defender_ranking: i64, attacker_won: bool) -> RankingSettlement {
    let (winner, loser) = if attacker_won {
        (attacker_ranking, defender_ranking)
    } else {
        (defender_ranking, attacker_ranking)
    };
    let change = ranking_points_change(winner, loser);
    let loss = change.min(loser);

    let (attacker_after, defender_after) = if attacker_won {
        (attacker_ranking + change, defender_ranking - loss)
    } else {
        (attacker_ranking - loss, defender_ranking + change)
    };

    RankingSettlement {
        change,
        loss,
        attacker_after,
        defender_after,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{Duration, Utc};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // -- Preconditions --

    #[test]
    fn no_characters_checked_first() {
        let now = Utc::now();
        assert_matches!(
            check_attacker(0, Some(now), 0, now),
            Err(CoreError::NoCharacters)
        );
    }

    #[test]
    fn cooldown_rounds_remaining_up() {
        let now = Utc::now();
        let last = now - Duration::milliseconds(10_500);
        assert_eq!(cooldown_remaining_secs(Some(last), now), Some(20));
        assert_matches!(
            check_attacker(3, Some(last), 100, now),
            Err(CoreError::CooldownActive { remaining_secs: 20 })
        );
    }

    #[test]
    fn cooldown_clears_after_thirty_seconds() {
        let now = Utc::now();
        assert_eq!(cooldown_remaining_secs(Some(now - Duration::seconds(30)), now), None);
        assert_eq!(cooldown_remaining_secs(None, now), None);
    }

    #[test]
    fn zero_power_checked_after_cooldown() {
        let now = Utc::now();
        assert_matches!(check_attacker(1, None, 0, now), Err(CoreError::ZeroPower));
        assert!(check_attacker(1, None, 100, now).is_ok());
    }

    // -- Variance --

    #[test]
    fn variance_stays_within_five_percent() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..1_000 {
            let roll = roll_variance(&mut rng, 1000);
            assert!((-50..=50).contains(&roll), "roll {roll} out of range");
        }
    }

    #[test]
    fn final_power_floors_at_one() {
        assert_eq!(final_power(1, -1), 1);
        assert_eq!(final_power(100, -5), 95);
    }

    #[test]
    fn attacker_wins_ties() {
        let fight = fight_with_rolls(1000, 1000, None, 0, 0);
        assert!(fight.attacker_won);
        let fight = fight_with_rolls(1000, 1000, None, -1, 0);
        assert!(!fight.attacker_won);
    }

    #[test]
    fn buzzword_applies_before_rolls() {
        let fight = fight_with_rolls(
            1000,
            1100,
            Some(BuzzwordEffect::PowerBoostPct { value: 20 }),
            0,
            0,
        );
        assert_eq!(fight.attacker.base_power, 1000);
        assert_eq!(fight.attacker.boosted_power, 1200);
        assert_eq!(fight.defender.boosted_power, 1100);
        assert!(fight.attacker_won);
    }

    #[test]
    fn resolved_rolls_are_bounded_by_boosted_power() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let fight = resolve_fight(
                &mut rng,
                800,
                900,
                Some(BuzzwordEffect::OpponentDebuffPct { value: 12 }),
            );
            assert_eq!(fight.defender.boosted_power, 792);
            assert!(fight.attacker.roll.abs() <= 40);
            assert!(fight.defender.roll.abs() <= 40);
            assert_eq!(
                fight.attacker_won,
                fight.attacker.final_power >= fight.defender.final_power
            );
        }
    }

    // -- Ranking --

    #[test]
    fn equal_rankings_exchange_base_points() {
        assert_eq!(ranking_points_change(1000, 1000), 25);
    }

    #[test]
    fn underdog_wins_more_favorite_wins_less() {
        assert_eq!(ranking_points_change(1000, 1500), 35);
        assert_eq!(ranking_points_change(1500, 1000), 15);
    }

    #[test]
    fn change_is_clamped() {
        assert_eq!(ranking_points_change(0, 10_000), 50);
        assert_eq!(ranking_points_change(10_000, 0), 10);
        for winner in (0..3000).step_by(137) {
            for loser in (0..3000).step_by(211) {
                let change = ranking_points_change(winner, loser);
                assert!((MIN_RANKING_CHANGE..=MAX_RANKING_CHANGE).contains(&change));
            }
        }
    }

    #[test]
    fn loser_loss_capped_at_balance() {
        let settlement = settle_ranking(100, 5, true);
        assert_eq!(settlement.change, 23);
        assert_eq!(settlement.loss, 5);
        assert_eq!(settlement.attacker_after, 123);
        assert_eq!(settlement.defender_after, 0);
    }

    #[test]
    fn defender_win_moves_points_to_defender() {
        let settlement = settle_ranking(0, 0, false);
        assert_eq!(settlement.change, 25);
        assert_eq!(settlement.loss, 0);
        assert_eq!(settlement.attacker_after, 0);
        assert_eq!(settlement.defender_after, 25);
    }
}
