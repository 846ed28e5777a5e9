//! Buzzword battle modifiers.

use serde::{Deserialize, Serialize};

use crate::rounding::round_half_up;

/// Effect of one buzzword, stored as JSON `{"type": "...", "value": n}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BuzzwordEffect {
    /// Raise attacker power by `value` percent.
    PowerBoostPct { value: i32 },
    /// Lower defender power by `value` percent, never below 1.
    OpponentDebuffPct { value: i32 },
}

/// Both sides' power after a buzzword is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoostedPowers {
    pub attacker: i64,
    pub defender: i64,
}

fn percent_of(power: i64, value: i32) -> i64 {
    round_half_up(power as f64 * f64::from(value) / 100.0)
}

impl BuzzwordEffect {
    pub fn apply(self, attacker: i64, defender: i64) -> BoostedPowers {
        match self {
            Self::PowerBoostPct { value } => BoostedPowers {
                attacker: attacker + percent_of(attacker, value),
                defender,
            },
            Self::OpponentDebuffPct { value } => BoostedPowers {
                attacker,
                defender: (defender - percent_of(defender, value)).max(1),
            },
        }
    }
}

/// Apply an optional buzzword; `None` leaves both powers unchanged.
pub fn apply_effect(effect: Option<BuzzwordEffect>, attacker: i64, defender: i64) -> BoostedPowers {
    match effect {
        Some(effect) => effect.apply(attacker, defender),
        None => BoostedPowers { attacker, defender },
    }
}
