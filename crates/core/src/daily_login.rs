//! Daily login streak rewards.
//!
//! Days are compared as UTC calendar dates.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::types::Timestamp;

/// Trickle Token reward per streak day. Day 7 and beyond pay the last entry.
pub const STREAK_REWARDS: [i64; 7] = [2, 2, 3, 3, 3, 3, 5];

pub fn reward_for_streak(streak: i32) -> i64 {
    let last = STREAK_REWARDS.len() - 1;
    let index = usize::try_from(streak.saturating_sub(1)).unwrap_or(0).min(last);
    STREAK_REWARDS[index]
}

fn is_previous_day(earlier: NaiveDate, today: NaiveDate) -> bool {
    today.checked_sub_days(Days::new(1)) == Some(earlier)
}

/// What claiming right now would do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ClaimPlan {
    /// Already claimed on this UTC day.
    AlreadyClaimed { streak: i32 },
    Claim {
        streak: i32,
        reward: i64,
        /// True when an existing streak was broken.
        streak_reset: bool,
    },
}

/// Decide the next claim. `multiplier` comes from an active `double_tokens` event.
pub fn plan_claim(
    last_login_at: Option<Timestamp>,
    current_streak: i32,
    now: Timestamp,
    multiplier: i32,
) -> ClaimPlan {
    let today = now.date_naive();
    let new_streak = match last_login_at.map(|t| t.date_naive()) {
        Some(last) if last == today => {
            return ClaimPlan::AlreadyClaimed {
                streak: current_streak,
            }
        }
        Some(last) if is_previous_day(last, today) => current_streak + 1,
        _ => 1,
    };

    ClaimPlan::Claim {
        streak: new_streak,
        reward: reward_for_streak(new_streak) * i64::from(multiplier.max(1)),
        streak_reset: new_streak == 1 && current_streak > 0,
    }
}
