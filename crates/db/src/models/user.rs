//! Player accounts and their economy state.

use crunch_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: DbId,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub crunch_coin: i64,
    pub trickle_tokens: i64,
    pub total_spent_cents: i64,
    pub ranking_points: i64,
    /// Pulls since the last 5★, `0..=99` between pulls.
    pub pity_counter: i32,
    /// Set after losing a 5★ 50/50; the next featured 5★ is guaranteed.
    pub guaranteed_banner: bool,
    pub weekly_free_pull: bool,
    pub total_pulls: i64,
    pub login_streak: i32,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a user. Balances default to zero.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUser {
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub crunch_coin: Option<i64>,
    pub trickle_tokens: Option<i64>,
}

/// Gacha state written back after a batch of pulls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullStateUpdate {
    pub pity_counter: i32,
    pub guaranteed_banner: bool,
    /// Added to `total_pulls`.
    pub pulls_made: i64,
    pub consume_weekly_free_pull: bool,
}
