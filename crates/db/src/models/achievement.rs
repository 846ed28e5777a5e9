//! Achievement catalogue and grants.

use crunch_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `achievements` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: DbId,
    pub key: String,
    pub name: String,
    pub description: String,
    pub reward_crunch_coin: i64,
    pub reward_trickle_tokens: i64,
    pub icon: String,
}

/// Catalogue entry with the caller's unlock time, if any.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementStatus {
    pub id: DbId,
    pub key: String,
    pub name: String,
    pub description: String,
    pub reward_crunch_coin: i64,
    pub reward_trickle_tokens: i64,
    pub icon: String,
    pub unlocked_at: Option<Timestamp>,
}
