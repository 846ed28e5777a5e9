//! Battle log.

use crunch_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the append-only `battles` table.
///
/// `attacker_power` / `defender_power` are post-buzzword, pre-variance.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Battle {
    pub id: DbId,
    pub attacker_id: DbId,
    pub defender_id: DbId,
    pub winner_id: DbId,
    pub attacker_power: i64,
    pub defender_power: i64,
    pub attacker_roll: i64,
    pub defender_roll: i64,
    pub ranking_points_change: i64,
    pub buzzwords_used: Vec<DbId>,
    pub created_at: Timestamp,
}

/// DTO for logging a resolved battle.
#[derive(Debug, Clone)]
pub struct CreateBattle {
    pub attacker_id: DbId,
    pub defender_id: DbId,
    pub winner_id: DbId,
    pub attacker_power: i64,
    pub defender_power: i64,
    pub attacker_roll: i64,
    pub defender_roll: i64,
    pub ranking_points_change: i64,
    pub buzzwords_used: Vec<DbId>,
}

/// A battle joined with both participants' names, for history views.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleHistoryEntry {
    pub id: DbId,
    pub attacker_id: DbId,
    pub attacker_name: Option<String>,
    pub defender_id: DbId,
    pub defender_name: Option<String>,
    pub winner_id: DbId,
    pub attacker_power: i64,
    pub defender_power: i64,
    pub attacker_roll: i64,
    pub defender_roll: i64,
    pub ranking_points_change: i64,
    pub created_at: Timestamp,
}

/// A matchmaking candidate.
#[derive(Debug, Clone, FromRow)]
pub struct Opponent {
    pub id: DbId,
    pub display_name: Option<String>,
    pub ranking_points: i64,
}
