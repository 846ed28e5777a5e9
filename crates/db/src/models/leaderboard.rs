//! Leaderboard query rows.

use crunch_core::leaderboard::Standing;
use crunch_core::types::DbId;
use sqlx::FromRow;

/// One aggregated row, already sorted by the query.
#[derive(Debug, Clone, FromRow)]
pub struct LeaderboardRow {
    pub user_id: DbId,
    pub display_name: Option<String>,
    pub username: Option<String>,
    pub value: f64,
    pub secondary: f64,
}

impl From<LeaderboardRow> for Standing {
    fn from(row: LeaderboardRow) -> Self {
        Standing {
            user_id: row.user_id,
            display_name: row.display_name,
            username: row.username,
            value: row.value,
            secondary: row.secondary,
        }
    }
}
