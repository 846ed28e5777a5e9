//! Character ownership records.

use crunch_core::error::CoreError;
use crunch_core::rarity::Rarity;
use crunch_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `user_characters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCharacter {
    pub id: DbId,
    pub user_id: DbId,
    pub character_id: DbId,
    pub fed_power: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An ownership record joined with its catalogue entry.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedCharacter {
    /// `user_characters.id`.
    pub id: DbId,
    pub user_id: DbId,
    pub character_id: DbId,
    pub name: String,
    pub rarity: i32,
    pub base_power: i64,
    pub bio: String,
    pub fed_power: i64,
    pub created_at: Timestamp,
}

impl OwnedCharacter {
    pub fn rarity(&self) -> Result<Rarity, CoreError> {
        Rarity::new(self.rarity)
    }

    pub fn total_power(&self) -> i64 {
        self.base_power + self.fed_power
    }
}
