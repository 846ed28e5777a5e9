//! Character catalogue.

use crunch_core::error::CoreError;
use crunch_core::rarity::Rarity;
use crunch_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `characters` table. Seeded by migration, read-only at runtime.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: DbId,
    pub name: String,
    pub rarity: i32,
    pub base_power: i64,
    pub bio: String,
    pub created_at: Timestamp,
}

impl Character {
    pub fn rarity(&self) -> Result<Rarity, CoreError> {
        Rarity::new(self.rarity)
    }
}
