//! Buzzword catalogue and inventory.

use crunch_core::buzzword::BuzzwordEffect;
use crunch_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `buzzwords` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Buzzword {
    pub id: DbId,
    pub name: String,
    pub cost: i64,
    pub effect: Json<BuzzwordEffect>,
    pub description: String,
}

/// Catalogue entry with the caller's owned quantity (0 if none).
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuzzwordListing {
    pub id: DbId,
    pub name: String,
    pub cost: i64,
    pub effect: Json<BuzzwordEffect>,
    pub description: String,
    pub quantity: i32,
}

/// A row from the `user_buzzwords` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBuzzword {
    pub id: DbId,
    pub user_id: DbId,
    pub buzzword_id: DbId,
    pub quantity: i32,
    pub updated_at: Timestamp,
}
