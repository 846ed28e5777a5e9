//! Time-boxed gacha banners.

use crunch_core::banner::BannerContext;
use crunch_core::error::CoreError;
use crunch_core::rarity::Rarity;
use crunch_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `gacha_banners` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GachaBanner {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub featured_character_id: DbId,
    pub rate_up_percent: i32,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub created_at: Timestamp,
}

/// DTO for creating a banner.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBanner {
    pub name: String,
    pub description: Option<String>,
    pub featured_character_id: DbId,
    pub rate_up_percent: i32,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
}

/// An active banner joined with its featured character.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveBanner {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub featured_character_id: DbId,
    pub featured_name: String,
    pub featured_rarity: i32,
    pub rate_up_percent: i32,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
}

impl ActiveBanner {
    /// The subset of banner state the pull roll needs.
    pub fn context(&self) -> Result<BannerContext, CoreError> {
        Ok(BannerContext {
            featured_character_id: self.featured_character_id,
            featured_rarity: Rarity::new(self.featured_rarity)?,
            rate_up_percent: self.rate_up_percent,
        })
    }
}
