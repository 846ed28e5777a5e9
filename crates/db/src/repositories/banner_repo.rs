//! Repository for `gacha_banners`.

use crunch_core::types::{DbId, Timestamp};
use sqlx::{PgExecutor, PgPool};

use crate::models::banner::{ActiveBanner, CreateBanner, GachaBanner};

const COLUMNS: &str = "id, name, description, featured_character_id, rate_up_percent, \
     start_date, end_date, created_at";

const ACTIVE_COLUMNS: &str = "b.id, b.name, b.description, b.featured_character_id, \
     c.name AS featured_name, c.rarity AS featured_rarity, b.rate_up_percent, b.start_date, b.end_date";

pub struct BannerRepo;

impl BannerRepo {
    pub async fn create(pool: &PgPool, input: &CreateBanner) -> Result<GachaBanner, sqlx::Error> {
        let query = format!(
            "INSERT INTO gacha_banners
                (name, description, featured_character_id, rate_up_percent, start_date, end_date)
             VALUES ($1, COALESCE($2, ''), $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GachaBanner>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.featured_character_id)
            .bind(input.rate_up_percent)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_one(pool)
            .await
    }

    /// Banners whose `[start_date, end_date)` window contains `now`.
    pub async fn list_active<'e, E>(executor: E, now: Timestamp) -> Result<Vec<ActiveBanner>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {ACTIVE_COLUMNS}
             FROM gacha_banners b
             JOIN characters c ON c.id = b.featured_character_id
             WHERE b.start_date <= $1 AND b.end_date > $1
             ORDER BY b.end_date ASC, b.id ASC"
        );
        sqlx::query_as::<_, ActiveBanner>(&query)
            .bind(now)
            .fetch_all(executor)
            .await
    }

    /// A single banner, only if active at `now`.
    pub async fn find_active<'e, E>(
        executor: E,
        id: DbId,
        now: Timestamp,
    ) -> Result<Option<ActiveBanner>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {ACTIVE_COLUMNS}
             FROM gacha_banners b
             JOIN characters c ON c.id = b.featured_character_id
             WHERE b.id = $1 AND b.start_date <= $2 AND b.end_date > $2"
        );
        sqlx::query_as::<_, ActiveBanner>(&query)
            .bind(id)
            .bind(now)
            .fetch_optional(executor)
            .await
    }
}
