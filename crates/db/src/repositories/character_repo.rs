//! Repository for the `characters` catalogue.

use crunch_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::character::Character;

const COLUMNS: &str = "id, name, rarity, base_power, bio, created_at";

pub struct CharacterRepo;

impl CharacterRepo {
    /// Full catalogue, highest rarity first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters ORDER BY rarity DESC, name ASC");
        sqlx::query_as::<_, Character>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<Character>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE id = $1");
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// All characters of one rarity, in id order.
    pub async fn list_by_rarity<'e, E>(executor: E, rarity: i32) -> Result<Vec<Character>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE rarity = $1 ORDER BY id");
        sqlx::query_as::<_, Character>(&query)
            .bind(rarity)
            .fetch_all(executor)
            .await
    }

    pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM characters")
            .fetch_one(executor)
            .await
    }
}
