//! Repository for the `user_characters` ownership table.

use crunch_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::user_character::{OwnedCharacter, UserCharacter};

const COLUMNS: &str = "id, user_id, character_id, fed_power, created_at, updated_at";

const OWNED_COLUMNS: &str = "uc.id, uc.user_id, uc.character_id, c.name, c.rarity, c.base_power, \
     c.bio, uc.fed_power, uc.created_at";

pub struct UserCharacterRepo;

impl UserCharacterRepo {
    /// The ownership row for `(user_id, character_id)`, locked for update.
    pub async fn lock_owned<'e, E>(
        executor: E,
        user_id: DbId,
        character_id: DbId,
    ) -> Result<Option<UserCharacter>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM user_characters
             WHERE user_id = $1 AND character_id = $2
             FOR UPDATE"
        );
        sqlx::query_as::<_, UserCharacter>(&query)
            .bind(user_id)
            .bind(character_id)
            .fetch_optional(executor)
            .await
    }

    /// An ownership row with catalogue data, locked for update.
    pub async fn lock_detail<'e, E>(executor: E, id: DbId) -> Result<Option<OwnedCharacter>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {OWNED_COLUMNS}
             FROM user_characters uc
             JOIN characters c ON c.id = uc.character_id
             WHERE uc.id = $1
             FOR UPDATE OF uc"
        );
        sqlx::query_as::<_, OwnedCharacter>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Record first acquisition of a character with zero fed power.
    pub async fn create<'e, E>(
        executor: E,
        user_id: DbId,
        character_id: DbId,
    ) -> Result<UserCharacter, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO user_characters (user_id, character_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserCharacter>(&query)
            .bind(user_id)
            .bind(character_id)
            .fetch_one(executor)
            .await
    }

    /// Add a signed delta to fed power, returning the new value.
    pub async fn add_fed_power<'e, E>(executor: E, id: DbId, delta: i64) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, i64>(
            "UPDATE user_characters SET fed_power = fed_power + $2, updated_at = NOW()
             WHERE id = $1
             RETURNING fed_power",
        )
        .bind(id)
        .bind(delta)
        .fetch_one(executor)
        .await
    }

    /// Remove an ownership row. Only the ten-pull floor correction does this.
    pub async fn delete<'e, E>(executor: E, id: DbId) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM user_characters WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count_for_user<'e, E>(executor: E, user_id: DbId) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM user_characters WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(executor)
            .await
    }

    /// Sum of `base_power + fed_power` over everything the user owns.
    pub async fn total_power<'e, E>(executor: E, user_id: DbId) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(c.base_power + uc.fed_power), 0)::BIGINT
             FROM user_characters uc
             JOIN characters c ON c.id = uc.character_id
             WHERE uc.user_id = $1",
        )
        .bind(user_id)
        .fetch_one(executor)
        .await
    }

    pub async fn owns_rarity<'e, E>(executor: E, user_id: DbId, rarity: i32) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                SELECT 1 FROM user_characters uc
                JOIN characters c ON c.id = uc.character_id
                WHERE uc.user_id = $1 AND c.rarity = $2
             )",
        )
        .bind(user_id)
        .bind(rarity)
        .fetch_one(executor)
        .await
    }

    /// A user's collection, strongest first.
    pub async fn list_owned(pool: &PgPool, user_id: DbId) -> Result<Vec<OwnedCharacter>, sqlx::Error> {
        let query = format!(
            "SELECT {OWNED_COLUMNS}
             FROM user_characters uc
             JOIN characters c ON c.id = uc.character_id
             WHERE uc.user_id = $1
             ORDER BY c.rarity DESC, (c.base_power + uc.fed_power) DESC, c.name ASC"
        );
        sqlx::query_as::<_, OwnedCharacter>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
