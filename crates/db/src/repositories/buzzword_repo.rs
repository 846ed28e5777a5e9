//! Repository for `buzzwords` and the `user_buzzwords` inventory.

use crunch_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::buzzword::{Buzzword, BuzzwordListing, UserBuzzword};

const COLUMNS: &str = "id, name, cost, effect, description";

const INVENTORY_COLUMNS: &str = "id, user_id, buzzword_id, quantity, updated_at";

pub struct BuzzwordRepo;

impl BuzzwordRepo {
    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<Buzzword>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM buzzwords WHERE id = $1");
        sqlx::query_as::<_, Buzzword>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Catalogue ordered by cost, with `user_id`'s owned quantity.
    pub async fn list_with_quantity(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<BuzzwordListing>, sqlx::Error> {
        sqlx::query_as::<_, BuzzwordListing>(
            "SELECT b.id, b.name, b.cost, b.effect, b.description,
                    COALESCE(ub.quantity, 0) AS quantity
             FROM buzzwords b
             LEFT JOIN user_buzzwords ub ON ub.buzzword_id = b.id AND ub.user_id = $1
             ORDER BY b.cost ASC, b.id ASC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Add one unit to the user's inventory, creating the row on first purchase.
    pub async fn add_to_inventory<'e, E>(
        executor: E,
        user_id: DbId,
        buzzword_id: DbId,
    ) -> Result<UserBuzzword, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO user_buzzwords (user_id, buzzword_id, quantity)
             VALUES ($1, $2, 1)
             ON CONFLICT ON CONSTRAINT uq_user_buzzwords_user_buzzword
             DO UPDATE SET quantity = user_buzzwords.quantity + 1, updated_at = NOW()
             RETURNING {INVENTORY_COLUMNS}"
        );
        sqlx::query_as::<_, UserBuzzword>(&query)
            .bind(user_id)
            .bind(buzzword_id)
            .fetch_one(executor)
            .await
    }

    /// Units of one buzzword the user holds, 0 if none. Takes no lock.
    pub async fn quantity_owned<'e, E>(executor: E, user_id: DbId, buzzword_id: DbId) -> Result<i32, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, i32>(
            "SELECT COALESCE(
                (SELECT quantity FROM user_buzzwords WHERE user_id = $1 AND buzzword_id = $2),
                0)",
        )
        .bind(user_id)
        .bind(buzzword_id)
        .fetch_one(executor)
        .await
    }

    /// Inventory row for one buzzword, locked for update.
    pub async fn lock_inventory<'e, E>(
        executor: E,
        user_id: DbId,
        buzzword_id: DbId,
    ) -> Result<Option<UserBuzzword>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {INVENTORY_COLUMNS} FROM user_buzzwords
             WHERE user_id = $1 AND buzzword_id = $2
             FOR UPDATE"
        );
        sqlx::query_as::<_, UserBuzzword>(&query)
            .bind(user_id)
            .bind(buzzword_id)
            .fetch_optional(executor)
            .await
    }

    /// Use up one unit. Returns the remaining quantity.
    pub async fn consume<'e, E>(executor: E, user_buzzword_id: DbId) -> Result<i32, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, i32>(
            "UPDATE user_buzzwords SET quantity = quantity - 1, updated_at = NOW()
             WHERE id = $1
             RETURNING quantity",
        )
        .bind(user_buzzword_id)
        .fetch_one(executor)
        .await
    }
}
