//! Repository for the `users` table.

use crunch_core::types::{DbId, Timestamp};
use sqlx::{PgExecutor, PgPool};

use crate::models::user::{CreateUser, PullStateUpdate, User};

const COLUMNS: &str = "id, username, display_name, crunch_coin, trickle_tokens, total_spent_cents, \
     ranking_points, pity_counter, guaranteed_banner, weekly_free_pull, total_pulls, \
     login_streak, last_login_at, created_at, updated_at";

/// Balance, pity and streak mutations for players.
///
/// Every mutation here assumes the caller holds the row lock taken by
/// [`UserRepo::lock`] inside the same transaction.
pub struct UserRepo;

impl UserRepo {
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, display_name, crunch_coin, trickle_tokens)
             VALUES ($1, $2, COALESCE($3, 0), COALESCE($4, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.display_name)
            .bind(input.crunch_coin)
            .bind(input.trickle_tokens)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<User>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Load a user and hold its row lock until the transaction ends.
    pub async fn lock<'e, E>(executor: E, id: DbId) -> Result<Option<User>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Lock several users in ascending id order.
    pub async fn lock_many<'e, E>(executor: E, ids: &[DbId]) -> Result<Vec<User>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = ANY($1) ORDER BY id FOR UPDATE");
        sqlx::query_as::<_, User>(&query)
            .bind(ids)
            .fetch_all(executor)
            .await
    }

    /// Add signed deltas to both soft currencies.
    ///
    /// Callers check funds first; the table's CHECK constraints reject any
    /// update that would still go negative.
    pub async fn adjust_balances<'e, E>(
        executor: E,
        id: DbId,
        crunch_coin_delta: i64,
        trickle_tokens_delta: i64,
    ) -> Result<User, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE users SET
                crunch_coin = crunch_coin + $2,
                trickle_tokens = trickle_tokens + $3,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(crunch_coin_delta)
            .bind(trickle_tokens_delta)
            .fetch_one(executor)
            .await
    }

    /// Persist pity, the banner guarantee and pull counters after a pull batch.
    pub async fn record_pulls<'e, E>(
        executor: E,
        id: DbId,
        update: &PullStateUpdate,
    ) -> Result<User, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE users SET
                pity_counter = $2,
                guaranteed_banner = $3,
                total_pulls = total_pulls + $4,
                weekly_free_pull = weekly_free_pull AND NOT $5,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(update.pity_counter)
            .bind(update.guaranteed_banner)
            .bind(update.pulls_made)
            .bind(update.consume_weekly_free_pull)
            .fetch_one(executor)
            .await
    }

    /// Add a signed delta to ranking points, never below zero.
    pub async fn add_ranking_points<'e, E>(executor: E, id: DbId, delta: i64) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, i64>(
            "UPDATE users SET ranking_points = GREATEST(ranking_points + $2, 0), updated_at = NOW()
             WHERE id = $1
             RETURNING ranking_points",
        )
        .bind(id)
        .bind(delta)
        .fetch_one(executor)
        .await
    }

    /// Credit or debit purchased coins and lifetime spend, both floored at zero.
    pub async fn apply_payment<'e, E>(
        executor: E,
        id: DbId,
        crunch_coin_delta: i64,
        spent_cents_delta: i64,
    ) -> Result<User, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE users SET
                crunch_coin = GREATEST(crunch_coin + $2, 0),
                total_spent_cents = GREATEST(total_spent_cents + $3, 0),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(crunch_coin_delta)
            .bind(spent_cents_delta)
            .fetch_one(executor)
            .await
    }

    /// Record a daily login claim.
    pub async fn record_login<'e, E>(
        executor: E,
        id: DbId,
        streak: i32,
        reward: i64,
        at: Timestamp,
    ) -> Result<User, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE users SET
                login_streak = $2,
                trickle_tokens = trickle_tokens + $3,
                last_login_at = $4,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(streak)
            .bind(reward)
            .bind(at)
            .fetch_one(executor)
            .await
    }

    /// Set the username. Returns `None` if the user doesn't exist.
    ///
    /// A taken name surfaces as a `uq_users_username` violation.
    pub async fn update_username(
        pool: &PgPool,
        id: DbId,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET username = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// True if a different user already holds `username`.
    pub async fn username_taken(pool: &PgPool, username: &str, except_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 AND id <> $2)",
        )
        .bind(username)
        .bind(except_id)
        .fetch_one(pool)
        .await
    }
}
