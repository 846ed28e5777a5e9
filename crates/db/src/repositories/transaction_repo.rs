//! Repository for the `transactions` payment ledger.

use crunch_core::payments::TransactionStatus;
use crunch_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::transaction::{CreateTransaction, Transaction};

const COLUMNS: &str = "id, user_id, package_id, amount_cents, crunch_coin_granted, status, \
     payment_reference, created_at, updated_at";

pub struct TransactionRepo;

impl TransactionRepo {
    /// Record a checkout as `PENDING`.
    pub async fn create(pool: &PgPool, input: &CreateTransaction) -> Result<Transaction, sqlx::Error> {
        let query = format!(
            "INSERT INTO transactions (user_id, package_id, amount_cents, crunch_coin_granted, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Transaction>(&query)
            .bind(input.user_id)
            .bind(&input.package_id)
            .bind(input.amount_cents)
            .bind(input.crunch_coin_granted)
            .bind(TransactionStatus::Pending.as_str())
            .fetch_one(pool)
            .await
    }

    pub async fn lock<'e, E>(executor: E, id: DbId) -> Result<Option<Transaction>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM transactions WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Transaction>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn lock_by_reference<'e, E>(
        executor: E,
        payment_reference: &str,
    ) -> Result<Option<Transaction>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query =
            format!("SELECT {COLUMNS} FROM transactions WHERE payment_reference = $1 FOR UPDATE");
        sqlx::query_as::<_, Transaction>(&query)
            .bind(payment_reference)
            .fetch_optional(executor)
            .await
    }

    /// Move to `status`, attaching the gateway reference when one is supplied.
    pub async fn set_status<'e, E>(
        executor: E,
        id: DbId,
        status: TransactionStatus,
        payment_reference: Option<&str>,
    ) -> Result<Transaction, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE transactions SET
                status = $2,
                payment_reference = COALESCE($3, payment_reference),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Transaction>(&query)
            .bind(id)
            .bind(status.as_str())
            .bind(payment_reference)
            .fetch_one(executor)
            .await
    }

    /// A user's payment history, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<Transaction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM transactions
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, Transaction>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
