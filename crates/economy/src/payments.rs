//! Payment ledger: checkouts and gateway webhook events.

use crunch_core::payments::{
    find_package, next_status, refund_debit, CoinPackage, LedgerAction, TransactionStatus,
    WebhookEvent, PACKAGES,
};
use crunch_core::types::DbId;
use crunch_db::models::transaction::{CreateTransaction, Transaction};
use crunch_db::repositories::{TransactionRepo, UserRepo};
use serde::Serialize;
use sqlx::{PgConnection, PgPool};

use crate::error::{user_not_found, EconomyResult};

pub const DEFAULT_HISTORY_LIMIT: i64 = 50;

pub fn packages() -> &'static [CoinPackage] {
    &PACKAGES
}

/// Record a pending purchase of `package_id` for `user_id`.
pub async fn create_checkout(pool: &PgPool, user_id: DbId, package_id: &str) -> EconomyResult<Transaction> {
    let package = find_package(package_id)?;
    UserRepo::find_by_id(pool, user_id)
        .await?
        .ok_or_else(|| user_not_found(user_id))?;

    let transaction = TransactionRepo::create(
        pool,
        &CreateTransaction {
            user_id,
            package_id: package.id.to_string(),
            amount_cents: package.price_cents,
            crunch_coin_granted: package.crunch_coin,
        },
    )
    .await?;

    tracing::info!(user_id, transaction_id = transaction.id, package_id, "Checkout created");
    Ok(transaction)
}

pub async fn transactions(pool: &PgPool, user_id: DbId) -> EconomyResult<Vec<Transaction>> {
    Ok(TransactionRepo::list_for_user(pool, user_id, DEFAULT_HISTORY_LIMIT).await?)
}

/// What a webhook delivery did to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum WebhookOutcome {
    #[serde(rename_all = "camelCase")]
    Applied {
        transaction_id: DbId,
        status: TransactionStatus,
    },
    /// Unknown event, unknown transaction, or a transition already made.
    Ignored,
}

/// Apply a verified gateway event. Re-delivered events are no-ops.
pub async fn handle_webhook(pool: &PgPool, event: &WebhookEvent) -> EconomyResult<WebhookOutcome> {
    let mut tx = pool.begin().await?;

    let locked = match event {
        WebhookEvent::CheckoutCompleted { transaction_id, .. }
        | WebhookEvent::CheckoutExpired { transaction_id } => {
            TransactionRepo::lock(&mut *tx, *transaction_id).await?
        }
        WebhookEvent::ChargeRefunded { payment_reference } => {
            TransactionRepo::lock_by_reference(&mut *tx, payment_reference).await?
        }
        WebhookEvent::Unknown => return Ok(WebhookOutcome::Ignored),
    };
    let Some(transaction) = locked else {
        tracing::warn!(?event, "Webhook references an unknown transaction");
        return Ok(WebhookOutcome::Ignored);
    };

    let (action, reference) = match event {
        WebhookEvent::CheckoutCompleted { payment_reference, .. } => {
            (LedgerAction::Complete, Some(payment_reference.as_str()))
        }
        WebhookEvent::CheckoutExpired { .. } => (LedgerAction::Expire, None),
        WebhookEvent::ChargeRefunded { .. } => (LedgerAction::Refund, None),
        WebhookEvent::Unknown => return Ok(WebhookOutcome::Ignored),
    };

    let current = transaction.status()?;
    let Some(status) = next_status(current, action) else {
        tracing::debug!(transaction_id = transaction.id, %current, ?action, "Webhook transition skipped");
        return Ok(WebhookOutcome::Ignored);
    };

    TransactionRepo::set_status(&mut *tx, transaction.id, status, reference).await?;
    apply_balance_change(&mut *tx, &transaction, status).await?;

    tx.commit().await?;

    tracing::info!(
        transaction_id = transaction.id,
        user_id = transaction.user_id,
        %status,
        "Payment ledger updated",
    );
    Ok(WebhookOutcome::Applied {
        transaction_id: transaction.id,
        status,
    })
}

async fn apply_balance_change(
    conn: &mut PgConnection,
    transaction: &Transaction,
    status: TransactionStatus,
) -> EconomyResult<()> {
    match status {
        TransactionStatus::Completed => {
            UserRepo::apply_payment(
                &mut *conn,
                transaction.user_id,
                transaction.crunch_coin_granted,
                transaction.amount_cents,
            )
            .await?;
        }
        TransactionStatus::Refunded => {
            let user = UserRepo::lock(&mut *conn, transaction.user_id)
                .await?
                .ok_or_else(|| user_not_found(transaction.user_id))?;
            let debit = refund_debit(user.crunch_coin, transaction.crunch_coin_granted);
            UserRepo::apply_payment(&mut *conn, user.id, -debit, -transaction.amount_cents).await?;
        }
        TransactionStatus::Pending | TransactionStatus::Failed => {}
    }
    Ok(())
}
