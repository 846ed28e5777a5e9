mod common;

use assert_matches::assert_matches;
use common::{balances, player};
use crunch_core::error::CoreError;
use crunch_core::payments::{TransactionStatus, WebhookEvent};
use crunch_db::repositories::UserRepo;
use crunch_economy::payments::{self, WebhookOutcome};
use crunch_economy::EconomyError;
use sqlx::PgPool;

async fn spent_cents(pool: &PgPool, user_id: i64) -> i64 {
    UserRepo::find_by_id(pool, user_id)
        .await
        .unwrap()
        .unwrap()
        .total_spent_cents
}

fn completed(transaction_id: i64, reference: &str) -> WebhookEvent {
    WebhookEvent::CheckoutCompleted {
        transaction_id,
        payment_reference: reference.to_string(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_checkout_records_pending_transaction(pool: PgPool) {
    let user = player(&pool, 0, 0).await;

    let transaction = payments::create_checkout(&pool, user, "series_a").await.unwrap();
    assert_eq!(transaction.status().unwrap(), TransactionStatus::Pending);
    assert_eq!(transaction.amount_cents, 999);
    assert_eq!(transaction.crunch_coin_granted, 900);

    let unknown = payments::create_checkout(&pool, user, "pre_seed").await;
    assert_matches!(unknown, Err(EconomyError::Core(CoreError::Validation(_))));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_completion_credits_once(pool: PgPool) {
    let user = player(&pool, 10, 0).await;
    let transaction = payments::create_checkout(&pool, user, "ipo").await.unwrap();
    let event = completed(transaction.id, "pi_ipo");

    let first = payments::handle_webhook(&pool, &event).await.unwrap();
    assert_eq!(
        first,
        WebhookOutcome::Applied {
            transaction_id: transaction.id,
            status: TransactionStatus::Completed,
        }
    );
    assert_eq!(balances(&pool, user).await, (3510, 0));
    assert_eq!(spent_cents(&pool, user).await, 4999);

    let redelivered = payments::handle_webhook(&pool, &event).await.unwrap();
    assert_eq!(redelivered, WebhookOutcome::Ignored);
    assert_eq!(balances(&pool, user).await, (3510, 0));
    assert_eq!(spent_cents(&pool, user).await, 4999);

    let history = payments::transactions(&pool, user).await.unwrap();
    assert_eq!(history[0].payment_reference.as_deref(), Some("pi_ipo"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_expired_checkout_fails_and_cannot_complete(pool: PgPool) {
    let user = player(&pool, 0, 0).await;
    let transaction = payments::create_checkout(&pool, user, "seed_round").await.unwrap();

    let expired = payments::handle_webhook(
        &pool,
        &WebhookEvent::CheckoutExpired {
            transaction_id: transaction.id,
        },
    )
    .await
    .unwrap();
    assert_matches!(
        expired,
        WebhookOutcome::Applied {
            status: TransactionStatus::Failed,
            ..
        }
    );

    let late = payments::handle_webhook(&pool, &completed(transaction.id, "pi_late"))
        .await
        .unwrap();
    assert_eq!(late, WebhookOutcome::Ignored);
    assert_eq!(balances(&pool, user).await, (0, 0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refund_debits_floored_at_zero(pool: PgPool) {
    let user = player(&pool, 0, 0).await;
    let transaction = payments::create_checkout(&pool, user, "seed_round").await.unwrap();
    payments::handle_webhook(&pool, &completed(transaction.id, "pi_seed"))
        .await
        .unwrap();
    UserRepo::adjust_balances(&pool, user, -400, 0).await.unwrap();

    let refund = WebhookEvent::ChargeRefunded {
        payment_reference: "pi_seed".to_string(),
    };
    let outcome = payments::handle_webhook(&pool, &refund).await.unwrap();
    assert_matches!(
        outcome,
        WebhookOutcome::Applied {
            status: TransactionStatus::Refunded,
            ..
        }
    );
    assert_eq!(balances(&pool, user).await, (0, 0));
    assert_eq!(spent_cents(&pool, user).await, 0);

    let again = payments::handle_webhook(&pool, &refund).await.unwrap();
    assert_eq!(again, WebhookOutcome::Ignored);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_events_are_ignored(pool: PgPool) {
    assert_eq!(
        payments::handle_webhook(&pool, &WebhookEvent::Unknown).await.unwrap(),
        WebhookOutcome::Ignored
    );
    assert_eq!(
        payments::handle_webhook(&pool, &completed(123456, "pi_ghost")).await.unwrap(),
        WebhookOutcome::Ignored
    );
}
