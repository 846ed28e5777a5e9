use crunch_core::payments::TransactionStatus;
use crunch_db::models::transaction::CreateTransaction;
use crunch_db::models::user::CreateUser;
use crunch_db::repositories::{TransactionRepo, UserRepo};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_status_transitions_and_reference_lookup(pool: PgPool) {
    let user = UserRepo::create(&pool, &CreateUser::default()).await.unwrap();
    let tx_row = TransactionRepo::create(
        &pool,
        &CreateTransaction {
            user_id: user.id,
            package_id: "seed_round".to_string(),
            amount_cents: 499,
            crunch_coin_granted: 500,
        },
    )
    .await
    .unwrap();
    assert_eq!(tx_row.status().unwrap(), TransactionStatus::Pending);

    let completed =
        TransactionRepo::set_status(&pool, tx_row.id, TransactionStatus::Completed, Some("pi_123"))
            .await
            .unwrap();
    assert_eq!(completed.payment_reference.as_deref(), Some("pi_123"));

    let refunded = TransactionRepo::set_status(&pool, tx_row.id, TransactionStatus::Refunded, None)
        .await
        .unwrap();
    assert_eq!(refunded.status, "REFUNDED");
    assert_eq!(refunded.payment_reference.as_deref(), Some("pi_123"));

    let found = TransactionRepo::lock_by_reference(&pool, "pi_123").await.unwrap().unwrap();
    assert_eq!(found.id, tx_row.id);

    let history = TransactionRepo::list_for_user(&pool, user.id, 20).await.unwrap();
    assert_eq!(history.len(), 1);
}
