use assert_matches::assert_matches;
use crunch_db::models::user::{CreateUser, PullStateUpdate};
use crunch_db::repositories::UserRepo;
use sqlx::PgPool;

async fn new_user(pool: &PgPool, crunch_coin: i64) -> crunch_db::models::user::User {
    UserRepo::create(
        pool,
        &CreateUser {
            display_name: Some("Test Whale".to_string()),
            crunch_coin: Some(crunch_coin),
            ..Default::default()
        },
    )
    .await
    .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_defaults(pool: PgPool) {
    let user = new_user(&pool, 0).await;
    assert_eq!(user.crunch_coin, 0);
    assert_eq!(user.pity_counter, 0);
    assert!(user.weekly_free_pull);
    assert!(!user.guaranteed_banner);
    assert_eq!(user.username, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_adjust_balances_in_transaction(pool: PgPool) {
    let user = new_user(&pool, 500).await;

    let mut tx = pool.begin().await.unwrap();
    let locked = UserRepo::lock(&mut *tx, user.id).await.unwrap().unwrap();
    assert_eq!(locked.crunch_coin, 500);
    let updated = UserRepo::adjust_balances(&mut *tx, user.id, -200, 15).await.unwrap();
    tx.commit().await.unwrap();

    assert_eq!(updated.crunch_coin, 300);
    assert_eq!(updated.trickle_tokens, 15);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_negative_balance_is_rejected(pool: PgPool) {
    let user = new_user(&pool, 50).await;
    let result = UserRepo::adjust_balances(&pool, user.id, -100, 0).await;
    assert_matches!(result, Err(sqlx::Error::Database(_)));

    let reloaded = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(reloaded.crunch_coin, 50);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_record_pulls_clears_weekly_flag(pool: PgPool) {
    let user = new_user(&pool, 0).await;
    let updated = UserRepo::record_pulls(
        &pool,
        user.id,
        &PullStateUpdate {
            pity_counter: 12,
            guaranteed_banner: true,
            pulls_made: 1,
            consume_weekly_free_pull: true,
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.pity_counter, 12);
    assert!(updated.guaranteed_banner);
    assert_eq!(updated.total_pulls, 1);
    assert!(!updated.weekly_free_pull);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ranking_points_floor_at_zero(pool: PgPool) {
    let user = new_user(&pool, 0).await;
    UserRepo::add_ranking_points(&pool, user.id, 20).await.unwrap();
    let after = UserRepo::add_ranking_points(&pool, user.id, -50).await.unwrap();
    assert_eq!(after, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lock_many_orders_by_id(pool: PgPool) {
    let a = new_user(&pool, 0).await;
    let b = new_user(&pool, 0).await;

    let mut tx = pool.begin().await.unwrap();
    let locked = UserRepo::lock_many(&mut *tx, &[b.id, a.id]).await.unwrap();
    tx.commit().await.unwrap();

    let ids: Vec<_> = locked.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![a.id, b.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_username_uniqueness(pool: PgPool) {
    let a = new_user(&pool, 0).await;
    let b = new_user(&pool, 0).await;

    UserRepo::update_username(&pool, a.id, "whale_one").await.unwrap();
    assert!(UserRepo::username_taken(&pool, "whale_one", b.id).await.unwrap());
    assert!(!UserRepo::username_taken(&pool, "whale_one", a.id).await.unwrap());

    let err = UserRepo::update_username(&pool, b.id, "whale_one").await.unwrap_err();
    assert_matches!(err, sqlx::Error::Database(ref db) if db.constraint() == Some("uq_users_username"));
}
