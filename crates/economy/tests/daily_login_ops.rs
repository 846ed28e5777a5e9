mod common;

use chrono::{Duration, TimeZone, Utc};
use common::{balances, player};
use crunch_db::models::seasonal_event::CreateSeasonalEvent;
use crunch_db::repositories::SeasonalEventRepo;
use crunch_economy::{daily_login, events};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_claim_once_per_day(pool: PgPool) {
    let user = player(&pool, 0, 0).await;
    let now = Utc.with_ymd_and_hms(2026, 5, 4, 9, 0, 0).unwrap();

    let preview = daily_login::status(&pool, user, now).await.unwrap();
    assert!(preview.can_claim);
    assert_eq!(preview.next_reward, 2);

    let first = daily_login::claim(&pool, user, now).await.unwrap();
    assert!(!first.already_claimed);
    assert_eq!(first.streak, 1);
    assert_eq!(first.reward, 2);

    let again = daily_login::claim(&pool, user, now + Duration::hours(3)).await.unwrap();
    assert!(again.already_claimed);
    assert_eq!(again.reward, 0);
    assert_eq!(balances(&pool, user).await, (0, 2));

    let after = daily_login::status(&pool, user, now).await.unwrap();
    assert!(!after.can_claim);
    assert_eq!(after.current_streak, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_streak_grows_and_resets(pool: PgPool) {
    let user = player(&pool, 0, 0).await;
    let day = Utc.with_ymd_and_hms(2026, 5, 4, 9, 0, 0).unwrap();

    daily_login::claim(&pool, user, day).await.unwrap();
    let second = daily_login::claim(&pool, user, day + Duration::days(1)).await.unwrap();
    assert_eq!(second.streak, 2);
    assert!(!second.streak_reset);

    let broken = daily_login::claim(&pool, user, day + Duration::days(4)).await.unwrap();
    assert_eq!(broken.streak, 1);
    assert!(broken.streak_reset);
    assert_eq!(broken.trickle_tokens, 2 + 2 + 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_double_tokens_event_multiplies_reward(pool: PgPool) {
    let user = player(&pool, 0, 0).await;
    let now = Utc.with_ymd_and_hms(2026, 12, 24, 12, 0, 0).unwrap();
    SeasonalEventRepo::create(
        &pool,
        &CreateSeasonalEvent {
            name: "Year-End Bonus Season".to_string(),
            description: None,
            event_type: "double_tokens".to_string(),
            value: 2,
            start_date: now - Duration::days(1),
            end_date: now + Duration::days(7),
        },
    )
    .await
    .unwrap();

    assert_eq!(events::active_events(&pool, now).await.unwrap().len(), 1);
    let claim = daily_login::claim(&pool, user, now).await.unwrap();
    assert_eq!(claim.reward, 4);

    let later = now + Duration::days(30);
    assert!(events::active_events(&pool, later).await.unwrap().is_empty());
}
