mod common;

use axum::http::StatusCode;
use common::{body_json, create_player, get, get_auth, token_for};
use crunch_db::repositories::UserRepo;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn default_board_is_ranking(pool: PgPool) {
    let low = create_player(&pool, 0, 0).await;
    let high = create_player(&pool, 0, 0).await;
    UserRepo::add_ranking_points(&pool, low, 15).await.unwrap();
    UserRepo::add_ranking_points(&pool, high, 60).await.unwrap();
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/leaderboard").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["category"], "ranking");
    assert_eq!(json["data"]["meta"]["title"], "Battle Rankings");
    assert_eq!(json["data"]["totalPlayers"], 2);
    assert_eq!(json["data"]["entries"][0]["userId"], high);
    assert_eq!(json["data"]["entries"][0]["rank"], 1);
    assert_eq!(json["data"]["entries"][1]["userId"], low);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn limit_outside_public_range_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    for uri in ["/api/v1/leaderboard?limit=0", "/api/v1/leaderboard?limit=101"] {
        let response = get(app.clone(), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }

    let response = get(app.clone(), "/api/v1/leaderboard?category=vibes").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");

    let response = get(app, "/api/v1/leaderboard?category=spending&limit=100").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn my_rank_requires_auth_and_reports_position(pool: PgPool) {
    let first = create_player(&pool, 0, 0).await;
    let second = create_player(&pool, 0, 0).await;
    UserRepo::add_ranking_points(&pool, first, 30).await.unwrap();
    UserRepo::add_ranking_points(&pool, second, 20).await.unwrap();
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/v1/leaderboard/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(
        get_auth(app, "/api/v1/leaderboard/me?category=ranking", &token_for(second)).await,
    )
    .await;
    assert_eq!(json["data"]["rank"], 2);
    assert_eq!(json["data"]["totalPlayers"], 2);
}
