#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use crunch_api::auth::jwt::{generate_access_token, JwtConfig};
use crunch_api::config::ServerConfig;
use crunch_api::router::build_app_router;
use crunch_api::state::AppState;
use crunch_core::types::DbId;
use crunch_db::models::user::CreateUser;
use crunch_db::repositories::{CharacterRepo, UserCharacterRepo, UserRepo};

pub const WEBHOOK_SECRET: &str = "whsec_test";

/// A `ServerConfig` with fixed secrets and the production defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
        payment_webhook_secret: WEBHOOK_SECRET.to_string(),
        payment_webhook_tolerance_secs: 300,
        battle_rate_limit_per_min: 15,
    }
}

/// The full application router, same middleware stack as `main.rs`.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_router(AppState::new(pool, test_config()))
}

pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    build_app_router(AppState::new(pool, config))
}

pub fn token_for(user_id: DbId) -> String {
    generate_access_token(user_id, &test_config().jwt).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub async fn create_player(pool: &PgPool, crunch_coin: i64, trickle_tokens: i64) -> DbId {
    UserRepo::create(
        pool,
        &CreateUser {
            display_name: Some("Test Founder".to_string()),
            crunch_coin: Some(crunch_coin),
            trickle_tokens: Some(trickle_tokens),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .id
}

/// Give `user_id` the first catalogue character of `rarity`. Returns the ownership id.
pub async fn give_character(pool: &PgPool, user_id: DbId, rarity: i32) -> DbId {
    let character = CharacterRepo::list_by_rarity(pool, rarity)
        .await
        .unwrap()
        .remove(0);
    UserCharacterRepo::create(pool, user_id, character.id)
        .await
        .unwrap()
        .id
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: &serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::POST, uri, None, &body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, token: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::POST, uri, Some(token), &body)).await
}

pub async fn patch_json_auth(app: Router, uri: &str, token: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::PATCH, uri, Some(token), &body)).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
