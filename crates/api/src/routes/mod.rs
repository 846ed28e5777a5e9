pub mod achievements;
pub mod battle;
pub mod buzzwords;
pub mod characters;
pub mod events;
pub mod gacha;
pub mod health;
pub mod leaderboard;
pub mod payments;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /gacha/rates                 GET   public
/// /gacha/banners               GET   public
/// /gacha/status                GET
/// /gacha/pull                  POST
///
/// /battle                      POST  rate limited per user
/// /battle/history              GET
///
/// /characters                  GET
/// /characters/feed             POST
///
/// /buzzwords                   GET
/// /buzzwords/buy               POST
///
/// /leaderboard                 GET   public
/// /leaderboard/me              GET
///
/// /achievements                GET
/// /achievements/check          POST
///
/// /events                      GET   public
///
/// /user/me                     GET
/// /user/username               PATCH
/// /user/daily-login            GET, POST
///
/// /payments/packages           GET   public
/// /payments/checkout           POST
/// /payments/transactions       GET
/// /payments/webhook            POST  signed by the gateway
/// ```
///
/// Routes not marked otherwise require a Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/gacha", gacha::router())
        .nest("/battle", battle::router())
        .nest("/characters", characters::router())
        .nest("/buzzwords", buzzwords::router())
        .nest("/leaderboard", leaderboard::router())
        .nest("/achievements", achievements::router())
        .nest("/events", events::router())
        .nest("/user", user::router())
        .nest("/payments", payments::router())
}
