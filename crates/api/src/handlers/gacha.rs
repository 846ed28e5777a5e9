//! Handlers for the gacha: rate disclosure, banners, status and pulls.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use crunch_economy::gacha::{self, PullRequest};

use crate::error::AppResult;
use crate::handlers::request_rng;
use crate::middleware::auth::AuthUser;
use crate::middleware::extract::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/gacha/rates
pub async fn rates() -> impl IntoResponse {
    Json(DataResponse {
        data: gacha::rates(),
    })
}

/// GET /api/v1/gacha/banners
pub async fn active_banners(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let banners = gacha::active_banners(&state.pool, Utc::now()).await?;
    Ok(Json(DataResponse { data: banners }))
}

/// GET /api/v1/gacha/status
pub async fn pull_status(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let status = gacha::pull_status(&state.pool, user.user_id, Utc::now()).await?;
    Ok(Json(DataResponse { data: status }))
}

/// POST /api/v1/gacha/pull
///
/// Runs the welcome pull instead when the caller owns no characters.
pub async fn pull(
    user: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<PullRequest>,
) -> AppResult<impl IntoResponse> {
    let mut rng = request_rng();
    let outcome =
        gacha::execute_pull(&state.pool, &mut rng, user.user_id, &input, Utc::now()).await?;
    Ok(Json(DataResponse { data: outcome }))
}
