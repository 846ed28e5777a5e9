//! Profile and daily login handlers.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use crunch_economy::{daily_login, profile};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::extract::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateUsername {
    pub username: String,
}

/// GET /api/v1/user/me
pub async fn me(user: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let me = profile::me(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: me }))
}

/// PATCH /api/v1/user/username
pub async fn update_username(
    user: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<UpdateUsername>,
) -> AppResult<impl IntoResponse> {
    let updated = profile::update_username(&state.pool, user.user_id, &input.username).await?;

    tracing::info!(user_id = user.user_id, username = ?updated.username, "Username updated");

    Ok(Json(DataResponse { data: updated }))
}

/// GET /api/v1/user/daily-login
pub async fn daily_login_status(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let status = daily_login::status(&state.pool, user.user_id, Utc::now()).await?;
    Ok(Json(DataResponse { data: status }))
}

/// POST /api/v1/user/daily-login
pub async fn claim_daily_login(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let outcome = daily_login::claim(&state.pool, user.user_id, Utc::now()).await?;
    Ok(Json(DataResponse { data: outcome }))
}
