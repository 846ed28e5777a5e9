use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use crunch_core::leaderboard::{validate_public_limit, Category};
use crunch_economy::leaderboard;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::extract::AppQuery;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BoardParams {
    #[serde(default)]
    pub category: Category,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct RankParams {
    #[serde(default)]
    pub category: Category,
}

/// GET /api/v1/leaderboard?category=&limit=
///
/// `limit` must be within `1..=100` here; the default is 50.
pub async fn board(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<BoardParams>,
) -> AppResult<impl IntoResponse> {
    let limit = validate_public_limit(params.limit)?;
    let board = leaderboard::get_leaderboard(&state.pool, params.category, Some(limit)).await?;
    Ok(Json(DataResponse { data: board }))
}

/// GET /api/v1/leaderboard/me?category=
pub async fn my_rank(
    user: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<RankParams>,
) -> AppResult<impl IntoResponse> {
    let rank = leaderboard::user_rank(&state.pool, user.user_id, params.category).await?;
    Ok(Json(DataResponse { data: rank }))
}
