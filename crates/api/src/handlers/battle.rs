use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use crunch_core::types::DbId;
use crunch_economy::battle;
use serde::Deserialize;

use crate::error::AppResult;
use crate::handlers::request_rng;
use crate::middleware::auth::AuthUser;
use crate::middleware::extract::{AppJson, AppQuery};
use crate::rate_limit::RateLimiter;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleRequest {
    #[serde(default)]
    pub buzzword_id: Option<DbId>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<i64>,
}

/// POST /api/v1/battle
///
/// Throttled per user before any economy work happens.
pub async fn start_battle(
    user: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<BattleRequest>,
) -> AppResult<impl IntoResponse> {
    state
        .battle_limiter
        .check(&RateLimiter::battle_key(user.user_id))
        .await?;

    let mut rng = request_rng();
    let outcome = battle::execute_battle(
        &state.pool,
        &mut rng,
        user.user_id,
        input.buzzword_id,
        Utc::now(),
    )
    .await?;
    Ok(Json(DataResponse { data: outcome }))
}

/// GET /api/v1/battle/history?limit=
pub async fn history(
    user: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<HistoryParams>,
) -> AppResult<impl IntoResponse> {
    let battles = battle::battle_history(&state.pool, user.user_id, params.limit).await?;
    Ok(Json(DataResponse { data: battles }))
}
