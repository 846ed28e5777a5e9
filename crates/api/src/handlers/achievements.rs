use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use crunch_economy::achievements;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/achievements
pub async fn list(user: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let views = achievements::list(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: views }))
}

/// POST /api/v1/achievements/check
///
/// Grants and pays out every newly earned achievement.
pub async fn check(user: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let outcome = achievements::check(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: outcome }))
}
