use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use crunch_core::types::DbId;
use crunch_economy::feed;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::extract::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedRequest {
    pub user_character_id: DbId,
}

/// GET /api/v1/characters
///
/// The caller's collection with feed progress per character.
pub async fn collection(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let owned = feed::collection(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: owned }))
}

/// POST /api/v1/characters/feed
pub async fn feed(
    user: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<FeedRequest>,
) -> AppResult<impl IntoResponse> {
    let outcome = feed::execute_feed(&state.pool, user.user_id, input.user_character_id).await?;
    Ok(Json(DataResponse { data: outcome }))
}
