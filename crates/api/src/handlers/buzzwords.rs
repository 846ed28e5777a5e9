use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use crunch_core::types::DbId;
use crunch_economy::buzzwords;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::extract::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyRequest {
    pub buzzword_id: DbId,
}

/// GET /api/v1/buzzwords
pub async fn list(user: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let shop = buzzwords::list(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: shop }))
}

/// POST /api/v1/buzzwords/buy
pub async fn buy(
    user: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<BuyRequest>,
) -> AppResult<impl IntoResponse> {
    let outcome = buzzwords::buy(&state.pool, user.user_id, input.buzzword_id).await?;
    Ok(Json(DataResponse { data: outcome }))
}
