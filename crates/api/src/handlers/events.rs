use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use crunch_economy::events;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/events
pub async fn active(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let active = events::active_events(&state.pool, Utc::now()).await?;
    Ok(Json(DataResponse { data: active }))
}
