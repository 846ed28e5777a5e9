use axum::routing::{get, post};
use axum::Router;

use crate::handlers::battle;
use crate::state::AppState;

/// Battle routes mounted at `/battle`.
///
/// ```text
/// POST /         -> start_battle
/// GET  /history  -> history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(battle::start_battle))
        .route("/history", get(battle::history))
}
