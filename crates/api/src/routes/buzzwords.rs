use axum::routing::{get, post};
use axum::Router;

use crate::handlers::buzzwords;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(buzzwords::list))
        .route("/buy", post(buzzwords::buy))
}
