use axum::routing::{get, post};
use axum::Router;

use crate::handlers::characters;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(characters::collection))
        .route("/feed", post(characters::feed))
}
