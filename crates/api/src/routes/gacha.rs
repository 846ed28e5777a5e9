use axum::routing::{get, post};
use axum::Router;

use crate::handlers::gacha;
use crate::state::AppState;

/// Gacha routes mounted at `/gacha`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/rates", get(gacha::rates))
        .route("/banners", get(gacha::active_banners))
        .route("/status", get(gacha::pull_status))
        .route("/pull", post(gacha::pull))
}
