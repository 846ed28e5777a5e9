use axum::routing::get;
use axum::Router;

use crate::handlers::leaderboard;
use crate::state::AppState;

/// Leaderboard routes mounted at `/leaderboard`.
///
/// ```text
/// GET /    ?category=&limit=  -> board (public)
/// GET /me  ?category=         -> my_rank
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(leaderboard::board))
        .route("/me", get(leaderboard::my_rank))
}
