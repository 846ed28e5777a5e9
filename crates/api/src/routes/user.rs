use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Profile routes mounted at `/user`.
///
/// ```text
/// GET   /me           -> me
/// PATCH /username     -> update_username
/// GET   /daily-login  -> daily_login_status
/// POST  /daily-login  -> claim_daily_login
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(user::me))
        .route("/username", patch(user::update_username))
        .route(
            "/daily-login",
            get(user::daily_login_status).post(user::claim_daily_login),
        )
}
