use axum::routing::{get, post};
use axum::Router;

use crate::handlers::payments;
use crate::state::AppState;

/// Payment routes mounted at `/payments`.
///
/// The webhook authenticates with a `payment-signature` header instead of
/// a Bearer token.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/packages", get(payments::packages))
        .route("/checkout", post(payments::checkout))
        .route("/transactions", get(payments::transactions))
        .route("/webhook", post(payments::webhook))
}
