//! Handlers for coin packages, checkouts and the gateway webhook.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use crunch_core::error::CoreError;
use crunch_core::payments::{verify_signature, WebhookEvent, SIGNATURE_HEADER};
use crunch_economy::payments;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::extract::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub package_id: String,
}

/// GET /api/v1/payments/packages
pub async fn packages() -> impl IntoResponse {
    Json(DataResponse {
        data: payments::packages(),
    })
}

/// POST /api/v1/payments/checkout
///
/// Records a pending transaction; the gateway session is created client-side.
pub async fn checkout(
    user: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CheckoutRequest>,
) -> AppResult<impl IntoResponse> {
    let transaction =
        payments::create_checkout(&state.pool, user.user_id, &input.package_id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: transaction })))
}

/// GET /api/v1/payments/transactions
pub async fn transactions(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let history = payments::transactions(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: history }))
}

/// POST /api/v1/payments/webhook
///
/// The signature covers the raw body, so it is checked before parsing.
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| CoreError::Unauthorized("Missing payment signature".to_string()))?;

    verify_signature(
        &state.config.payment_webhook_secret,
        signature,
        &body,
        chrono::Utc::now().timestamp(),
        state.config.payment_webhook_tolerance_secs,
    )
    .inspect_err(|e| tracing::warn!(error = %e, "Webhook signature rejected"))?;

    let event: WebhookEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Malformed webhook payload: {e}")))?;

    let outcome = payments::handle_webhook(&state.pool, &event).await?;
    Ok(Json(DataResponse { data: outcome }))
}
