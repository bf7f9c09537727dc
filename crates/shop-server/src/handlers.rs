//! HTTP Handlers

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::Instrument;

use shop_core::{OrderDetails, SessionTokenResponse};
use shop_payments::PaymentError;

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub payments_configured: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        payments_configured: state.sessions.is_some(),
    })
}

/// Exchange the storefront form for a Primer client token.
///
/// The API key never leaves this process; the browser only gets the token.
pub async fn create_client_session(
    State(state): State<AppState>,
    Json(details): Json<OrderDetails>,
) -> Result<Json<SessionTokenResponse>, PaymentError> {
    let provider = state
        .sessions
        .as_ref()
        .ok_or_else(|| PaymentError::Config("PRIMER_API_KEY not set".into()))?;

    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("client_session", %request_id, provider = provider.name());

    let client_token = provider
        .create_client_session(&details)
        .instrument(span)
        .await
        .inspect_err(|e| {
            tracing::warn!(
                %request_id,
                code = e.code(),
                retryable = e.is_retryable(),
                error = %e,
                "Client session failed"
            );
        })?;

    Ok(Json(SessionTokenResponse { client_token }))
}
