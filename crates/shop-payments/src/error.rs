//! Payment Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Payment-related errors
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Request never produced a response (DNS, TLS, timeout, ...)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("Provider returned {status}: {body}")]
    Provider { status: u16, body: String },

    /// Response body was not the JSON we expected
    #[error("Response decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PaymentError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::Provider { status, .. } => *status >= 500 || *status == 429,
            Self::Decode(_) | Self::Config(_) => false,
        }
    }

    /// Get user-friendly message
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Config(_) => "Payments are not configured.",
            _ => "Error fetching client session",
        }
    }

    /// Machine-readable error code for API responses
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "PAYMENTS_DISABLED",
            _ => "SESSION_ERROR",
        }
    }
}

#[cfg(feature = "axum-handlers")]
mod handlers {
    use axum::{
        Json,
        http::StatusCode,
        response::{IntoResponse, Response},
    };
    use serde::Serialize;

    use super::PaymentError;

    /// JSON error body
    #[derive(Debug, Serialize)]
    pub struct ErrorBody {
        pub error: String,
        pub code: String,
    }

    impl PaymentError {
        pub const fn status_code(&self) -> StatusCode {
            match self {
                Self::Config(_) => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::BAD_GATEWAY,
            }
        }
    }

    impl IntoResponse for PaymentError {
        fn into_response(self) -> Response {
            match &self {
                Self::Config(_) => tracing::warn!(error = %self, "Payments disabled"),
                _ => tracing::error!(error = %self, "Client session request failed"),
            }

            let body = ErrorBody {
                error: self.user_message().into(),
                code: self.code().into(),
            };

            (self.status_code(), Json(body)).into_response()
        }
    }
}

#[cfg(feature = "axum-handlers")]
pub use handlers::ErrorBody;
