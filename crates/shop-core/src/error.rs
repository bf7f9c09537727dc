//! Error Types

use thiserror::Error;

/// Result type alias for storefront operations
pub type Result<T> = std::result::Result<T, CheckoutError>;

/// Storefront error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// Session request failed (network, provider or decode error)
    #[error("Session request failed: {0}")]
    Session(String),

    /// Session request succeeded but carried no client token
    #[error("Session response did not contain a client token")]
    MissingToken,

    /// Checkout widget refused to mount
    #[error("Checkout widget failed to mount: {0}")]
    Mount(String),

    /// Amount could not be parsed or is negative
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

impl CheckoutError {
    /// Message shown to the buyer in a toast
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Session(_) => "Error fetching client session",
            Self::MissingToken => "Error fetching client token",
            Self::Mount(_) => "Error initializing checkout",
            Self::InvalidAmount(_) => "Please enter a valid amount",
        }
    }
}
