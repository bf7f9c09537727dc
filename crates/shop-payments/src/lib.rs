//! # shop-payments
//!
//! Server-side Primer integration for the limited shop.
//!
//! ## Flow
//!
//! ```text
//! ┌─────────────┐  OrderDetails  ┌─────────────┐  client-session  ┌──────────┐
//! │  Storefront │───────────────▶│ shop-server │─────────────────▶│  Primer  │
//! │  (browser)  │◀───────────────│  (API key)  │◀─────────────────│   API    │
//! └─────────────┘   clientToken  └─────────────┘    clientToken   └──────────┘
//!        │
//!        └──▶ Primer.showUniversalCheckout(clientToken, { container, ... })
//! ```
//!
//! The API key stays on the server; the browser only ever sees the
//! short-lived client token.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shop_payments::{PrimerClient, SessionProvider};
//! use shop_core::OrderForm;
//!
//! let client = PrimerClient::from_env()?;
//! let token = client.create_client_session(&OrderForm::new().details()).await?;
//! ```

mod config;
mod error;
mod mock;
mod session;

pub use config::{API_VERSION, PrimerConfig, SANDBOX_API_URL};
#[cfg(feature = "axum-handlers")]
pub use error::ErrorBody;
pub use error::{PaymentError, Result};
pub use mock::MockSessionProvider;
pub use session::{
    COUNTRY_CODE, ClientSessionRequest, ClientSessionResponse, ORDER_ID, PrimerClient,
    SessionProvider,
};
