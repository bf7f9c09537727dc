//! Checkout Flow
//!
//! Drives the storefront from "no session" to a mounted checkout widget.
//!
//! ```text
//! Uninitialized ─▶ SessionRequested ─┬─▶ TokenReceived ─┬─▶ Mounted ─▶ Completed
//!                                    │                  └─▶ NotMounted
//!                                    └─▶ Failed
//! ```
//!
//! The flow never performs I/O itself. The caller fetches the session token
//! (however it likes) and reports the outcome back with the [`RequestTicket`]
//! it got from [`CheckoutFlow::begin`]. The widget is reached through the
//! [`CheckoutWidget`] trait.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CheckoutError, Result};

/// Selector the hosted checkout is mounted into
pub const CHECKOUT_CONTAINER: &str = "#checkout-container #checkout";

/// Opaque client session token issued by the payment provider
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientToken(String);

impl ClientToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClientToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.0.chars().take(6).collect();
        write!(f, "ClientToken({prefix}…)")
    }
}

/// Body returned by the storefront's session endpoint.
///
/// `client_token` is `None` when the provider answered without one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTokenResponse {
    pub client_token: Option<ClientToken>,
}

/// Options handed to the widget on mount
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MountOptions {
    /// CSS selector of the mount target
    pub container: String,
}

impl Default for MountOptions {
    fn default() -> Self {
        Self {
            container: CHECKOUT_CONTAINER.into(),
        }
    }
}

/// Externally hosted checkout UI.
///
/// Implementations mount the provider's widget and arrange for
/// [`CheckoutFlow::complete`] to be called once the buyer finishes.
pub trait CheckoutWidget {
    fn mount(&self, token: &ClientToken, options: &MountOptions) -> Result<()>;
}

/// Where the page currently is in the checkout lifecycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutState {
    #[default]
    Uninitialized,
    SessionRequested,
    TokenReceived,
    Failed,
    Mounted,
    NotMounted,
    Completed,
}

impl CheckoutState {
    /// Whether the buyer can currently pay in the widget
    pub const fn is_payable(self) -> bool {
        matches!(self, Self::Mounted)
    }
}

/// Identifies one session request; older tickets are stale
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// Toast severity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Transient message for the buyer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    fn from_error(error: &CheckoutError) -> Self {
        Self::error(error.user_message())
    }
}

/// Payment summary reported by the widget on completion
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummary {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub order_id: Option<String>,
}

/// Completion event payload. Not verified with the provider.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutResult {
    #[serde(default)]
    pub payment: Option<PaymentSummary>,
}

/// Checkout state machine for one page
#[derive(Debug, Default)]
pub struct CheckoutFlow {
    state: CheckoutState,
    generation: u64,
    options: MountOptions,
}

impl CheckoutFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn state(&self) -> CheckoutState {
        self.state
    }

    /// Start a session request. Any earlier outstanding request becomes stale.
    pub fn begin(&mut self) -> RequestTicket {
        self.generation += 1;
        self.state = CheckoutState::SessionRequested;

        tracing::debug!(generation = self.generation, "Requesting client session");
        RequestTicket(self.generation)
    }

    /// Feed back the outcome of a session request and mount on success.
    ///
    /// Returns the notice to show, if any. Stale tickets are dropped without
    /// touching state or the widget.
    pub fn session_resolved<W>(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<Option<ClientToken>>,
        widget: &W,
    ) -> Option<Notice>
    where
        W: CheckoutWidget + ?Sized,
    {
        if !self.is_current(ticket) {
            tracing::debug!(?ticket, current = self.generation, "Dropping stale session response");
            return None;
        }

        let token = match outcome.and_then(|token| token.ok_or(CheckoutError::MissingToken)) {
            Ok(token) => token,
            Err(e) => {
                tracing::error!(error = %e, "Client session unavailable");
                self.state = CheckoutState::Failed;
                return Some(Notice::from_error(&e));
            }
        };

        self.state = CheckoutState::TokenReceived;

        match widget.mount(&token, &self.options) {
            Ok(()) => {
                tracing::info!(container = %self.options.container, "Checkout mounted");
                self.state = CheckoutState::Mounted;
                None
            }
            Err(e) => Some(self.fail_mount(&e)),
        }
    }

    /// Report a mount failure that surfaced after [`CheckoutWidget::mount`]
    /// returned, e.g. a rejected promise from the widget SDK.
    pub fn mount_failed(&mut self, ticket: RequestTicket, error: &CheckoutError) -> Option<Notice> {
        if !self.is_current(ticket) {
            return None;
        }
        Some(self.fail_mount(error))
    }

    /// Record the widget's completion callback
    pub fn complete(&mut self, result: &CheckoutResult) -> Notice {
        let payment_id = result.payment.as_ref().and_then(|p| p.id.as_deref());
        tracing::info!(payment_id, "Checkout completed");

        self.state = CheckoutState::Completed;
        Notice::success("Checkout completed")
    }

    const fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.generation
    }

    fn fail_mount(&mut self, error: &CheckoutError) -> Notice {
        tracing::error!(error = %error, "Error initializing checkout");
        self.state = CheckoutState::NotMounted;
        Notice::from_error(error)
    }
}
