//! Primer Client Sessions
//!
//! Builds the client-session request for an order and exchanges it for the
//! short-lived token the Universal Checkout widget needs.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};

use shop_core::{ClientToken, CurrencyCode, Metadata, OrderAmount, OrderDetails, Product};

use crate::config::PrimerConfig;
use crate::error::{PaymentError, Result};

/// Order id attached to every demo session
pub const ORDER_ID: &str = "order-123";

/// Country the demo order ships to
pub const COUNTRY_CODE: &str = "GB";

/// Anything that can hand out client session tokens (Strategy pattern)
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Create a session for the order.
    ///
    /// `Ok(None)` means the provider answered but sent no token; callers
    /// treat that as a failure.
    async fn create_client_session(&self, details: &OrderDetails) -> Result<Option<ClientToken>>;

    /// Provider name
    fn name(&self) -> &str;
}

// ============================================================================
// Request / Response Bodies
// ============================================================================

/// `POST /client-session` body
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSessionRequest {
    pub order_id: String,
    pub currency_code: CurrencyCode,
    pub amount: OrderAmount,
    pub order: OrderSection,
    pub customer: CustomerSection,
    pub metadata: Metadata,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSection {
    pub line_items: Vec<LineItem>,
    pub country_code: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub item_id: String,
    pub description: String,
    pub amount: OrderAmount,
    pub quantity: u32,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSection {
    pub first_name: String,
    pub last_name: String,
    pub billing_address: Address,
    pub shipping_address: Address,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub first_name: String,
    pub last_name: String,
    pub address_line1: String,
}

impl ClientSessionRequest {
    /// One t-shirt, shipped to GB, billed and shipped to the same address
    pub fn for_order(details: &OrderDetails) -> Self {
        let customer = &details.customer;
        let address = Address {
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            address_line1: customer.address.clone(),
        };

        Self {
            order_id: ORDER_ID.into(),
            currency_code: details.currency_code.clone(),
            amount: details.amount,
            order: OrderSection {
                line_items: vec![LineItem {
                    item_id: Product::T_SHIRT.item_id.into(),
                    description: Product::T_SHIRT.description.into(),
                    amount: details.amount,
                    quantity: 1,
                }],
                country_code: COUNTRY_CODE.into(),
            },
            customer: CustomerSection {
                first_name: customer.first_name.clone(),
                last_name: customer.last_name.clone(),
                billing_address: address.clone(),
                shipping_address: address,
            },
            metadata: details.metadata.clone(),
        }
    }
}

/// The parts of the client-session response we read
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSessionResponse {
    #[serde(default)]
    pub client_token: Option<String>,

    #[serde(default)]
    pub client_token_expiration_date: Option<String>,
}

impl ClientSessionResponse {
    pub fn into_token(self) -> Option<ClientToken> {
        self.client_token
            .filter(|t| !t.is_empty())
            .map(ClientToken::new)
    }
}

// ============================================================================
// Primer Client
// ============================================================================

/// Primer REST client
#[derive(Debug)]
pub struct PrimerClient {
    http: reqwest::Client,
    config: PrimerConfig,
}

impl PrimerClient {
    /// Create a new client
    pub fn new(config: PrimerConfig) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(PrimerConfig::from_env()?)
    }

    pub const fn config(&self) -> &PrimerConfig {
        &self.config
    }
}

#[async_trait]
impl SessionProvider for PrimerClient {
    async fn create_client_session(&self, details: &OrderDetails) -> Result<Option<ClientToken>> {
        let body = ClientSessionRequest::for_order(details);

        tracing::info!(
            currency = %body.currency_code,
            amount = %body.amount,
            metadata_keys = body.metadata.len(),
            "Creating client session"
        );

        let response = self
            .http
            .post(&self.config.api_url)
            .header(ACCEPT, "application/json")
            .header("X-API-VERSION", &self.config.api_version)
            .header("X-API-KEY", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        tracing::debug!(%status, body = %text, "Client session response");

        if !status.is_success() {
            return Err(PaymentError::Provider {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: ClientSessionResponse = serde_json::from_str(&text)?;
        let expires_at = parsed.client_token_expiration_date.clone();
        let token = parsed.into_token();

        match (&token, expires_at) {
            (Some(_), Some(expires_at)) => tracing::info!(%expires_at, "Client session created"),
            (Some(_), None) => tracing::info!("Client session created"),
            (None, _) => tracing::warn!("Client session response carried no clientToken"),
        }

        Ok(token)
    }

    fn name(&self) -> &str {
        "Primer"
    }
}
