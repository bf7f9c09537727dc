//! API Client

use shop_core::{CheckoutError, ClientToken, OrderDetails, SessionTokenResponse};

/// Absolute URL for a server path (reqwest needs a base in the browser)
fn endpoint(path: &str) -> String {
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| "http://localhost:3000".into());

    format!("{origin}{path}")
}

/// Ask the server for a Primer client session for this order.
///
/// `Ok(None)` means the provider answered without a token.
pub async fn create_client_session(
    details: &OrderDetails,
) -> Result<Option<ClientToken>, CheckoutError> {
    let client = reqwest::Client::new();

    let response = client
        .post(endpoint("/api/client-session"))
        .json(details)
        .send()
        .await
        .map_err(|e| CheckoutError::Session(e.to_string()))?;

    let status = response.status();

    if status.is_success() {
        let data: SessionTokenResponse = response
            .json()
            .await
            .map_err(|e| CheckoutError::Session(e.to_string()))?;
        Ok(data.client_token)
    } else {
        let data: serde_json::Value = response.json().await.unwrap_or_default();
        let message = data["error"]
            .as_str()
            .map_or_else(|| format!("HTTP {status}"), str::to_string);
        Err(CheckoutError::Session(message))
    }
}
