//! Mock Session Provider
//!
//! For tests and offline demos. Hands out a fixed token and remembers every
//! order it was asked about.

use async_trait::async_trait;
use tokio::sync::Mutex;

use shop_core::{ClientToken, OrderDetails};

use crate::error::{PaymentError, Result};
use crate::session::SessionProvider;

/// What the mock answers with
#[derive(Clone, Debug)]
enum Reply {
    Token(ClientToken),
    NoToken,
    Fail(u16),
}

/// Mock provider with a canned reply
#[derive(Debug)]
pub struct MockSessionProvider {
    reply: Reply,
    requests: Mutex<Vec<OrderDetails>>,
}

impl MockSessionProvider {
    /// Always return `token`
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_reply(Reply::Token(ClientToken::new(token)))
    }

    /// Succeed, but without a token
    pub fn without_token() -> Self {
        Self::with_reply(Reply::NoToken)
    }

    /// Fail as if the provider answered with `status`
    pub fn failing(status: u16) -> Self {
        Self::with_reply(Reply::Fail(status))
    }

    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Orders seen so far, oldest first
    pub async fn requests(&self) -> Vec<OrderDetails> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl SessionProvider for MockSessionProvider {
    async fn create_client_session(&self, details: &OrderDetails) -> Result<Option<ClientToken>> {
        self.requests.lock().await.push(details.clone());

        match &self.reply {
            Reply::Token(token) => Ok(Some(token.clone())),
            Reply::NoToken => Ok(None),
            Reply::Fail(status) => Err(PaymentError::Provider {
                status: *status,
                body: "mock failure".into(),
            }),
        }
    }

    fn name(&self) -> &str {
        "Mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_requests() {
        let provider = MockSessionProvider::new("tok");

        let token = provider
            .create_client_session(&OrderDetails::default())
            .await
            .unwrap();

        assert_eq!(token.as_ref().map(ClientToken::as_str), Some("tok"));
        assert_eq!(provider.requests().await.len(), 1);
    }

    #[tokio::test]
    async fn test_failing_reply() {
        let provider = MockSessionProvider::failing(500);
        let err = provider
            .create_client_session(&OrderDetails::default())
            .await
            .unwrap_err();

        assert!(err.is_retryable());
    }
}
