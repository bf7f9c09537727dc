//! Primer API Configuration

use std::fmt;
use std::time::Duration;

use crate::error::{PaymentError, Result};

/// Sandbox client-session endpoint
pub const SANDBOX_API_URL: &str = "https://api.sandbox.primer.io/client-session";

/// API version the request body is written against
pub const API_VERSION: &str = "2.2";

/// Primer client configuration
#[derive(Clone)]
pub struct PrimerConfig {
    /// Client-session endpoint
    pub api_url: String,

    /// Sent as `X-API-VERSION`
    pub api_version: String,

    /// Secret API key, sent as `X-API-KEY`. Never leaves the server.
    pub api_key: String,

    /// Request timeout
    pub timeout: Duration,
}

impl PrimerConfig {
    /// Sandbox configuration with the given key
    pub fn sandbox(api_key: impl Into<String>) -> Self {
        Self {
            api_url: SANDBOX_API_URL.into(),
            api_version: API_VERSION.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("PRIMER_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| PaymentError::Config("PRIMER_API_KEY not set".into()))?;

        let mut config = Self::sandbox(api_key);

        if let Ok(url) = std::env::var("PRIMER_API_URL") {
            config.api_url = url;
        }
        if let Ok(version) = std::env::var("PRIMER_API_VERSION") {
            config.api_version = version;
        }
        if let Some(secs) = std::env::var("PRIMER_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

impl fmt::Debug for PrimerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrimerConfig")
            .field("api_url", &self.api_url)
            .field("api_version", &self.api_version)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}
