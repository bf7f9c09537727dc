//! Application State

use std::sync::Arc;

use shop_payments::SessionProvider;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Client session provider (None if payments are not configured)
    pub sessions: Option<Arc<dyn SessionProvider>>,
}

impl AppState {
    pub fn new(sessions: Option<Arc<dyn SessionProvider>>) -> Self {
        Self { sessions }
    }
}
