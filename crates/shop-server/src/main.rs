//! limited-shop HTTP Server
//!
//! Axum-based server that serves the storefront bundle and proxies client
//! session creation to Primer, so the secret API key never reaches the
//! browser.

mod config;
mod handlers;
mod state;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shop_payments::{MockSessionProvider, PrimerClient, SessionProvider};

use crate::config::ServerConfig;
use crate::handlers::{create_client_session, health_check};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    let state = AppState::new(session_provider(&config));

    let app = app(state, &config.static_dir);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🛍  limited-shop running on http://{}", config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health             - Health check");
    tracing::info!("  POST /api/client-session - Create Primer client session");
    tracing::info!("  GET  /*                  - Storefront ({})", config.static_dir);
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Pick the session provider: Primer if a key is set, else the mock if a
/// token is set, else none (payments disabled).
fn session_provider(config: &ServerConfig) -> Option<Arc<dyn SessionProvider>> {
    match PrimerClient::from_env() {
        Ok(client) => {
            tracing::info!(api_url = %client.config().api_url, "✓ Primer configured");
            Some(Arc::new(client))
        }
        Err(e) => match &config.mock_token {
            Some(token) => {
                tracing::warn!("⚠ {} - using mock session provider", e);
                Some(Arc::new(MockSessionProvider::new(token.clone())))
            }
            None => {
                tracing::warn!("⚠ Primer not configured - payments disabled");
                tracing::warn!("  Set PRIMER_API_KEY in .env");
                None
            }
        },
    }
}

/// Build the router
pub fn app(state: AppState, static_dir: &str) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health
        .route("/health", get(health_check))
        // Payments
        .route("/api/client-session", post(create_client_session))
        // Static files (WASM storefront)
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
