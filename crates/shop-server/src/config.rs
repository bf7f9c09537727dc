//! Server Configuration

/// Settings read from the environment (and `.env`)
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind_addr: String,

    /// Directory holding the built storefront (index.html + WASM bundle)
    pub static_dir: String,

    /// Token handed out by the mock provider when no API key is set
    pub mock_token: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".into(),
            static_dir: "static".into(),
            mock_token: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            static_dir: std::env::var("STATIC_DIR").unwrap_or(defaults.static_dir),
            mock_token: std::env::var("PRIMER_MOCK_TOKEN")
                .ok()
                .filter(|t| !t.is_empty()),
        }
    }
}
