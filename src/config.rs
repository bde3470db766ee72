use crate::i18n::NegotiationStrategy;
use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Application
    pub app_name: String,
    pub app_version: String,

    // Server
    pub host: String,
    pub port: u16,

    // Localization
    pub locales_dir: String,
    pub negotiation: NegotiationStrategy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Application
            app_name: std::env::var("APP_NAME").unwrap_or_else(|_| "localized-api".to_string()),
            app_version: std::env::var("APP_VERSION")
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string()),

            // Server
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),

            // Localization
            locales_dir: std::env::var("LOCALES_DIR").unwrap_or_else(|_| "locales".to_string()),
            negotiation: match std::env::var("ACCEPT_LANGUAGE_MODE") {
                Ok(mode) => mode
                    .parse()
                    .context("ACCEPT_LANGUAGE_MODE is invalid")?,
                Err(_) => NegotiationStrategy::default(),
            },
        })
    }

    /// Socket address the server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
