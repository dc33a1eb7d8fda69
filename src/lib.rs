//! typhoon-proxy - chat-completion proxy for the OpenTyphoon API
//!
//! Clients post chat requests without any credential; the proxy merges them
//! with server-side defaults, attaches the server-held API key, and relays
//! the upstream answer with permissive cross-origin headers.

pub mod config;
pub mod error;
pub mod proxy;
pub mod routes;
pub mod types;

use std::sync::Arc;

use anyhow::Result;

pub use crate::config::Config;
pub use crate::error::{AppError, AppResult};
pub use crate::proxy::{ChatProvider, OpenTyphoonProvider};

/// Application state shared across all request handlers
pub struct AppState {
    pub config: Config,
    /// Upstream the completion handler forwards to
    pub provider: Arc<dyn ChatProvider>,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config) -> Result<Self> {
        // No request timeout: the transport defaults apply to the upstream hop
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(100)
            .build()?;

        let provider: Arc<dyn ChatProvider> =
            Arc::new(OpenTyphoonProvider::new(http_client, &config));

        Ok(Self::with_provider(config, provider))
    }

    /// Create an application state around an already-built provider
    pub fn with_provider(config: Config, provider: Arc<dyn ChatProvider>) -> Self {
        Self { config, provider }
    }
}
