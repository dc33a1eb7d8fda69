//! Configuration management for the proxy
//!
//! Configuration is loaded from environment variables. The upstream credential
//! lives here and is handed to the provider at start-up, so the request path
//! never reads the environment.

use anyhow::{Context, Result};
use std::env;
use std::fmt;

/// Default upstream base URL
pub const DEFAULT_UPSTREAM_URL: &str = "https://api.opentyphoon.ai/v1";

/// Default model identifier sent upstream
pub const DEFAULT_MODEL: &str = "typhoon-v2.5-30b-a3b-instruct";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// OpenTyphoon API base URL
    pub upstream_url: String,
    /// OpenTyphoon API key. `None` when unset or empty.
    pub api_key: Option<String>,
    /// Model identifier placed in every outbound payload
    pub model: String,

    /// Reject requests whose `messages` is not a well-formed message list
    pub validate_messages: bool,

    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => anyhow::bail!("Invalid LOG_FORMAT: {other}"),
        };

        Ok(Self {
            host: lookup("PROXY_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PROXY_PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("Invalid PROXY_PORT")?,

            upstream_url: lookup("OPENTYPHOON_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string()),
            api_key: lookup("OPENTYPHOON_API_KEY").filter(|key| !key.is_empty()),
            model: lookup("OPENTYPHOON_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),

            validate_messages: lookup("PROXY_VALIDATE_MESSAGES")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),

            log_format,
        })
    }

    /// Configuration pointing at a given upstream, everything else defaulted
    pub fn for_upstream(upstream_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            upstream_url: upstream_url.into(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
            validate_messages: false,
            log_format: LogFormat::Text,
        }
    }
}

// Hand-written so the credential never ends up in a log line.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("upstream_url", &self.upstream_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("validate_messages", &self.validate_messages)
            .field("log_format", &self.log_format)
            .finish()
    }
}
