//! Request logging for the completion proxy
//!
//! Structured log lines with a short correlation id so one request can be
//! followed from arrival through the upstream hop to the reply.

use std::time::Instant;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::error::AppError;

/// Context for tracking a request through the proxy
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique identifier for this request (for log correlation)
    pub trace_id: String,
    /// When the request started
    pub start_time: Instant,
    /// Upstream provider handling this request
    pub provider: String,
    /// Inbound path the request arrived on
    pub path: String,
    /// Model being requested upstream
    pub model: Option<String>,
}

impl RequestContext {
    pub fn new(provider: &str, path: &str) -> Self {
        Self {
            trace_id: Uuid::new_v4().simple().to_string()[..8].to_string(),
            start_time: Instant::now(),
            provider: provider.to_string(),
            path: path.to_string(),
            model: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u128 {
        self.start_time.elapsed().as_millis()
    }

    pub fn log_request_start(&self) {
        info!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            path = %self.path,
            model = ?self.model,
            "Request started"
        );
    }

    pub fn log_upstream_request(&self, url: &str) {
        debug!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            url = %url,
            elapsed_ms = %self.elapsed_ms(),
            "Sending request to upstream"
        );
    }

    pub fn log_upstream_response(&self, status: u16) {
        info!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            status = %status,
            elapsed_ms = %self.elapsed_ms(),
            "Response received from upstream"
        );
    }

    /// Log an upstream refusal together with the raw body it sent back
    pub fn log_upstream_error(&self, status: u16, details: &str) {
        error!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            status = %status,
            details = %details,
            elapsed_ms = %self.elapsed_ms(),
            "Upstream API error"
        );
    }

    pub fn log_request_complete(&self) {
        info!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            path = %self.path,
            model = ?self.model,
            elapsed_ms = %self.elapsed_ms(),
            "Request completed successfully"
        );
    }

    /// Log a failed request at a level matching how surprising the failure is
    pub fn log_failure(&self, err: &AppError) {
        match err {
            // already logged with its body where it happened
            AppError::Upstream { .. } => {}
            err if err.is_internal() => error!(
                trace_id = %self.trace_id,
                provider = %self.provider,
                path = %self.path,
                elapsed_ms = %self.elapsed_ms(),
                error = %err,
                "Request failed"
            ),
            err => warn!(
                trace_id = %self.trace_id,
                provider = %self.provider,
                path = %self.path,
                status = %err.status().as_u16(),
                error = %err,
                "Request rejected"
            ),
        }
    }
}
