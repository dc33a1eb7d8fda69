//! Upstream provider abstraction
//!
//! The handler talks to the inference API through this trait so it can be
//! driven by a fake in tests.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AppResult;
use crate::proxy::RequestContext;
use crate::types::ChatCompletionPayload;

/// Interface for chat-completion backends
///
/// # Security
///
/// Implementations MUST:
/// - Never forward client headers to the upstream
/// - Authenticate with the server-held credential only
/// - Never log or echo the credential
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Get the provider name for logging
    fn name(&self) -> &'static str;

    /// Chat completions (non-streaming)
    ///
    /// Sends exactly one request upstream and returns the upstream JSON body
    /// untouched. A non-success upstream status becomes `AppError::Upstream`.
    async fn chat_completions(
        &self,
        payload: &ChatCompletionPayload,
        ctx: &RequestContext,
    ) -> AppResult<Value>;
}
