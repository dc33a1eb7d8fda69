//! Chat completions proxy endpoint
//!
//! Accepts a client chat request, fills in the server-side defaults, and relays
//! it to the upstream with the server-held credential.

use std::sync::Arc;

use axum::{
    extract::{rejection::BytesRejection, OriginalUri, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    proxy::RequestContext,
    types::{ChatCompletionPayload, CompletionRequest},
    AppState,
};

/// Completion proxy handler
///
/// - `OPTIONS` answers the cross-origin pre-flight with 204 and no body
/// - `POST` is forwarded upstream, one outbound call per request
/// - anything else is 405
///
/// The body is taken as raw bytes, and a failed read (including one over the
/// size limit) is kept as a value, so every failure is reported through
/// `AppError` rather than an extractor rejection.
pub async fn completion_proxy(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    if method == Method::OPTIONS {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    if method != Method::POST {
        return Err(AppError::MethodNotAllowed);
    }

    let ctx = RequestContext::new(state.provider.name(), uri.path())
        .with_model(&state.config.model);
    ctx.log_request_start();

    let result = match body {
        Ok(body) => forward(&state, &ctx, &body).await,
        Err(rejection) => Err(AppError::Internal(anyhow::anyhow!(rejection.body_text()))),
    };

    match result {
        Ok(data) => {
            ctx.log_request_complete();
            Ok((StatusCode::OK, Json(data)).into_response())
        }
        Err(err) => {
            ctx.log_failure(&err);
            Err(err)
        }
    }
}

async fn forward(state: &AppState, ctx: &RequestContext, body: &[u8]) -> AppResult<Value> {
    let request: CompletionRequest = serde_json::from_slice(body)?;

    if state.config.validate_messages {
        request.validate_messages().map_err(AppError::BadRequest)?;
    }

    let payload = ChatCompletionPayload::from_request(request, &state.config.model);
    state.provider.chat_completions(&payload, ctx).await
}
