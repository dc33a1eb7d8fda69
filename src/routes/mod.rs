//! HTTP routes for the proxy
//!
//! The completion handler is the router's catch-all: it answers every path
//! and decides by method.

pub mod completion;

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, http::HeaderValue, Router};
use tower::ServiceBuilder;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::{proxy::headers::CORS_HEADERS, AppState};

/// Largest request body accepted, matching the serverless platform's cap
pub const MAX_BODY_BYTES: usize = 6 * 1024 * 1024;

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let [origin, headers, methods] = CORS_HEADERS.map(|(name, value)| {
        SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value))
    });

    Router::new()
        .fallback(completion::completion_proxy)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(origin)
                .layer(headers)
                .layer(methods),
        )
        .with_state(state)
}
