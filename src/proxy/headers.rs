//! Header utilities for upstream proxying
//!
//! Outbound requests carry a fixed, minimal header set: client headers are
//! never forwarded to the upstream. Inbound responses all get the same
//! permissive cross-origin headers.

use axum::http::header::{
    HeaderName, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN,
};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::error::{AppError, AppResult};

/// Cross-origin headers attached to every response
pub const CORS_HEADERS: [(HeaderName, &str); 3] = [
    (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
    (ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
];

/// Build the headers for an upstream request
///
/// A credential that cannot be encoded as a header value is reported as an
/// internal error without echoing the value.
pub fn build_default_headers(api_key: &str) -> AppResult<HeaderMap> {
    let mut headers = HeaderMap::new();

    let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|_| {
        AppError::Internal(anyhow::anyhow!(
            "API key contains characters not allowed in a header"
        ))
    })?;
    auth.set_sensitive(true);

    headers.insert(AUTHORIZATION, auth);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Ok(headers)
}
