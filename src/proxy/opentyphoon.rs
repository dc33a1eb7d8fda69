//! OpenTyphoon proxy
//!
//! Forwards chat completions to the OpenTyphoon API with the server-held key.

use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::Value;
use tracing::instrument;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    proxy::{headers::build_default_headers, ChatProvider, RequestContext},
    types::ChatCompletionPayload,
};

/// OpenTyphoon API client
pub struct OpenTyphoonProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenTyphoonProvider {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.upstream_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl ChatProvider for OpenTyphoonProvider {
    fn name(&self) -> &'static str {
        "opentyphoon"
    }

    #[instrument(skip_all, fields(trace_id = %ctx.trace_id))]
    async fn chat_completions(
        &self,
        payload: &ChatCompletionPayload,
        ctx: &RequestContext,
    ) -> AppResult<Value> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(AppError::MissingCredential)?;

        let url = self.chat_completions_url();
        ctx.log_upstream_request(&url);

        let response = self
            .client
            .post(&url)
            .headers(build_default_headers(api_key)?)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        ctx.log_upstream_response(status.as_u16());

        if !status.is_success() {
            // an unreadable body surfaces as AppError::Http
            let body = response.text().await?;
            ctx.log_upstream_error(status.as_u16(), &body);
            return Err(AppError::Upstream {
                status: StatusCode::from_u16(status.as_u16())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                body,
            });
        }

        let result = response.json().await?;
        Ok(result)
    }
}
