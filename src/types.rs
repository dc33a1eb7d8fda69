//! Request and payload types for chat completions
//!
//! `CompletionRequest` is what clients send; `ChatCompletionPayload` is what
//! goes upstream. The message types are only used for the optional shape
//! check, messages themselves travel upstream untouched.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Sampling temperature used when the client does not send one
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Completion length used when the client does not send one
pub const DEFAULT_MAX_TOKENS: u64 = 2048;

pub const TOP_P: f64 = 0.9;

pub const REPETITION_PENALTY: f64 = 1.1;

/// Role of a message participant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// A part of multimodal content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: Value },
}

/// Message content - either plain text or multimodal parts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Parts(Vec<ContentPart>),
}

/// A chat message with role and content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: Content,
}

/// Inbound chat completion request
///
/// Only the fields the proxy acts on are modelled, and their values are kept
/// as raw JSON. `None` means the key was missing; an explicit `null` is
/// `Some(Value::Null)` and travels upstream as sent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletionRequest {
    #[serde(default, deserialize_with = "present")]
    pub messages: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub temperature: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub max_tokens: Option<Value>,
}

/// Marks a key that appeared in the body, whatever its value
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl CompletionRequest {
    /// Check that `messages` is a list of well-formed chat messages
    pub fn validate_messages(&self) -> Result<Vec<Message>, String> {
        let messages = self
            .messages
            .as_ref()
            .ok_or_else(|| "messages is required".to_string())?;

        let parsed = Vec::<Message>::deserialize(messages)
            .map_err(|e| format!("messages is malformed: {}", e))?;

        if parsed.is_empty() {
            return Err("messages must not be empty".to_string());
        }

        Ok(parsed)
    }
}

/// Outbound chat completion payload
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatCompletionPayload {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<Value>,
    pub temperature: Value,
    pub max_tokens: Value,
    pub top_p: f64,
    pub repetition_penalty: f64,
    pub stream: bool,
}

impl ChatCompletionPayload {
    /// Merge a client request with the server-side defaults
    pub fn from_request(request: CompletionRequest, model: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: request.messages,
            temperature: request
                .temperature
                .unwrap_or_else(|| Value::from(DEFAULT_TEMPERATURE)),
            max_tokens: request
                .max_tokens
                .unwrap_or_else(|| Value::from(DEFAULT_MAX_TOKENS)),
            top_p: TOP_P,
            repetition_penalty: REPETITION_PENALTY,
            stream: false,
        }
    }
}
