//! Utilities for querying the OpenAI API via the chat completions endpoint.
//!
//! For specific details on request/response schemas, see the [OpenAI API chat completions docs](https://platform.openai.com/docs/api-reference/chat/create).

use std::time::Duration;

use log::{debug, log_enabled, trace, Level};
use serde::{Deserialize, Serialize};

use crate::cli::Model;
use crate::config::Config;
use crate::errors::ChatError;

/// The chat completions endpoint.
pub const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// A `chat/completions` `messages` item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: &str, content: impl Into<String>) -> Self {
        ChatMessage {
            role: role.to_string(),
            content: content.into(),
        }
    }
}

/// A `chat/completions` request body
#[derive(Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

/// A `chat/completions` response message. `content` is null on refusals and tool calls.
#[derive(Deserialize)]
pub struct ChatReplyMessage {
    pub content: Option<String>,
}

/// A `chat/completions` response choice
#[derive(Deserialize)]
pub struct ChatChoice {
    pub message: ChatReplyMessage,
}

/// A `chat/completions` response
#[derive(Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// A remote model that turns a list of role-tagged messages into a reply.
pub trait ChatApi {
    fn complete(&mut self, messages: &[ChatMessage]) -> Result<String, ChatError>;
}

/// Blocking client for the OpenAI chat completions endpoint.
pub struct OpenAiClient {
    client: reqwest::blocking::Client,
    url: String,
    api_key: String,
    model: Model,
    temperature: f32,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> Result<Self, ChatError> {
        Self::with_url(config, CHAT_COMPLETIONS_URL)
    }

    /// Point the client at an OpenAI-compatible endpoint other than the default.
    pub fn with_url(config: &Config, url: impl Into<String>) -> Result<Self, ChatError> {
        // No request timeout: a chat turn waits as long as the endpoint takes.
        let client = reqwest::blocking::Client::builder().timeout(None::<Duration>).build()?;
        Ok(OpenAiClient {
            client,
            url: url.into(),
            api_key: config.api_key.clone(),
            model: config.model,
            temperature: config.temperature,
        })
    }
}

impl ChatApi for OpenAiClient {
    fn complete(&mut self, messages: &[ChatMessage]) -> Result<String, ChatError> {
        let req_body = ChatRequest {
            model: self.model.to_string(),
            messages: messages.to_vec(),
            temperature: self.temperature,
        };

        if log_enabled!(Level::Trace) {
            if let Ok(json) = serde_json::to_string(&req_body) {
                trace!("chat completions request payload: {}", json);
            }
        }
        debug!(
            "sending {} messages to {} ({})",
            req_body.messages.len(),
            self.url,
            req_body.model
        );

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&req_body)
            .send()?;

        let status = response.status();
        debug!("chat completions HTTP status: {}", status);
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ChatError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let parsed: ChatResponse = response.json()?;
        parse_reply(parsed)
    }
}

/// Pull the assistant text out of a successful response.
fn parse_reply(response: ChatResponse) -> Result<String, ChatError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(ChatError::EmptyResponse)
}

/// OpenAI wraps failures as `{"error": {"message": ...}}`; fall back to the raw body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}
