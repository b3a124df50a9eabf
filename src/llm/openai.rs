//! OpenAI-compatible chat completion client.
//!
//! # Responsibilities
//! - POST conversations to `<base_url>/chat/completions`
//! - Resolve the API key from the configured environment variable
//! - Map transport and protocol failures into `LlmError`
//!
//! # Design Decisions
//! - A missing API key is an unconfigured state, not a startup error; it
//!   surfaces on every dispatch so the gateway still serves 500s
//! - `temperature` is forwarded only when it parses as a number
//! - `thinking_time` bounds the individual upstream call

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::llm::{ChatRequest, LlmClient, LlmError};
use crate::state::Message;

/// Client for any OpenAI-compatible completion API.
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key_env: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl OpenAiClient {
    /// Create a client, resolving the API key from `api_key_env` now.
    /// The key may be absent; dispatch reports that per call.
    pub fn new(base_url: impl Into<String>, api_key_env: impl Into<String>) -> Self {
        let api_key_env = api_key_env.into();
        let api_key = std::env::var(&api_key_env).ok().filter(|k| !k.is_empty());
        if api_key.is_none() {
            tracing::warn!(
                env = %api_key_env,
                "No API key configured; LLM dispatch will fail until it is set"
            );
        }
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key_env,
            api_key,
        }
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn send(&self, request: ChatRequest) -> Result<String, LlmError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| LlmError::MissingApiKey(self.api_key_env.clone()))?;

        let payload = CompletionRequest {
            model: &request.model,
            messages: &request.messages,
            temperature: request
                .temperature
                .as_deref()
                .and_then(|t| t.trim().parse().ok()),
        };

        let mut call = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&payload);
        if let Some(secs) = request
            .thinking_time
            .as_deref()
            .and_then(|t| t.trim().parse::<u64>().ok())
        {
            call = call.timeout(Duration::from_secs(secs));
        }

        let response = call.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Malformed(e.to_string()))?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| LlmError::Malformed("no choices in response".to_string()))
    }
}
