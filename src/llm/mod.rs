//! LLM capability boundary.
//!
//! # Design Decisions
//! - The model call is an abstract capability selected at construction
//!   time: a real OpenAI-compatible client in the binary, a programmable
//!   double in tests
//! - Failures are values, never fatal: the gateway converts every
//!   `LlmError` into a synthetic 500 reply

pub mod openai;

use async_trait::async_trait;

use crate::state::Message;

pub use openai::OpenAiClient;

/// One completion request: the conversation to replay plus the model
/// settings in effect when it was built.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    pub model: String,
    pub temperature: Option<String>,
    pub thinking_time: Option<String>,
}

/// Reasons a dispatch can fail. All of them surface as a 500 response
/// with an `LLM error: <cause>` body.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("{0} environment variable not set")]
    MissingApiKey(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },
    #[error("malformed completion response: {0}")]
    Malformed(String),
}

/// Narrow capability interface for the external model.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a conversation and return the model's raw reply text.
    async fn send(&self, request: ChatRequest) -> Result<String, LlmError>;
}
