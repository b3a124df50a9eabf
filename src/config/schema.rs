//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Gateway listener configuration.
    pub listener: ListenerConfig,

    /// Administrative server configuration.
    pub admin: AdminConfig,

    /// LLM endpoint and model settings.
    pub llm: LlmConfig,

    /// Service-prompt template. `{path}` expands to the request path,
    /// `{request}` to the full raw request text.
    pub prompt: String,

    /// Meta prompt prepended to every model call, describing the expected
    /// reply format.
    pub meta_prompt: String,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            admin: AdminConfig::default(),
            llm: LlmConfig::default(),
            prompt: DEFAULT_PROMPT.to_string(),
            meta_prompt: DEFAULT_META_PROMPT.to_string(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Gateway listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8000").
    pub bind_address: String,

    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8000".to_string(),
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Administrative server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Admin API bind address.
    pub bind_address: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8500".to_string(),
        }
    }
}

/// LLM endpoint and model settings.
///
/// `model`, `temperature` and `thinking_time` are runtime-mutable through
/// the admin API. Temperature and thinking time are kept as text, matching
/// the admin JSON surface; the client parses them when dispatching.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible API.
    pub base_url: String,

    /// Environment variable holding the API key.
    pub api_key_env: String,

    /// Model name sent with every completion request.
    pub model: String,

    /// Optional sampling temperature.
    pub temperature: Option<String>,

    /// Optional per-call time limit in seconds. Overrides
    /// `timeouts.llm_secs` when set.
    pub thinking_time: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: None,
            thinking_time: None,
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,

    /// LLM dispatch timeout in seconds. Expiry is handled exactly like a
    /// dispatch failure.
    pub llm_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 120,
            llm_secs: 90,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

const DEFAULT_PROMPT: &str = "You are a web server. A client sent the HTTP \
request below. Produce the response you would serve for {path}.\n\n{request}";

const DEFAULT_META_PROMPT: &str = "Reply with an HTTP response: a status \
line like HTTP/1.1 200 OK, then header lines, then a blank line, then the \
body. Any line wrapped in {{{ and }}} is commentary outside the HTTP \
exchange and may appear before or after the response.";
