//! LLM-backed HTTP gateway library.
//!
//! Every inbound HTTP request is encoded into a natural-language prompt,
//! dispatched to a language model, and the model's free-text reply is
//! decoded back into a structured HTTP response. A separate administrative
//! server manages prompts, model settings, logs, and restarts.

pub mod admin;
pub mod codec;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod llm;
pub mod state;

pub use config::GatewayConfig;
pub use http::{AppState, GatewayServer};
pub use lifecycle::Shutdown;
