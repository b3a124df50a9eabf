//! Administrative API handlers.
//!
//! Configuration writes replace the whole snapshot atomically; in-flight
//! gateway requests keep the version they loaded. Malformed JSON bodies are
//! rejected by the `Json` extractor with a 4xx response.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::config::GatewayConfig;
use crate::http::server::AppState;
use crate::llm::ChatRequest;
use crate::state::{Direction, Message};

#[derive(Serialize, Deserialize)]
pub struct PromptBody {
    pub prompt: String,
}

#[derive(Serialize, Deserialize)]
pub struct MetaPromptBody {
    pub meta_prompt: String,
}

#[derive(Serialize, Deserialize)]
pub struct SettingsBody {
    pub model: String,
    pub temperature: Option<String>,
    pub thinking_time: Option<String>,
}

#[derive(Deserialize)]
pub struct RestartBody {
    pub prompt: Option<String>,
    pub meta_prompt: Option<String>,
}

#[derive(Deserialize)]
pub struct MetaChatBody {
    pub text: String,
}

#[derive(Serialize)]
pub struct StatusBody {
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct MetaChatResponse {
    pub response: String,
}

/// Swap in a modified copy of the current configuration.
fn update_config(state: &AppState, apply: impl Fn(&mut GatewayConfig)) {
    state.config.rcu(|current| {
        let mut next = GatewayConfig::clone(current);
        apply(&mut next);
        next
    });
}

pub async fn get_prompt(State(state): State<AppState>) -> Json<PromptBody> {
    Json(PromptBody {
        prompt: state.config.load().prompt.clone(),
    })
}

pub async fn set_prompt(
    State(state): State<AppState>,
    Json(body): Json<PromptBody>,
) -> Json<StatusBody> {
    update_config(&state, |config| config.prompt = body.prompt.clone());
    Json(StatusBody { status: "ok" })
}

pub async fn get_meta_prompt(State(state): State<AppState>) -> Json<MetaPromptBody> {
    Json(MetaPromptBody {
        meta_prompt: state.config.load().meta_prompt.clone(),
    })
}

pub async fn set_meta_prompt(
    State(state): State<AppState>,
    Json(body): Json<MetaPromptBody>,
) -> Json<StatusBody> {
    update_config(&state, |config| config.meta_prompt = body.meta_prompt.clone());
    Json(StatusBody { status: "ok" })
}

pub async fn get_settings(State(state): State<AppState>) -> Json<SettingsBody> {
    let config = state.config.load_full();
    Json(SettingsBody {
        model: config.llm.model.clone(),
        temperature: config.llm.temperature.clone(),
        thinking_time: config.llm.thinking_time.clone(),
    })
}

pub async fn set_settings(
    State(state): State<AppState>,
    Json(body): Json<SettingsBody>,
) -> Json<StatusBody> {
    update_config(&state, |config| {
        config.llm.model = body.model.clone();
        config.llm.temperature = body.temperature.clone();
        config.llm.thinking_time = body.thinking_time.clone();
    });
    Json(StatusBody { status: "ok" })
}

pub async fn get_logs(State(state): State<AppState>) -> Response {
    let guard = state.state.lock().await;
    Json(guard.logs.entries().to_vec()).into_response()
}

pub async fn get_meta_logs(State(state): State<AppState>) -> Response {
    let guard = state.state.lock().await;
    Json(guard.logs.meta_entries().to_vec()).into_response()
}

/// Replace prompts, clear both stores, reseed the conversation, and cycle
/// the gateway listener.
pub async fn restart(
    State(state): State<AppState>,
    Json(body): Json<RestartBody>,
) -> Json<StatusBody> {
    update_config(&state, |config| {
        if let Some(prompt) = &body.prompt {
            config.prompt = prompt.clone();
        }
        if let Some(meta_prompt) = &body.meta_prompt {
            config.meta_prompt = meta_prompt.clone();
        }
    });

    let config = state.config.load_full();
    {
        let mut guard = state.state.lock().await;
        guard.reset(&config.meta_prompt, &config.prompt);
    }
    state.restart.notify_one();

    tracing::info!("Gateway state reset and restart triggered");
    Json(StatusBody { status: "restarted" })
}

/// One-off LLM exchange outside the request/response grammar. Logged to the
/// meta log only.
pub async fn meta_chat(
    State(state): State<AppState>,
    Json(body): Json<MetaChatBody>,
) -> Response {
    {
        let mut guard = state.state.lock().await;
        guard.logs.meta(Direction::Out, &body.text);
    }

    let config = state.config.load_full();
    let chat = ChatRequest {
        messages: vec![Message::user(body.text)],
        model: config.llm.model.clone(),
        temperature: config.llm.temperature.clone(),
        thinking_time: config.llm.thinking_time.clone(),
    };
    let llm_timeout = Duration::from_secs(config.timeouts.llm_secs);
    let llm = Arc::clone(&state.llm);
    match tokio::time::timeout(llm_timeout, llm.send(chat)).await {
        Ok(Ok(response)) => {
            let mut guard = state.state.lock().await;
            guard.logs.meta(Direction::In, &response);
            Json(MetaChatResponse { response }).into_response()
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Meta chat dispatch failed");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("LLM error: {e}")).into_response()
        }
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("LLM error: timed out after {}s", config.timeouts.llm_secs),
        )
            .into_response(),
    }
}

/// Unknown administrative paths return 404 with an empty body.
pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
