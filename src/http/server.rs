//! Gateway HTTP server.
//!
//! # Responsibilities
//! - Create the Axum router handling every method and path
//! - Wire up middleware (tracing, request timeout)
//! - Run the state machine per request:
//!   RECEIVE → ENCODE → DISPATCH → DECODE → LOG → RESPOND
//! - Rebind the listener on restart without stopping the process
//!
//! # Design Decisions
//! - All verbs share one handler; HEAD only differs in that the body is
//!   computed (for logging fidelity) but not transmitted
//! - The state lock is held around appends only, never across the model
//!   call, so a slow dispatch cannot stall other connections
//! - Dispatch failures and timeouts become a synthetic `LLM error: ...`
//!   reply decoded with a 500 default, never a crash

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderName, HeaderValue, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, Mutex, Notify};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::codec::{self, RequestParts};
use crate::config::GatewayConfig;
use crate::llm::{ChatRequest, LlmClient};
use crate::state::{GatewayState, Message};

/// Application state injected into handlers. Shared by the gateway and the
/// admin server.
#[derive(Clone)]
pub struct AppState {
    /// Live configuration; replaced atomically by admin writes.
    pub config: Arc<ArcSwap<GatewayConfig>>,
    /// Conversation and logs behind one exclusive lock.
    pub state: Arc<Mutex<GatewayState>>,
    /// External model capability.
    pub llm: Arc<dyn LlmClient>,
    /// Cycles the gateway listener (used by the admin restart).
    pub restart: Arc<Notify>,
}

impl AppState {
    /// Build app state around a configuration and an LLM capability,
    /// seeding the conversation per the restart invariant.
    pub fn new(config: GatewayConfig, llm: Arc<dyn LlmClient>) -> Self {
        let state = GatewayState::seeded(&config.meta_prompt, &config.prompt);
        Self {
            config: Arc::new(ArcSwap::from_pointee(config)),
            state: Arc::new(Mutex::new(state)),
            llm,
            restart: Arc::new(Notify::new()),
        }
    }
}

/// Build the gateway router: every method on every path goes through the
/// same handler.
pub fn gateway_router(state: AppState) -> Router {
    let request_timeout = state.config.load().timeouts.request_secs;
    Router::new()
        .route("/{*path}", any(gateway_handler))
        .route("/", any(gateway_handler))
        .with_state(state)
        .layer(TimeoutLayer::new(Duration::from_secs(request_timeout)))
        .layer(TraceLayer::new_for_http())
}

/// HTTP server for the gateway listener.
pub struct GatewayServer {
    state: AppState,
}

impl GatewayServer {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Run the listener until shutdown, rebinding whenever a restart is
    /// requested so a new bind address or prompt set takes effect.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        loop {
            let bind_address = self.state.config.load().listener.bind_address.clone();
            let listener = TcpListener::bind(&bind_address).await?;
            tracing::info!(address = %listener.local_addr()?, "Gateway listening");

            let app = gateway_router(self.state.clone());
            let restart = self.state.restart.clone();
            let mut shutdown_rx = shutdown.resubscribe();
            let shutting_down = Arc::new(AtomicBool::new(false));
            let flag = shutting_down.clone();
            let signal = async move {
                tokio::select! {
                    _ = restart.notified() => {
                        tracing::info!("Gateway restart requested");
                    }
                    _ = shutdown_rx.recv() => {
                        flag.store(true, Ordering::SeqCst);
                    }
                }
            };

            axum::serve(listener, app)
                .with_graceful_shutdown(signal)
                .await?;

            if shutting_down.load(Ordering::SeqCst) {
                tracing::info!("Gateway stopped");
                return Ok(());
            }
            // A shutdown broadcast racing the restart is still honored.
            if shutdown.try_recv().is_ok() {
                return Ok(());
            }
        }
    }
}

/// Main gateway handler: one state machine for every verb.
async fn gateway_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let started = Instant::now();
    let request_id = Uuid::new_v4();
    let config = state.config.load_full();

    // RECEIVE
    let (parts, body) = request.into_parts();
    let method = parts.method.clone();
    let path = parts
        .uri
        .path_and_query()
        .map_or_else(|| parts.uri.path().to_string(), |pq| pq.as_str().to_string());
    let headers: Vec<(String, String)> = parts
        .headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    let body = match axum::body::to_bytes(body, config.listener.max_body_size).await {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Failed to read request body");
            return (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into_response();
        }
    };

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Gateway request"
    );

    // ENCODE: append the user message and both meta_out entries atomically,
    // then snapshot the conversation for dispatch.
    let encoded = codec::encode(
        &config.prompt,
        &config.meta_prompt,
        &RequestParts {
            method: method.to_string(),
            path: path.clone(),
            headers,
            body,
        },
    );
    let messages = {
        let mut guard = state.state.lock().await;
        guard.conversation.push(encoded.message());
        guard.logs.meta_out(&encoded.meta_prompt);
        guard.logs.meta_out(&encoded.prompt);
        guard.conversation.snapshot()
    };

    // DISPATCH: outside the lock, bounded by the configured timeout.
    let llm_timeout = Duration::from_secs(config.timeouts.llm_secs);
    let chat = ChatRequest {
        messages,
        model: config.llm.model.clone(),
        temperature: config.llm.temperature.clone(),
        thinking_time: config.llm.thinking_time.clone(),
    };
    let (reply, default_status) = match tokio::time::timeout(llm_timeout, state.llm.send(chat)).await
    {
        Ok(Ok(text)) => (text, 200),
        Ok(Err(e)) => {
            tracing::error!(request_id = %request_id, error = %e, "LLM dispatch failed");
            (format!("LLM error: {e}"), 500)
        }
        Err(_) => {
            tracing::error!(
                request_id = %request_id,
                timeout_secs = config.timeouts.llm_secs,
                "LLM dispatch timed out"
            );
            (
                format!("LLM error: timed out after {}s", config.timeouts.llm_secs),
                500,
            )
        }
    };

    // DECODE
    let decoded = codec::decode(&reply, default_status);

    // LOG: leading meta, the HTTP transaction, trailing meta, in that order,
    // plus the raw assistant reply back into the conversation.
    {
        let mut guard = state.state.lock().await;
        for line in &decoded.leading_meta {
            guard.logs.meta_in(line);
        }
        guard
            .logs
            .http(&path, decoded.status, &decoded.body, decoded.status >= 400);
        for line in &decoded.trailing_meta {
            guard.logs.meta_in(line);
        }
        guard.conversation.push(Message::assistant(reply));
    }

    tracing::info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        status = decoded.status,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Gateway response"
    );

    // RESPOND
    let status = StatusCode::from_u16(decoded.status).unwrap_or(StatusCode::OK);
    let mut builder = Response::builder().status(status);
    let mut has_content_type = false;
    for (key, value) in &decoded.headers {
        if key.eq_ignore_ascii_case("content-type") {
            has_content_type = true;
        }
        match (HeaderName::try_from(key.as_str()), HeaderValue::try_from(value.as_str())) {
            (Ok(name), Ok(value)) => builder = builder.header(name, value),
            _ => {
                tracing::warn!(request_id = %request_id, header = %key, "Dropping invalid reply header");
            }
        }
    }
    if !has_content_type {
        builder = builder.header(header::CONTENT_TYPE, "text/plain");
    }

    // Body is computed either way; HEAD just does not transmit it.
    let body = if method == Method::HEAD {
        Body::empty()
    } else {
        Body::from(decoded.body)
    };
    builder
        .body(body)
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
