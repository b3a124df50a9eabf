//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpListener;

use prompt_gateway::admin::admin_router;
use prompt_gateway::config::GatewayConfig;
use prompt_gateway::http::{gateway_router, AppState};
use prompt_gateway::llm::{ChatRequest, LlmClient, LlmError};

type ReplyFn = dyn Fn(&ChatRequest) -> Result<String, LlmError> + Send + Sync;

/// Programmable LLM double: fixed reply, fixed failure, or a closure.
/// Captures every dispatched request.
pub struct MockLlm {
    reply: Box<ReplyFn>,
    delay: Option<Duration>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockLlm {
    pub fn with(
        reply: impl Fn(&ChatRequest) -> Result<String, LlmError> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            reply: Box::new(reply),
            delay: None,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn replying(text: &str) -> Arc<Self> {
        let text = text.to_string();
        Self::with(move |_| Ok(text.clone()))
    }

    pub fn failing(message: &str) -> Arc<Self> {
        let message = message.to_string();
        Self::with(move |_| Err(LlmError::Malformed(message.clone())))
    }

    /// Same as `replying`, with an artificial dispatch latency.
    #[allow(dead_code)]
    pub fn replying_after(text: &str, delay: Duration) -> Arc<Self> {
        let text = text.to_string();
        Arc::new(Self {
            reply: Box::new(move |_| Ok(text.clone())),
            delay: Some(delay),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Every request dispatched so far, in order.
    #[allow(dead_code)]
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn send(&self, request: ChatRequest) -> Result<String, LlmError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let result = (self.reply)(&request);
        self.requests.lock().unwrap().push(request);
        result
    }
}

/// A gateway plus admin server running on ephemeral ports.
pub struct TestGateway {
    pub gateway_addr: SocketAddr,
    pub admin_addr: SocketAddr,
    pub state: AppState,
}

impl TestGateway {
    pub fn gateway_url(&self, path: &str) -> String {
        format!("http://{}{}", self.gateway_addr, path)
    }

    pub fn admin_url(&self, path: &str) -> String {
        format!("http://{}{}", self.admin_addr, path)
    }
}

/// Spawn both servers with the default configuration and the given LLM.
pub async fn spawn_gateway(llm: Arc<dyn LlmClient>) -> TestGateway {
    spawn_gateway_with_config(GatewayConfig::default(), llm).await
}

/// Spawn both servers on ephemeral ports, overriding the configured bind
/// addresses with the actual ones.
pub async fn spawn_gateway_with_config(
    mut config: GatewayConfig,
    llm: Arc<dyn LlmClient>,
) -> TestGateway {
    let gateway_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let admin_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let gateway_addr = gateway_listener.local_addr().unwrap();
    let admin_addr = admin_listener.local_addr().unwrap();
    config.listener.bind_address = gateway_addr.to_string();
    config.admin.bind_address = admin_addr.to_string();

    let state = AppState::new(config, llm);

    let gateway_app = gateway_router(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(gateway_listener, gateway_app).await;
    });
    let admin_app = admin_router(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(admin_listener, admin_app).await;
    });

    TestGateway {
        gateway_addr,
        admin_addr,
        state,
    }
}

#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
