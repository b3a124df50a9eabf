//! LLM-backed HTTP gateway.
//!
//! Two servers share one process: the gateway listener, which turns HTTP
//! requests into prompts and model replies into HTTP responses, and the
//! administrative listener, which manages prompts, settings, logs, and
//! restarts.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use prompt_gateway::admin::admin_router;
use prompt_gateway::config::{load_config, GatewayConfig};
use prompt_gateway::http::{AppState, GatewayServer};
use prompt_gateway::lifecycle::Shutdown;
use prompt_gateway::llm::OpenAiClient;

#[derive(Parser, Debug)]
#[command(version, about = "HTTP gateway that serves responses from a language model")]
struct Args {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!(
                    "prompt_gateway={},tower_http=warn",
                    config.observability.log_level
                ))
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        gateway_address = %config.listener.bind_address,
        admin_address = %config.admin.bind_address,
        model = %config.llm.model,
        "Configuration loaded"
    );

    let llm = Arc::new(OpenAiClient::new(
        config.llm.base_url.clone(),
        config.llm.api_key_env.clone(),
    ));
    let state = AppState::new(config.clone(), llm);

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    // Admin server: independent listener, same shared state.
    let admin_listener = TcpListener::bind(&config.admin.bind_address).await?;
    tracing::info!(address = %admin_listener.local_addr()?, "Admin API listening");
    let admin_app = admin_router(state.clone());
    let mut admin_shutdown = shutdown.subscribe();
    let admin_task = tokio::spawn(async move {
        axum::serve(admin_listener, admin_app)
            .with_graceful_shutdown(async move {
                let _ = admin_shutdown.recv().await;
            })
            .await
    });

    // Gateway server: rebinds on restart, exits on shutdown.
    let server = GatewayServer::new(state);
    server.run(shutdown.subscribe()).await?;

    let _ = admin_task.await?;
    tracing::info!("Shutdown complete");
    Ok(())
}
