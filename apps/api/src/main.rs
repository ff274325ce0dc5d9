mod analysis;
mod auth;
mod config;
mod dashboard;
mod errors;
mod llm_client;
mod models;
mod routes;
mod state;
mod storage;
mod upload;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{JsonFileStore, ResumeStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (missing optional vars fall back to defaults)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ResumeLens API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the result store
    let store: Arc<dyn ResumeStore> = Arc::new(JsonFileStore::new(config.data_dir.clone()));
    info!("Result store initialized at {}", config.data_dir.display());

    // Initialize the LLM client if a key is configured
    let llm = match config.openai_api_key.clone() {
        Some(key) => {
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(LlmClient::new(key))
        }
        None => {
            warn!("OPENAI_API_KEY not configured; analysis requests will be refused");
            None
        }
    };

    // Build app state
    let state = AppState {
        llm,
        store,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
