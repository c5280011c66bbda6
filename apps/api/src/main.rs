mod config;
mod errors;
mod generation;
mod llm_client;
mod profiling;
mod routes;
mod state;
mod storage;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::generator::Generator;
use crate::llm_client::{ChatModel, LlmClient};
use crate::profiling::analyzer::Profiler;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{FileStore, NoopStore, PostStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Voiceprint API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm: Arc<dyn ChatModel> = Arc::new(LlmClient::new(
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )?);
    info!(
        "LLM client initialized (model: {}, endpoint: {})",
        llm_client::MODEL,
        config.openai_base_url
    );

    // Initialize post store (FileStore when POSTS_DIR is set)
    let store: Arc<dyn PostStore> = match &config.posts_dir {
        Some(dir) => {
            info!("Saving posts to {}", dir.display());
            Arc::new(FileStore::new(dir.clone()))
        }
        None => {
            info!("POSTS_DIR not set, saved posts are discarded");
            Arc::new(NoopStore)
        }
    };

    let state = AppState {
        profiler: Profiler::new(llm.clone()),
        generator: Generator::new(llm),
        store,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
