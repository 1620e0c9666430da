mod config;
mod errors;
mod export;
mod generation;
mod llm_client;
mod models;
mod report;
mod routes;
mod search;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{GeminiClient, MODEL_CHAIN};
use crate::routes::build_router;
use crate::search::DuckDuckGoSearch;
use crate::session::SessionStore;
use crate::state::AppState;

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

    info!("Starting CEP API v{}", env!("CARGO_PKG_VERSION"));

    info!(
        "Sessions expire after {} min idle",
        config.session_idle_ttl.as_secs() / 60
    );

    // Initialize LLM client
    let llm = GeminiClient::new(config.google_api_key.clone(), config.gemini_base_url.clone())?;
    let chain: Vec<&str> = MODEL_CHAIN.iter().map(|step| step.model).collect();
    info!("LLM client initialized (chain: {})", chain.join(" → "));

    // Initialize web search
    let search = DuckDuckGoSearch::new(config.search_region.clone())?;
    info!(
        "Search client initialized (region: {}, {} results/query)",
        config.search_region, config.search_result_limit
    );

    let state = AppState {
        config: config.clone(),
        llm: Arc::new(llm),
        search: Arc::new(search),
        sessions: SessionStore::with_idle_ttl(config.session_idle_ttl),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
