mod config;
mod db;
mod errors;
mod interview;
mod llm_client;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::interview::extractor::QuestionExtractor;
use crate::interview::response::ResponseFormatter;
use crate::interview::store::PgInterviewStore;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interview API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize LLM client
    let llm = LlmClient::new(config.llm.clone())?;
    info!(
        "LLM client initialized (provider: {:?}, model: {})",
        llm.provider(),
        llm.model()
    );

    let extractor = QuestionExtractor::new(config.denylist.clone());
    info!(
        "Question extractor initialized ({} denylist entries)",
        extractor.denylist().len()
    );
    if extractor.denylist().is_empty() {
        warn!("Question denylist is empty; only shape checks will filter model output");
    }
    info!("Response mode: {:?}", config.response_mode);

    // Build app state
    let state = AppState {
        llm: Arc::new(llm),
        store: Arc::new(PgInterviewStore::new(db)),
        extractor: Arc::new(extractor),
        formatter: ResponseFormatter::new(config.response_mode),
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
