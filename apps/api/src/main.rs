mod config;
mod errors;
mod flows;
mod llm_client;
mod models;
mod render;
mod routes;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Compass API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the generative model client
    let model = GeminiClient::new(
        config.gemini_api_key.clone(),
        config.llm_api_base.clone(),
        config.llm_timeout(),
    )?;
    info!(
        "LLM client initialized (model: {}, speech: {}, timeout: {}s)",
        llm_client::MODEL,
        llm_client::SPEECH_MODEL,
        config.llm_timeout_secs
    );

    // Initialize the session store and its expiry sweep
    let sessions = SessionStore::new();
    sessions.spawn_expiry(config.session_ttl(), SESSION_SWEEP_INTERVAL);
    info!("Session store initialized (ttl: {}s)", config.session_ttl_secs);

    let state = AppState {
        model: Arc::new(model),
        sessions,
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
