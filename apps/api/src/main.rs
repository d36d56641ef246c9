mod assistant;
mod auth;
mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod routes;
mod state;
mod store;

use anyhow::Result;
use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assistant::rate_limit::RateLimiter;
use crate::assistant::service::AssistantService;
use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::{AnthropicProvider, FallbackChat, OpenAiCompatProvider};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::PgProfileStore;

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

    info!("Starting Rojgaar assistant API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    let profiles = Arc::new(PgProfileStore::new(db));

    // Initialize LLM providers
    let primary = AnthropicProvider::new(config.anthropic_api_key.clone())?;
    let secondary = OpenAiCompatProvider::new(
        config.fallback_api_key.clone(),
        config.fallback_api_url.clone(),
        config.fallback_model.clone(),
    )?;
    info!(
        "LLM providers initialized (primary: {}, fallback: {})",
        llm_client::anthropic::MODEL,
        config.fallback_model
    );

    let assistant = AssistantService::new(
        FallbackChat::new(Arc::new(primary), Arc::new(secondary)),
        RateLimiter::default(),
        profiles.clone(),
    );

    // Build app state
    let state = AppState {
        profiles,
        assistant: Arc::new(assistant),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config)?);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Restricts CORS to the portal origin when one is configured.
fn cors_layer(config: &Config) -> Result<CorsLayer> {
    match &config.cors_origin {
        Some(origin) => Ok(CorsLayer::new()
            .allow_origin(origin.parse::<HeaderValue>()?)
            .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
            ])
            .allow_credentials(true)),
        None => Ok(CorsLayer::permissive()),
    }
}
