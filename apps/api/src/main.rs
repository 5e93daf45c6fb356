mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod outreach;
mod portfolio;
mod routes;
mod scraping;
mod state;
#[cfg(test)]
mod testing;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::portfolio::store::load_portfolio;
use crate::routes::build_router;
use crate::scraping::HttpPageFetcher;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on a missing API key)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting coldmail API v{}", env!("CARGO_PKG_VERSION"));

    // Portfolio is loaded once and stays read-only for the life of the process
    let portfolio = load_portfolio(&config).await?;
    if portfolio.is_empty() {
        tracing::warn!("Portfolio is empty; emails will be drafted without links");
    }

    let fetcher = HttpPageFetcher::new(config.fetch_timeout_secs)?;
    info!(
        "Page fetcher initialized (timeout: {}s)",
        config.fetch_timeout_secs
    );

    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let state = AppState {
        fetcher: Arc::new(fetcher),
        llm: Arc::new(llm),
        portfolio: Arc::new(portfolio),
        config: config.clone(),
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
