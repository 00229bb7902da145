use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod config;
mod dashboard;
mod domain;
mod engine;
mod error;
mod predictor;

use config::Config;
use dashboard::AppState;
use engine::Orchestrator;
use predictor::PredictorClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let predictor = PredictorClient::new(
        &config.predictor_url,
        Duration::from_secs(config.predictor_timeout_secs),
    )?;
    info!(
        "Predictor endpoint: {} (timeout {}s, venue policy {:?})",
        predictor.predict_url(),
        config.predictor_timeout_secs,
        config.venue_policy
    );

    let orchestrator = Arc::new(Orchestrator::new(Arc::new(predictor), config.venue_policy));
    let app = dashboard::router(AppState { orchestrator });

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Win predictor listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
