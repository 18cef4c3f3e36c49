use std::time::Duration;

use anyhow::Context;
use recallo_service::{ServiceConfig, ServiceState, jobs, metrics, tracing::init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ServiceConfig::from_env().context("failed to load configuration")?;

    init_tracing(&config.env);
    metrics::init_metrics(&config.metrics_addr)?;
    tracing::info!("Metrics exporter listening on {}", config.metrics_addr);

    let state = ServiceState::connect(&config).await?;

    let handles = jobs::start_background_jobs(
        state,
        Duration::from_secs(config.goal_sweep_interval_secs),
    );
    tracing::info!("Worker started");

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;

    tracing::info!("Shutting down");
    for handle in handles {
        handle.abort();
    }

    Ok(())
}
