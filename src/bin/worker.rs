//! TraderEdge Worker
//!
//! Headless analysis loop that writes prices and signals to PostgreSQL.
//! The HTTP API reads them back from the same database.

use backon::{ExponentialBuilder, Retryable};
use dotenvy::dotenv;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};
use traderedge::config::{get_environment, ServiceConfig};
use traderedge::core::runtime::{RuntimeConfig, SignalRuntime};
use traderedge::core::scheduler::Scheduler;
use traderedge::db::{PostgresStore, StoreError};
use traderedge::logging;
use traderedge::metrics::Metrics;
use traderedge::services::{HttpPriceFeed, MarketDataProvider, PriceHistory, SimulatedPriceFeed};
use traderedge::signals::{SignalPublisher, SignalScorer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = ServiceConfig::from_env();
    info!("Starting TraderEdge Worker");
    info!(environment = %get_environment(), "Environment");

    if config.eval_interval_seconds == 0 {
        return Err("EVAL_INTERVAL_SECONDS must be > 0 for worker".into());
    }
    let database_url = config
        .database_url
        .clone()
        .ok_or("DATABASE_URL is required for worker")?;

    let metrics = Arc::new(Metrics::new()?);

    let store = (|| PostgresStore::connect(&database_url))
        .retry(ExponentialBuilder::default().with_max_times(5))
        .notify(|e: &StoreError, delay| {
            warn!(error = %e, delay_ms = delay.as_millis() as u64, "PostgreSQL connect failed, retrying");
        })
        .await
        .map_err(|e| format!("PostgreSQL connection required for worker: {}", e))?;
    info!("PostgreSQL connected");
    metrics.database_connected.set(1.0);

    let provider: Arc<dyn MarketDataProvider> = match config.price_feed_url.as_deref() {
        Some(url) => Arc::new(HttpPriceFeed::new(url)),
        None => {
            warn!("PRICE_FEED_URL not set, using simulated price feed");
            Arc::new(SimulatedPriceFeed::new())
        }
    };

    let publisher = Arc::new(SignalPublisher::new(Arc::new(store)).with_metrics(metrics.clone()));
    let runtime = Arc::new(
        SignalRuntime::new(
            RuntimeConfig {
                evaluation_interval_seconds: config.eval_interval_seconds,
                symbols: config.symbols.clone(),
            },
            provider,
            Arc::new(PriceHistory::new(config.history_capacity)),
            SignalScorer::new(config.scoring.clone()),
            publisher,
        )
        .with_metrics(metrics),
    );

    let scheduler = Scheduler::new(runtime)?;
    scheduler.start().await?;
    info!(
        symbols = ?config.symbols,
        interval = config.eval_interval_seconds,
        "Worker started, waiting for shutdown signal..."
    );

    signal::ctrl_c().await?;
    info!("Shutting down worker...");
    scheduler.stop().await;
    info!("Worker stopped");

    Ok(())
}
