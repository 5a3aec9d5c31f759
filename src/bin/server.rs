//! TraderEdge Signal Server
//!
//! Runs the HTTP API and the periodic analysis loop in one process. Uses
//! PostgreSQL when DATABASE_URL is set, otherwise an in-memory store.

use backon::{ExponentialBuilder, Retryable};
use dotenvy::dotenv;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::{error, info, warn};
use traderedge::config::{get_environment, ServiceConfig};
use traderedge::core::http::{shutdown_signal, start_server, AppState, HealthStatus};
use traderedge::core::runtime::{RuntimeConfig, SignalRuntime};
use traderedge::core::scheduler::Scheduler;
use traderedge::db::{MemoryStore, PostgresStore, SignalStore, StoreError};
use traderedge::logging;
use traderedge::metrics::Metrics;
use traderedge::services::{HttpPriceFeed, MarketDataProvider, PriceHistory, SimulatedPriceFeed};
use traderedge::signals::{SignalPublisher, SignalScorer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = ServiceConfig::from_env();
    info!("Starting TraderEdge Signal Server");
    info!(environment = %get_environment(), "Environment");
    info!(symbols = ?config.symbols, "Tracking {}", config.symbols.join(", "));

    let metrics = Arc::new(Metrics::new()?);

    let store: Arc<dyn SignalStore> = match config.database_url.as_deref() {
        Some(url) => match connect_with_retry(url).await {
            Ok(db) => {
                info!("PostgreSQL connected");
                metrics.database_connected.set(1.0);
                Arc::new(db)
            }
            Err(e) => {
                warn!(error = %e, "Failed to connect to PostgreSQL, using in-memory store");
                Arc::new(MemoryStore::new())
            }
        },
        None => {
            info!("DATABASE_URL not set, using in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    let provider: Arc<dyn MarketDataProvider> = match config.price_feed_url.as_deref() {
        Some(url) => {
            info!(url = %url, "Using HTTP price feed");
            Arc::new(HttpPriceFeed::new(url))
        }
        None => {
            info!("PRICE_FEED_URL not set, using simulated price feed");
            Arc::new(SimulatedPriceFeed::new())
        }
    };

    let history = Arc::new(PriceHistory::new(config.history_capacity));
    let publisher = Arc::new(SignalPublisher::new(store).with_metrics(metrics.clone()));

    let runtime = Arc::new(
        SignalRuntime::new(
            RuntimeConfig {
                evaluation_interval_seconds: config.eval_interval_seconds,
                symbols: config.symbols.clone(),
            },
            provider,
            history.clone(),
            SignalScorer::new(config.scoring.clone()),
            publisher.clone(),
        )
        .with_metrics(metrics.clone()),
    );

    let scheduler = match Scheduler::new(runtime) {
        Ok(scheduler) => {
            scheduler.start().await?;
            info!(
                interval = config.eval_interval_seconds,
                "Signal evaluation: every {} seconds", config.eval_interval_seconds
            );
            Some(scheduler)
        }
        Err(e) => {
            warn!(error = %e, "Signal evaluation disabled");
            None
        }
    };

    let state = AppState {
        health: Arc::new(RwLock::new(HealthStatus::default())),
        metrics,
        start_time: Arc::new(Instant::now()),
        publisher,
        history,
    };

    let served = start_server(config.port, state, shutdown_signal()).await;
    if let Err(ref e) = served {
        error!(error = %e, port = config.port, "HTTP server error");
    }

    if let Some(scheduler) = scheduler {
        scheduler.stop().await;
    }
    served?;
    info!("Server stopped");
    Ok(())
}

async fn connect_with_retry(url: &str) -> Result<PostgresStore, StoreError> {
    (|| PostgresStore::connect(url))
        .retry(ExponentialBuilder::default().with_max_times(3))
        .notify(|e: &StoreError, delay| {
            warn!(error = %e, delay_ms = delay.as_millis() as u64, "PostgreSQL connect failed, retrying");
        })
        .await
}
