//! One analysis pass over every tracked instrument

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::indicators::compute_snapshot;
use crate::metrics::Metrics;
use crate::models::signal::Signal;
use crate::services::history::PriceHistory;
use crate::services::market_data::MarketDataProvider;
use crate::signals::{SignalPublisher, SignalScorer};

/// Configuration for the analysis runtime
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub evaluation_interval_seconds: u64,
    pub symbols: Vec<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            evaluation_interval_seconds: 15,
            symbols: vec!["EURUSD".to_string()],
        }
    }
}

/// Counters for a single cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub evaluated: usize,
    pub emitted: usize,
    pub feed_errors: usize,
    pub storage_errors: usize,
}

/// Fetches prices, updates history, scores and publishes signals.
///
/// Instruments are processed one after another. A failed fetch or write only
/// affects the instrument being processed.
pub struct SignalRuntime {
    config: RuntimeConfig,
    provider: Arc<dyn MarketDataProvider>,
    history: Arc<PriceHistory>,
    scorer: SignalScorer,
    publisher: Arc<SignalPublisher>,
    metrics: Option<Arc<Metrics>>,
}

impl SignalRuntime {
    pub fn new(
        config: RuntimeConfig,
        provider: Arc<dyn MarketDataProvider>,
        history: Arc<PriceHistory>,
        scorer: SignalScorer,
        publisher: Arc<SignalPublisher>,
    ) -> Self {
        Self {
            config,
            provider,
            history,
            scorer,
            publisher,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn history(&self) -> &Arc<PriceHistory> {
        &self.history
    }

    pub async fn run_cycle(&self) -> CycleReport {
        let mut report = CycleReport::default();

        for symbol in &self.config.symbols {
            if let Some(signal) = self.analyze_symbol(symbol, &mut report).await {
                debug!(
                    symbol = %symbol,
                    signal_id = signal.id.unwrap_or(0),
                    "Cycle emitted signal for {}",
                    symbol
                );
            }
        }

        if let Some(ref metrics) = self.metrics {
            metrics.analysis_cycles_total.inc();
        }

        info!(
            evaluated = report.evaluated,
            emitted = report.emitted,
            feed_errors = report.feed_errors,
            storage_errors = report.storage_errors,
            "Analysis cycle complete"
        );
        report
    }

    async fn analyze_symbol(&self, symbol: &str, report: &mut CycleReport) -> Option<Signal> {
        let quote = match self.provider.latest_quote(symbol).await {
            Ok(quote) => quote,
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Price fetch failed for {}, skipping", symbol);
                report.feed_errors += 1;
                if let Some(ref metrics) = self.metrics {
                    metrics.feed_errors_total.inc();
                }
                return None;
            }
        };

        let point = self.history.record(symbol, quote.price, Utc::now()).await;

        if let Err(e) = self
            .publisher
            .store()
            .store_price(&point, &quote.source)
            .await
        {
            error!(symbol = %symbol, error = %e, "Failed to persist price for {}", symbol);
            self.count_storage_error(report);
        }

        let points = self.history.snapshot(symbol).await;
        let snapshot = compute_snapshot(&points)?;
        report.evaluated += 1;

        let Some(signal) = self.scorer.score(symbol, &snapshot) else {
            debug!(
                symbol = %symbol,
                rsi = snapshot.rsi_14,
                points = snapshot.points,
                "No qualifying setup for {}",
                symbol
            );
            return None;
        };

        match self.publisher.publish(signal).await {
            Ok(stored) => {
                report.emitted += 1;
                Some(stored)
            }
            Err(e) => {
                error!(
                    symbol = %symbol,
                    error = %e,
                    "Failed to store signal for {}, dropping it",
                    symbol
                );
                self.count_storage_error(report);
                None
            }
        }
    }

    fn count_storage_error(&self, report: &mut CycleReport) {
        report.storage_errors += 1;
        if let Some(ref metrics) = self.metrics {
            metrics.storage_errors_total.inc();
        }
    }
}
