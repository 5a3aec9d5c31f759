//! Persists signals and serves them back to consumers

use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::db::{SignalStore, StoreError};
use crate::metrics::Metrics;
use crate::models::signal::{RiskTier, Signal, SignalFilter, SignalOutcome, TradeResult};

pub const DEFAULT_LIST_LIMIT: usize = 50;
pub const MAX_LIST_LIMIT: usize = 500;

pub struct SignalPublisher {
    store: Arc<dyn SignalStore>,
    metrics: Option<Arc<Metrics>>,
}

impl SignalPublisher {
    pub fn new(store: Arc<dyn SignalStore>) -> Self {
        Self {
            store,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn store(&self) -> &Arc<dyn SignalStore> {
        &self.store
    }

    /// Persist a new signal; the stored copy carries its assigned id
    pub async fn publish(&self, signal: Signal) -> Result<Signal, StoreError> {
        let stored = self.store.insert_signal(signal).await?;
        if let Some(ref metrics) = self.metrics {
            metrics.signals_emitted_total.inc();
        }
        info!(
            signal_id = stored.id.unwrap_or(0),
            symbol = %stored.symbol,
            direction = stored.direction.as_str(),
            confidence = stored.confidence,
            risk_tier = stored.risk_tier.as_str(),
            "Published signal for {}",
            stored.symbol
        );
        Ok(stored)
    }

    /// Newest-first signals, optionally restricted to one risk tier
    pub async fn recent(
        &self,
        limit: Option<usize>,
        risk_tier: Option<RiskTier>,
    ) -> Result<Vec<Signal>, StoreError> {
        let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT);
        let filter = SignalFilter {
            limit: Some(limit),
            risk_tier,
            symbol: None,
        };
        self.store.list_signals(&filter).await
    }

    pub async fn get(&self, id: i64) -> Result<Option<Signal>, StoreError> {
        self.store.get_signal(id).await
    }

    /// Mark an active signal as taken, recording the trade outcome
    pub async fn take(&self, id: i64, result: TradeResult, pnl: f64) -> Result<Signal, StoreError> {
        let outcome = SignalOutcome {
            result,
            pnl,
            closed_at: Utc::now(),
        };
        let signal = self.store.mark_taken(id, outcome).await?;
        info!(
            signal_id = id,
            symbol = %signal.symbol,
            result = result.as_str(),
            pnl = pnl,
            "Signal {} taken",
            id
        );
        Ok(signal)
    }
}
