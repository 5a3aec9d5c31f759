//! In-process store used when no database is configured

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use super::{SignalStore, StoreError};
use crate::models::price::PricePoint;
use crate::models::signal::{Signal, SignalFilter, SignalOutcome, SignalStatus};

const DEFAULT_PRICE_RETENTION: usize = 10_000;

pub struct MemoryStore {
    signals: RwLock<Vec<Signal>>,
    prices: RwLock<VecDeque<(PricePoint, String)>>,
    price_retention: usize,
    next_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_price_retention(DEFAULT_PRICE_RETENTION)
    }

    pub fn with_price_retention(price_retention: usize) -> Self {
        Self {
            signals: RwLock::new(Vec::new()),
            prices: RwLock::new(VecDeque::new()),
            price_retention: price_retention.max(1),
            next_id: AtomicI64::new(1),
        }
    }

    /// Recorded prices with their source, oldest first
    pub async fn prices(&self) -> Vec<(PricePoint, String)> {
        self.prices.read().await.iter().cloned().collect()
    }

    pub async fn signal_count(&self) -> usize {
        self.signals.read().await.len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SignalStore for MemoryStore {
    async fn store_price(&self, point: &PricePoint, source: &str) -> Result<(), StoreError> {
        let mut prices = self.prices.write().await;
        prices.push_back((point.clone(), source.to_string()));
        while prices.len() > self.price_retention {
            prices.pop_front();
        }
        Ok(())
    }

    async fn insert_signal(&self, mut signal: Signal) -> Result<Signal, StoreError> {
        signal.id = Some(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.signals.write().await.push(signal.clone());
        Ok(signal)
    }

    async fn get_signal(&self, id: i64) -> Result<Option<Signal>, StoreError> {
        let signals = self.signals.read().await;
        Ok(signals.iter().find(|s| s.id == Some(id)).cloned())
    }

    async fn list_signals(&self, filter: &SignalFilter) -> Result<Vec<Signal>, StoreError> {
        let signals = self.signals.read().await;
        let mut matching: Vec<Signal> = signals.iter().filter(|s| filter.matches(s)).cloned().collect();
        matching.sort_by(|a, b| {
            b.generated_at
                .cmp(&a.generated_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        if let Some(limit) = filter.limit {
            matching.truncate(limit);
        }
        Ok(matching)
    }

    async fn mark_taken(&self, id: i64, outcome: SignalOutcome) -> Result<Signal, StoreError> {
        let mut signals = self.signals.write().await;
        let signal = signals
            .iter_mut()
            .find(|s| s.id == Some(id))
            .ok_or(StoreError::NotFound(id))?;

        if !signal.is_active() {
            return Err(StoreError::AlreadyTaken(id));
        }

        signal.status = SignalStatus::Taken;
        signal.outcome = Some(outcome);
        Ok(signal.clone())
    }
}
