//! Bounded per-instrument price history

use chrono::{DateTime, Utc};
use std::collections::{HashMap, VecDeque};
use tokio::sync::RwLock;
use tracing::debug;

use crate::models::price::PricePoint;

pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Most recent price points per instrument, oldest first.
///
/// Appending beyond `capacity` evicts the oldest point.
pub struct PriceHistory {
    capacity: usize,
    points: RwLock<HashMap<String, VecDeque<PricePoint>>>,
}

impl PriceHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            points: RwLock::new(HashMap::new()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub async fn record(
        &self,
        instrument: &str,
        price: f64,
        observed_at: DateTime<Utc>,
    ) -> PricePoint {
        let point = PricePoint::new(instrument, price, observed_at);
        let mut points = self.points.write().await;
        let series = points.entry(instrument.to_string()).or_default();
        series.push_back(point.clone());
        while series.len() > self.capacity {
            series.pop_front();
        }
        debug!(
            instrument = %instrument,
            price = price,
            len = series.len(),
            "Recorded price for {}",
            instrument
        );
        point
    }

    /// Up to `limit` most recent points, oldest first
    pub async fn history(&self, instrument: &str, limit: usize) -> Vec<PricePoint> {
        let points = self.points.read().await;
        match points.get(instrument) {
            Some(series) => series
                .iter()
                .skip(series.len().saturating_sub(limit))
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    /// The full retained history for an instrument
    pub async fn snapshot(&self, instrument: &str) -> Vec<PricePoint> {
        self.history(instrument, self.capacity).await
    }

    pub async fn len(&self, instrument: &str) -> usize {
        let points = self.points.read().await;
        points.get(instrument).map_or(0, VecDeque::len)
    }

    pub async fn instruments(&self) -> Vec<String> {
        let mut names: Vec<String> = self.points.read().await.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for PriceHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
