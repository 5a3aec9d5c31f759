use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded price observation. Never mutated after recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub instrument: String,
    pub price: f64,
    pub observed_at: DateTime<Utc>,
}

impl PricePoint {
    pub fn new(instrument: impl Into<String>, price: f64, observed_at: DateTime<Utc>) -> Self {
        Self {
            instrument: instrument.into(),
            price,
            observed_at,
        }
    }
}

/// A quote delivered by a market data feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub symbol: String,
    pub price: f64,
    pub source: String,
}
