//! Random-walk quotes for running without an external feed

use async_trait::async_trait;
use rand::Rng;
use std::collections::HashMap;
use std::sync::Mutex;

use super::market_data::{FeedError, MarketDataProvider};
use crate::models::price::PriceQuote;

/// Largest relative move per quote
const MAX_STEP: f64 = 0.002;

pub struct SimulatedPriceFeed {
    prices: Mutex<HashMap<String, f64>>,
}

impl SimulatedPriceFeed {
    pub fn new() -> Self {
        let seeds = [
            ("EURUSD", 1.0850),
            ("GBPUSD", 1.2650),
            ("USDJPY", 149.50),
            ("AUDUSD", 0.6550),
            ("USDCAD", 1.3600),
            ("USDCHF", 0.8800),
            ("NZDUSD", 0.6100),
        ];
        Self {
            prices: Mutex::new(
                seeds
                    .iter()
                    .map(|(symbol, price)| (symbol.to_string(), *price))
                    .collect(),
            ),
        }
    }

    fn next_price(&self, symbol: &str) -> Result<f64, FeedError> {
        let mut prices = self
            .prices
            .lock()
            .map_err(|_| FeedError::Unavailable(symbol.to_string()))?;
        let current = prices.entry(symbol.to_uppercase()).or_insert(1.0);
        let step = rand::thread_rng().gen_range(-MAX_STEP..=MAX_STEP);
        *current = (*current * (1.0 + step)).max(f64::EPSILON);
        Ok(*current)
    }
}

impl Default for SimulatedPriceFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataProvider for SimulatedPriceFeed {
    async fn latest_quote(&self, symbol: &str) -> Result<PriceQuote, FeedError> {
        let price = self.next_price(symbol)?;
        Ok(PriceQuote {
            symbol: symbol.to_string(),
            price,
            source: self.source().to_string(),
        })
    }

    fn source(&self) -> &str {
        "simulated"
    }
}
