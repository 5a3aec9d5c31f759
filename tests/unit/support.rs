//! Price series shared by the unit tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use traderedge::models::indicators::IndicatorSnapshot;
use traderedge::models::price::{PricePoint, PriceQuote};
use traderedge::services::{FeedError, MarketDataProvider};

/// Points one minute apart ending now
pub fn points(symbol: &str, prices: &[f64]) -> Vec<PricePoint> {
    let start = Utc::now() - Duration::minutes(prices.len() as i64);
    prices
        .iter()
        .enumerate()
        .map(|(i, &price)| PricePoint::new(symbol, price, start + Duration::minutes(i as i64)))
        .collect()
}

/// Flat stretch, a jump, 13 steps against the jump, then one step back
pub fn reversal(flat: usize, jump_to: f64, step: f64) -> Vec<f64> {
    let mut prices = vec![1.0; flat];
    prices.push(jump_to);
    for _ in 0..13 {
        let last = *prices.last().unwrap();
        prices.push(last - step);
    }
    let last = *prices.last().unwrap();
    prices.push(last + step);
    prices
}

/// 34 points: oversold RSI, price above both averages, MACD line above a zero signal
pub fn oversold_reversal() -> Vec<f64> {
    reversal(19, 1.2, 0.005)
}

/// Mirror of `oversold_reversal`
pub fn overbought_reversal() -> Vec<f64> {
    reversal(19, 0.8, -0.005)
}

/// Alternating prices: RSI 50, price hugging its averages
pub fn choppy(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| if i % 2 == 0 { 1.0 } else { 1.001 })
        .collect()
}

pub fn neutral_snapshot(price: f64) -> IndicatorSnapshot {
    IndicatorSnapshot {
        sma_20: price,
        sma_50: price,
        ema_12: price,
        ema_26: price,
        rsi_14: 50.0,
        macd_line: 0.0,
        macd_signal: 0.0,
        bollinger_upper: price * 1.01,
        bollinger_lower: price * 0.99,
        current_price: price,
        change_24h_pct: 0.0,
        points: 60,
        fallbacks: Vec::new(),
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

/// Serves queued prices per symbol; an empty queue is a feed error
pub struct ScriptedProvider {
    prices: Mutex<HashMap<String, VecDeque<f64>>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self {
            prices: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_prices(self, symbol: &str, prices: &[f64]) -> Self {
        self.prices
            .lock()
            .unwrap()
            .insert(symbol.to_string(), prices.iter().copied().collect());
        self
    }
}

#[async_trait]
impl MarketDataProvider for ScriptedProvider {
    async fn latest_quote(&self, symbol: &str) -> Result<PriceQuote, FeedError> {
        let price = self
            .prices
            .lock()
            .unwrap()
            .get_mut(symbol)
            .and_then(VecDeque::pop_front)
            .ok_or_else(|| FeedError::Unavailable(symbol.to_string()))?;
        Ok(PriceQuote {
            symbol: symbol.to_string(),
            price,
            source: self.source().to_string(),
        })
    }

    fn source(&self) -> &str {
        "scripted"
    }
}
