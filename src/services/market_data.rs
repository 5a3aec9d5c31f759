//! Market data provider interface

use async_trait::async_trait;
use thiserror::Error;

use crate::models::price::PriceQuote;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("feed returned status {status} for {symbol}")]
    Status { symbol: String, status: u16 },
    #[error("invalid price {price} for {symbol}")]
    InvalidPrice { symbol: String, price: f64 },
    #[error("no quote available for {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Latest quote for a symbol
    async fn latest_quote(&self, symbol: &str) -> Result<PriceQuote, FeedError>;

    /// Short identifier recorded next to stored prices
    fn source(&self) -> &str;
}

/// Reject prices a feed should never report
pub fn validate_price(symbol: &str, price: f64) -> Result<f64, FeedError> {
    if price.is_finite() && price > 0.0 {
        Ok(price)
    } else {
        Err(FeedError::InvalidPrice {
            symbol: symbol.to_string(),
            price,
        })
    }
}
