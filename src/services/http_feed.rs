//! REST quote feed

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::market_data::{validate_price, FeedError, MarketDataProvider};
use crate::models::price::PriceQuote;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(default)]
    symbol: Option<String>,
    price: f64,
}

/// Fetches quotes from `GET {base_url}/price?symbol=SYM`
pub struct HttpPriceFeed {
    base_url: String,
    client: reqwest::Client,
}

impl HttpPriceFeed {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self::with_client(base_url, client)
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }
}

#[async_trait]
impl MarketDataProvider for HttpPriceFeed {
    async fn latest_quote(&self, symbol: &str) -> Result<PriceQuote, FeedError> {
        let url = format!("{}/price", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("symbol", symbol)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                symbol: symbol.to_string(),
                status: status.as_u16(),
            });
        }

        let body: QuoteResponse = response.json().await?;
        let price = validate_price(symbol, body.price)?;
        debug!(symbol = %symbol, price = price, "Fetched quote for {}", symbol);

        Ok(PriceQuote {
            symbol: body.symbol.unwrap_or_else(|| symbol.to_string()),
            price,
            source: self.source().to_string(),
        })
    }

    fn source(&self) -> &str {
        "http"
    }
}
