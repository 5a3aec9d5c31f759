//! Market data ingestion and price history.

pub mod history;
pub mod http_feed;
pub mod market_data;
pub mod simulated_feed;

pub use history::PriceHistory;
pub use http_feed::HttpPriceFeed;
pub use market_data::{FeedError, MarketDataProvider};
pub use simulated_feed::SimulatedPriceFeed;
