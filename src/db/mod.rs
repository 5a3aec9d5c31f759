//! Persistence for recorded prices and published signals

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::price::PricePoint;
use crate::models::signal::{Signal, SignalFilter, SignalOutcome};

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("signal {0} not found")]
    NotFound(i64),
    #[error("signal {0} has already been taken")]
    AlreadyTaken(i64),
    #[error("database error: {0}")]
    Database(#[from] tokio_postgres::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("invalid stored value: {0}")]
    InvalidData(String),
}

/// Backend for prices and signals.
///
/// Signals are append-only apart from the single `active -> taken`
/// transition performed by `mark_taken`.
#[async_trait]
pub trait SignalStore: Send + Sync {
    async fn store_price(&self, point: &PricePoint, source: &str) -> Result<(), StoreError>;

    /// Insert a signal and return it with its assigned id
    async fn insert_signal(&self, signal: Signal) -> Result<Signal, StoreError>;

    async fn get_signal(&self, id: i64) -> Result<Option<Signal>, StoreError>;

    /// Matching signals, newest first
    async fn list_signals(&self, filter: &SignalFilter) -> Result<Vec<Signal>, StoreError>;

    async fn mark_taken(&self, id: i64, outcome: SignalOutcome) -> Result<Signal, StoreError>;
}
