//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod price;
pub mod signal;

pub use indicators::{BollingerBands, IndicatorSnapshot, MacdValue};
pub use price::{PricePoint, PriceQuote};
pub use signal::{
    RiskTier, Signal, SignalDirection, SignalEvaluation, SignalFilter, SignalOutcome,
    SignalStatus, TradeResult,
};
