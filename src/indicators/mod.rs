//! Technical indicators computed from an oldest-first price sequence.
//!
//! Each calculator degrades to a named fallback instead of failing when the
//! history is too short; see [`Reading`].

pub mod reading;
pub mod snapshot;

pub mod momentum;
pub mod trend;
pub mod volatility;

pub use reading::*;
pub use snapshot::compute_snapshot;
