//! Signal scoring and publication.

pub mod publisher;
pub mod scoring;

pub use publisher::SignalPublisher;
pub use scoring::SignalScorer;
