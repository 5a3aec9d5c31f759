//! TraderEdge signal engine
//!
//! Records forex prices, computes technical indicators and publishes
//! buy/sell signals filtered by consumer risk tier.

pub mod common;
pub mod config;
pub mod core;
pub mod db;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
