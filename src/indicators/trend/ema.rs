//! EMA (Exponential Moving Average) indicator

use crate::common::math;
use crate::indicators::reading::Reading;

/// EMA over the whole sequence with α = 2/(period+1), seeded by the first
/// price rather than an SMA of the first window.
pub fn calculate_ema(prices: &[f64], period: usize) -> Reading<f64> {
    Reading::gated(period, prices.len(), math::ema(prices, period))
}
