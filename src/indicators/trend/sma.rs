//! SMA (Simple Moving Average) indicator

use crate::common::math;
use crate::indicators::reading::Reading;

/// Mean of the last `period` prices.
///
/// With fewer than `period` prices the mean of everything available is
/// returned as the fallback.
pub fn calculate_sma(prices: &[f64], period: usize) -> Reading<f64> {
    Reading::gated(period, prices.len(), math::sma(prices, period))
}
