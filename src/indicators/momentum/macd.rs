//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;
use crate::indicators::reading::{
    Reading, EMA_FAST_PERIOD, EMA_SLOW_PERIOD, MACD_SIGNAL_MIN_POINTS, MACD_SIGNAL_PERIOD,
};
use crate::models::indicators::MacdValue;

/// Calculate MACD with the standard 12/26/9 periods
///
/// MACD = EMA(12) - EMA(26)
/// Signal = EMA(9) of the MACD history
/// Histogram = MACD - Signal
///
/// The MACD history starts at the first index with a full slow window. Below
/// `MACD_SIGNAL_MIN_POINTS` prices the signal line is 0.
pub fn calculate_macd(prices: &[f64]) -> Reading<MacdValue> {
    let fast = math::ema_series(prices, EMA_FAST_PERIOD);
    let slow = math::ema_series(prices, EMA_SLOW_PERIOD);

    let line = match (fast.last(), slow.last()) {
        (Some(f), Some(s)) => f - s,
        _ => 0.0,
    };

    if prices.len() < MACD_SIGNAL_MIN_POINTS {
        return Reading::gated(
            MACD_SIGNAL_MIN_POINTS,
            prices.len(),
            MacdValue {
                line,
                signal: 0.0,
                histogram: line,
            },
        );
    }

    let history: Vec<f64> = fast
        .iter()
        .zip(slow.iter())
        .skip(EMA_SLOW_PERIOD - 1)
        .map(|(f, s)| f - s)
        .collect();
    let signal = math::ema(&history, MACD_SIGNAL_PERIOD);

    Reading::computed(MacdValue {
        line,
        signal,
        histogram: line - signal,
    })
}
