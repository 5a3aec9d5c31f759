//! Assemble every indicator into one snapshot

use chrono::Duration;

use crate::common::math;
use crate::indicators::momentum::{calculate_macd, calculate_rsi};
use crate::indicators::reading::{
    Reading, BOLLINGER_PERIOD, BOLLINGER_STD_DEV, EMA_FAST_PERIOD, EMA_SLOW_PERIOD, RSI_PERIOD,
    SMA_LONG_PERIOD, SMA_SHORT_PERIOD,
};
use crate::indicators::trend::{calculate_ema, calculate_sma};
use crate::indicators::volatility::calculate_bollinger_bands;
use crate::models::indicators::IndicatorSnapshot;
use crate::models::price::PricePoint;

/// Compute the indicator snapshot for an oldest-first history.
///
/// Returns `None` only for an empty history.
pub fn compute_snapshot(points: &[PricePoint]) -> Option<IndicatorSnapshot> {
    let latest = points.last()?;
    let prices: Vec<f64> = points.iter().map(|p| p.price).collect();

    let sma_20 = calculate_sma(&prices, SMA_SHORT_PERIOD);
    let sma_50 = calculate_sma(&prices, SMA_LONG_PERIOD);
    let ema_12 = calculate_ema(&prices, EMA_FAST_PERIOD);
    let ema_26 = calculate_ema(&prices, EMA_SLOW_PERIOD);
    let rsi_14 = calculate_rsi(&prices, RSI_PERIOD);
    let macd = calculate_macd(&prices);
    let bands = calculate_bollinger_bands(&prices, BOLLINGER_PERIOD, BOLLINGER_STD_DEV);

    let mut fallbacks = Vec::new();
    note_fallback(&mut fallbacks, "sma_20", &sma_20);
    note_fallback(&mut fallbacks, "sma_50", &sma_50);
    note_fallback(&mut fallbacks, "ema_12", &ema_12);
    note_fallback(&mut fallbacks, "ema_26", &ema_26);
    note_fallback(&mut fallbacks, "rsi_14", &rsi_14);
    note_fallback(&mut fallbacks, "macd_signal", &macd);
    note_fallback(&mut fallbacks, "bollinger", &bands);

    let macd = macd.value();
    let bands = bands.value();

    Some(IndicatorSnapshot {
        sma_20: sma_20.value(),
        sma_50: sma_50.value(),
        ema_12: ema_12.value(),
        ema_26: ema_26.value(),
        rsi_14: rsi_14.value(),
        macd_line: macd.line,
        macd_signal: macd.signal,
        bollinger_upper: bands.upper,
        bollinger_lower: bands.lower,
        current_price: latest.price,
        change_24h_pct: change_24h(points),
        points: points.len(),
        fallbacks,
    })
}

/// Percent change from the oldest point within 24h of the newest one
pub fn change_24h(points: &[PricePoint]) -> f64 {
    let Some(latest) = points.last() else {
        return 0.0;
    };
    let cutoff = latest.observed_at - Duration::hours(24);
    let reference = points
        .iter()
        .find(|p| p.observed_at >= cutoff)
        .unwrap_or(latest);
    math::percent_change(reference.price, latest.price)
}

fn note_fallback<T: Copy>(fallbacks: &mut Vec<String>, name: &str, reading: &Reading<T>) {
    if reading.is_fallback() {
        fallbacks.push(name.to_string());
    }
}
