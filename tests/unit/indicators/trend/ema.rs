//! Unit tests for EMA indicator

use crate::support::assert_close;
use traderedge::indicators::trend::calculate_ema;

#[test]
fn test_ema_seeded_by_first_price() {
    let reading = calculate_ema(&[1.0, 2.0, 3.0], 2);
    assert!(!reading.is_fallback());
    assert_close(reading.value(), 23.0 / 9.0);
}

#[test]
fn test_ema_insufficient_data_still_reports_value() {
    let reading = calculate_ema(&[1.0, 2.0, 3.0], 26);
    assert!(reading.is_fallback());
    assert!(reading.value() > 1.0 && reading.value() < 3.0);
}

#[test]
fn test_ema_of_constant_series_is_constant() {
    let reading = calculate_ema(&[1.2345; 40], 12);
    assert_close(reading.value(), 1.2345);
}

#[test]
fn test_fast_ema_tracks_uptrend_closer_than_slow() {
    let prices: Vec<f64> = (0..50).map(|i| 100.0 + i as f64 * 0.5).collect();
    let fast = calculate_ema(&prices, 12).value();
    let slow = calculate_ema(&prices, 26).value();
    assert!(fast > slow);
    assert!(fast < *prices.last().unwrap());
}
