//! Unit tests for RSI indicator

use crate::support::assert_close;
use traderedge::indicators::momentum::calculate_rsi;
use traderedge::indicators::{Reading, NEUTRAL_RSI, RSI_MIN_POINTS, RSI_PERIOD};

#[test]
fn test_rsi_neutral_below_fifteen_points() {
    for len in 0..RSI_MIN_POINTS {
        let prices: Vec<f64> = (0..len).map(|i| 1.0 + i as f64 * 0.01).collect();
        let reading = calculate_rsi(&prices, RSI_PERIOD);
        assert!(reading.is_fallback());
        assert_eq!(reading.value(), NEUTRAL_RSI);
    }
}

#[test]
fn test_rsi_zero_losses_is_100() {
    let rising: Vec<f64> = (1..=15).map(f64::from).collect();
    assert_eq!(calculate_rsi(&rising, 14), Reading::Computed { value: 100.0 });

    let flat = vec![1.0; 20];
    assert_eq!(calculate_rsi(&flat, 14).value(), 100.0);
}

#[test]
fn test_rsi_only_losses_is_0() {
    let falling: Vec<f64> = (1..=15).rev().map(f64::from).collect();
    assert_close(calculate_rsi(&falling, 14).value(), 0.0);
}

#[test]
fn test_rsi_mixed_moves() {
    let prices = [
        1.0, 1.1, 1.05, 1.2, 1.15, 1.3, 1.25, 1.4, 1.35, 1.5, 1.45, 1.6, 1.55, 1.7, 1.65,
    ];
    let rsi = calculate_rsi(&prices, 14).value();
    assert!((rsi - 74.074074).abs() < 1e-4, "rsi = {rsi}");
}

#[test]
fn test_rsi_only_looks_at_last_window() {
    // A crash well before the window must not matter
    let mut prices = vec![10.0, 1.0];
    prices.extend((1..=15).map(|i| 1.0 + i as f64 * 0.01));
    assert_eq!(calculate_rsi(&prices, 14).value(), 100.0);
}
