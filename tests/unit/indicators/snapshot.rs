//! Unit tests for indicator snapshot assembly

use chrono::{Duration, Utc};

use crate::support::{assert_close, choppy, points};
use traderedge::indicators::compute_snapshot;
use traderedge::indicators::snapshot::change_24h;
use traderedge::models::price::PricePoint;

#[test]
fn test_empty_history_has_no_snapshot() {
    assert!(compute_snapshot(&[]).is_none());
}

#[test]
fn test_single_point_snapshot_uses_fallbacks() {
    let snapshot = compute_snapshot(&points("EURUSD", &[1.085])).unwrap();

    assert_eq!(snapshot.points, 1);
    assert_eq!(snapshot.current_price, 1.085);
    assert_eq!(snapshot.sma_20, 1.085);
    assert_eq!(snapshot.sma_50, 1.085);
    assert_eq!(snapshot.rsi_14, 50.0);
    assert_eq!(snapshot.macd_line, 0.0);
    assert_eq!(snapshot.macd_signal, 0.0);
    assert_eq!(snapshot.bollinger_upper, 1.085);
    assert_eq!(snapshot.bollinger_lower, 1.085);
    assert_eq!(snapshot.change_24h_pct, 0.0);
    for name in ["sma_20", "sma_50", "ema_12", "ema_26", "rsi_14", "macd_signal", "bollinger"] {
        assert!(
            snapshot.fallbacks.iter().any(|f| f == name),
            "missing fallback {name}"
        );
    }
}

#[test]
fn test_full_history_has_no_fallbacks() {
    let snapshot = compute_snapshot(&points("EURUSD", &choppy(60))).unwrap();
    assert!(snapshot.fallbacks.is_empty(), "{:?}", snapshot.fallbacks);
    assert_eq!(snapshot.points, 60);
    assert_eq!(snapshot.rsi_14, 50.0);
    assert_close(snapshot.sma_20, 1.0005);
    assert_close(snapshot.bollinger_upper, 1.0015);
    assert_close(snapshot.bollinger_lower, 0.9995);
}

#[test]
fn test_partial_history_only_flags_missing_windows() {
    let snapshot = compute_snapshot(&points("EURUSD", &choppy(30))).unwrap();
    assert_eq!(snapshot.fallbacks, vec!["sma_50", "macd_signal"]);
}

#[test]
fn test_change_24h_ignores_points_older_than_a_day() {
    let now = Utc::now();
    let history = vec![
        PricePoint::new("EURUSD", 1.0, now - Duration::hours(30)),
        PricePoint::new("EURUSD", 2.0, now - Duration::hours(20)),
        PricePoint::new("EURUSD", 3.0, now),
    ];
    assert_close(change_24h(&history), 50.0);
}

#[test]
fn test_change_24h_within_window_uses_oldest_point() {
    let history = points("GBPUSD", &[1.25, 1.30, 1.20]);
    assert_close(change_24h(&history), -4.0);
    assert_eq!(change_24h(&[]), 0.0);
}

#[test]
fn test_long_sma_warms_up_on_all_available_points() {
    let prices: Vec<f64> = (0..30).map(|i| 1.0 + i as f64 * 0.001).collect();
    let snapshot = compute_snapshot(&points("EURUSD", &prices)).unwrap();

    let mean = prices.iter().sum::<f64>() / prices.len() as f64;
    assert_close(snapshot.sma_50, mean);
    assert!(snapshot.sma_20 > snapshot.sma_50);
    assert!(snapshot.fallbacks.iter().any(|f| f == "sma_50"));
    assert!(!snapshot.fallbacks.iter().any(|f| f == "sma_20"));
}
