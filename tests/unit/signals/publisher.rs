//! Unit tests for signal publication and the take transition

use chrono::{Duration, Utc};
use std::sync::Arc;

use traderedge::db::{MemoryStore, StoreError};
use traderedge::metrics::Metrics;
use traderedge::models::signal::{RiskTier, Signal, SignalDirection, SignalStatus, TradeResult};
use traderedge::signals::publisher::{DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use traderedge::signals::SignalPublisher;

fn signal(symbol: &str, tier: RiskTier, minutes_ago: i64) -> Signal {
    Signal::new(symbol, SignalDirection::Buy, 0.75, 1.1, tier)
        .with_generated_at(Utc::now() - Duration::minutes(minutes_ago))
}

#[tokio::test]
async fn test_publish_assigns_ids_and_counts() {
    let metrics = Arc::new(Metrics::new().unwrap());
    let publisher =
        SignalPublisher::new(Arc::new(MemoryStore::new())).with_metrics(metrics.clone());

    let first = publisher.publish(signal("EURUSD", RiskTier::High, 0)).await.unwrap();
    let second = publisher.publish(signal("GBPUSD", RiskTier::Low, 0)).await.unwrap();

    assert_eq!(first.id, Some(1));
    assert_eq!(second.id, Some(2));
    assert_eq!(metrics.signals_emitted_total.get(), 2);
}

#[tokio::test]
async fn test_recent_is_newest_first_and_filters_by_tier() {
    let publisher = SignalPublisher::new(Arc::new(MemoryStore::new()));
    publisher.publish(signal("EURUSD", RiskTier::Low, 30)).await.unwrap();
    publisher.publish(signal("GBPUSD", RiskTier::High, 20)).await.unwrap();
    publisher.publish(signal("USDJPY", RiskTier::Low, 10)).await.unwrap();

    let all = publisher.recent(None, None).await.unwrap();
    let symbols: Vec<&str> = all.iter().map(|s| s.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["USDJPY", "GBPUSD", "EURUSD"]);

    let low = publisher.recent(None, Some(RiskTier::Low)).await.unwrap();
    assert_eq!(low.len(), 2);
    assert!(low.iter().all(|s| s.risk_tier == RiskTier::Low));

    let medium = publisher.recent(None, Some(RiskTier::Medium)).await.unwrap();
    assert!(medium.is_empty());
}

#[tokio::test]
async fn test_recent_limit_defaults_and_clamps() {
    let publisher = SignalPublisher::new(Arc::new(MemoryStore::new()));
    for i in 0..(DEFAULT_LIST_LIMIT + 5) {
        publisher
            .publish(signal("EURUSD", RiskTier::High, i as i64))
            .await
            .unwrap();
    }

    assert_eq!(publisher.recent(None, None).await.unwrap().len(), DEFAULT_LIST_LIMIT);
    assert_eq!(publisher.recent(Some(3), None).await.unwrap().len(), 3);
    assert_eq!(publisher.recent(Some(0), None).await.unwrap().len(), 1);
    assert_eq!(
        publisher.recent(Some(MAX_LIST_LIMIT * 2), None).await.unwrap().len(),
        DEFAULT_LIST_LIMIT + 5
    );
}

#[tokio::test]
async fn test_take_is_a_one_way_transition() {
    let publisher = SignalPublisher::new(Arc::new(MemoryStore::new()));
    let stored = publisher.publish(signal("EURUSD", RiskTier::Medium, 0)).await.unwrap();
    let id = stored.id.unwrap();

    let taken = publisher.take(id, TradeResult::Win, 42.5).await.unwrap();
    assert_eq!(taken.status, SignalStatus::Taken);
    let outcome = taken.outcome.as_ref().unwrap();
    assert_eq!(outcome.result, TradeResult::Win);
    assert_eq!(outcome.pnl, 42.5);

    // Content fields survive the transition
    assert_eq!(taken.symbol, stored.symbol);
    assert_eq!(taken.confidence, stored.confidence);
    assert_eq!(taken.generated_at, stored.generated_at);

    let again = publisher.take(id, TradeResult::Loss, -1.0).await;
    assert!(matches!(again, Err(StoreError::AlreadyTaken(i)) if i == id));

    let fetched = publisher.get(id).await.unwrap().unwrap();
    assert_eq!(fetched.outcome.unwrap().result, TradeResult::Win);
}

#[tokio::test]
async fn test_take_unknown_signal() {
    let publisher = SignalPublisher::new(Arc::new(MemoryStore::new()));
    let result = publisher.take(99, TradeResult::Breakeven, 0.0).await;
    assert!(matches!(result, Err(StoreError::NotFound(99))));
    assert!(publisher.get(99).await.unwrap().is_none());
}
