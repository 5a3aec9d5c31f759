//! Integration tests for the PostgreSQL store
//!
//! Run with `DATABASE_URL` pointing at a scratch database and `--ignored`.

use chrono::{Duration, Utc};
use rand::Rng;
use traderedge::db::{PostgresStore, SignalStore, StoreError};
use traderedge::indicators::compute_snapshot;
use traderedge::models::price::PricePoint;
use traderedge::models::signal::{
    RiskTier, Signal, SignalDirection, SignalFilter, SignalOutcome, SignalStatus, TradeResult,
};

async fn connect() -> Option<PostgresStore> {
    let url = std::env::var("DATABASE_URL").ok()?;
    Some(PostgresStore::connect(&url).await.expect("connect to DATABASE_URL"))
}

/// A symbol no other run has written, so list assertions see only this test's rows
fn scratch_symbol() -> String {
    format!("T{:08}", rand::thread_rng().gen_range(0..100_000_000u32))
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn signals_round_trip_through_postgres() {
    let Some(store) = connect().await else {
        return;
    };
    let symbol = scratch_symbol();
    let now = Utc::now();

    let point = PricePoint::new(symbol.as_str(), 1.0851, now);
    store.store_price(&point, "test").await.unwrap();

    let snapshot = compute_snapshot(&[point]).unwrap();
    let older = store
        .insert_signal(
            Signal::new(symbol.as_str(), SignalDirection::Buy, 0.95, 1.0851, RiskTier::Low)
                .with_rationale(vec!["RSI oversold (25.00)".to_string()])
                .with_snapshot(snapshot.clone())
                .with_generated_at(now - Duration::minutes(5)),
        )
        .await
        .unwrap();
    let newer = store
        .insert_signal(
            Signal::new(symbol.as_str(), SignalDirection::Sell, 0.75, 1.0849, RiskTier::High)
                .with_generated_at(now),
        )
        .await
        .unwrap();

    let fetched = store.get_signal(older.id.unwrap()).await.unwrap().unwrap();
    assert_eq!(fetched.rationale, vec!["RSI oversold (25.00)"]);
    assert_eq!(fetched.snapshot, Some(snapshot));
    assert_eq!(fetched.risk_tier, RiskTier::Low);
    assert_eq!(fetched.status, SignalStatus::Active);

    // No limit: LIMIT NULL returns every matching row
    let all = store
        .list_signals(&SignalFilter {
            symbol: Some(symbol.to_lowercase()),
            ..SignalFilter::default()
        })
        .await
        .unwrap();
    let ids: Vec<Option<i64>> = all.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);

    let low = store
        .list_signals(&SignalFilter {
            limit: Some(10),
            risk_tier: Some(RiskTier::Low),
            symbol: Some(symbol.clone()),
        })
        .await
        .unwrap();
    assert_eq!(low.len(), 1);
    assert_eq!(low[0].id, older.id);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn mark_taken_distinguishes_missing_and_taken() {
    let Some(store) = connect().await else {
        return;
    };
    let outcome = || SignalOutcome {
        result: TradeResult::Win,
        pnl: 18.25,
        closed_at: Utc::now(),
    };

    let stored = store
        .insert_signal(Signal::new(
            scratch_symbol(),
            SignalDirection::Buy,
            0.8,
            1.2650,
            RiskTier::Medium,
        ))
        .await
        .unwrap();
    let id = stored.id.unwrap();

    let taken = store.mark_taken(id, outcome()).await.unwrap();
    assert_eq!(taken.status, SignalStatus::Taken);
    let recorded = taken.outcome.unwrap();
    assert_eq!(recorded.result, TradeResult::Win);
    assert_eq!(recorded.pnl, 18.25);

    assert!(matches!(
        store.mark_taken(id, outcome()).await,
        Err(StoreError::AlreadyTaken(i)) if i == id
    ));
    assert!(matches!(
        store.mark_taken(-1, outcome()).await,
        Err(StoreError::NotFound(-1))
    ));
}
