//! PostgreSQL operations for prices and signals

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_postgres::{Client, NoTls, Row};

use super::{SignalStore, StoreError};
use crate::models::indicators::IndicatorSnapshot;
use crate::models::price::PricePoint;
use crate::models::signal::{Signal, SignalFilter, SignalOutcome, SignalStatus};

const SIGNAL_COLUMNS: &str = "id, symbol, direction, confidence, price, generated_at, risk_tier, \
     status, rationale_json, snapshot_json, result, pnl, closed_at";

pub struct PostgresStore {
    client: Client,
}

impl PostgresStore {
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let (client, connection) = tokio_postgres::connect(database_url, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(error = %e, "PostgreSQL connection error");
            }
        });

        let store = Self { client };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), StoreError> {
        self.client
            .batch_execute(
                "CREATE TABLE IF NOT EXISTS price_points (
                    id BIGSERIAL PRIMARY KEY,
                    symbol TEXT NOT NULL,
                    price DOUBLE PRECISION NOT NULL,
                    source TEXT NOT NULL,
                    observed_at TIMESTAMPTZ NOT NULL
                );
                CREATE INDEX IF NOT EXISTS price_points_symbol_time
                    ON price_points (symbol, observed_at);
                CREATE TABLE IF NOT EXISTS signals (
                    id BIGSERIAL PRIMARY KEY,
                    symbol TEXT NOT NULL,
                    direction TEXT NOT NULL,
                    confidence DOUBLE PRECISION NOT NULL,
                    price DOUBLE PRECISION NOT NULL,
                    generated_at TIMESTAMPTZ NOT NULL,
                    risk_tier TEXT NOT NULL,
                    status TEXT NOT NULL DEFAULT 'active',
                    rationale_json TEXT NOT NULL,
                    snapshot_json TEXT,
                    result TEXT,
                    pnl DOUBLE PRECISION,
                    closed_at TIMESTAMPTZ
                );
                CREATE INDEX IF NOT EXISTS signals_generated_at
                    ON signals (generated_at DESC);",
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl SignalStore for PostgresStore {
    async fn store_price(&self, point: &PricePoint, source: &str) -> Result<(), StoreError> {
        self.client
            .execute(
                "INSERT INTO price_points (symbol, price, source, observed_at)
                 VALUES ($1, $2, $3, $4)",
                &[&point.instrument, &point.price, &source, &point.observed_at],
            )
            .await?;
        Ok(())
    }

    async fn insert_signal(&self, mut signal: Signal) -> Result<Signal, StoreError> {
        let rationale_json = serde_json::to_string(&signal.rationale)?;
        let snapshot_json = signal
            .snapshot
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let row = self
            .client
            .query_one(
                "INSERT INTO signals (symbol, direction, confidence, price, generated_at,
                                      risk_tier, status, rationale_json, snapshot_json)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                 RETURNING id",
                &[
                    &signal.symbol,
                    &signal.direction.as_str(),
                    &signal.confidence,
                    &signal.price,
                    &signal.generated_at,
                    &signal.risk_tier.as_str(),
                    &signal.status.as_str(),
                    &rationale_json,
                    &snapshot_json,
                ],
            )
            .await?;

        signal.id = Some(row.get(0));
        Ok(signal)
    }

    async fn get_signal(&self, id: i64) -> Result<Option<Signal>, StoreError> {
        let query = format!("SELECT {} FROM signals WHERE id = $1", SIGNAL_COLUMNS);
        let row = self.client.query_opt(&query, &[&id]).await?;
        row.as_ref().map(signal_from_row).transpose()
    }

    async fn list_signals(&self, filter: &SignalFilter) -> Result<Vec<Signal>, StoreError> {
        let tier = filter.risk_tier.map(|t| t.as_str());
        let symbol = filter.symbol.as_ref().map(|s| s.to_uppercase());
        let limit = filter.limit.map(|l| l as i64);

        let query = format!(
            "SELECT {} FROM signals
             WHERE ($1::TEXT IS NULL OR risk_tier = $1)
               AND ($2::TEXT IS NULL OR UPPER(symbol) = $2)
             ORDER BY generated_at DESC, id DESC
             LIMIT $3",
            SIGNAL_COLUMNS
        );
        let rows = self.client.query(&query, &[&tier, &symbol, &limit]).await?;
        rows.iter().map(signal_from_row).collect()
    }

    async fn mark_taken(&self, id: i64, outcome: SignalOutcome) -> Result<Signal, StoreError> {
        let query = format!(
            "UPDATE signals
             SET status = 'taken', result = $2, pnl = $3, closed_at = $4
             WHERE id = $1 AND status = 'active'
             RETURNING {}",
            SIGNAL_COLUMNS
        );
        let row = self
            .client
            .query_opt(
                &query,
                &[&id, &outcome.result.as_str(), &outcome.pnl, &outcome.closed_at],
            )
            .await?;

        match row {
            Some(row) => signal_from_row(&row),
            None => match self.get_signal(id).await? {
                Some(_) => Err(StoreError::AlreadyTaken(id)),
                None => Err(StoreError::NotFound(id)),
            },
        }
    }
}

fn signal_from_row(row: &Row) -> Result<Signal, StoreError> {
    let direction: String = row.get(2);
    let risk_tier: String = row.get(6);
    let status: String = row.get(7);
    let rationale_json: String = row.get(8);
    let snapshot_json: Option<String> = row.get(9);
    let result: Option<String> = row.get(10);
    let pnl: Option<f64> = row.get(11);
    let closed_at: Option<DateTime<Utc>> = row.get(12);

    let snapshot = snapshot_json
        .map(|json| serde_json::from_str::<IndicatorSnapshot>(&json))
        .transpose()?;

    let outcome = match (result, closed_at) {
        (Some(result), Some(closed_at)) => Some(SignalOutcome {
            result: result
                .parse()
                .map_err(|e| StoreError::InvalidData(format!("result: {}", e)))?,
            pnl: pnl.unwrap_or(0.0),
            closed_at,
        }),
        _ => None,
    };

    Ok(Signal {
        id: Some(row.get(0)),
        symbol: row.get(1),
        direction: direction
            .parse()
            .map_err(|e| StoreError::InvalidData(format!("direction: {}", e)))?,
        confidence: row.get(3),
        price: row.get(4),
        generated_at: row.get(5),
        snapshot,
        rationale: serde_json::from_str(&rationale_json)?,
        risk_tier: risk_tier
            .parse()
            .map_err(|e| StoreError::InvalidData(format!("risk_tier: {}", e)))?,
        status: status
            .parse::<SignalStatus>()
            .map_err(|e| StoreError::InvalidData(format!("status: {}", e)))?,
        outcome,
    })
}
