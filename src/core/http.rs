//! HTTP endpoint server using Axum

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, Request, State,
    },
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, Level};

use crate::db::StoreError;
use crate::indicators::compute_snapshot;
use crate::metrics::Metrics;
use crate::models::indicators::IndicatorSnapshot;
use crate::models::signal::{RiskTier, Signal, SignalDirection, TradeResult};
use crate::services::history::PriceHistory;
use crate::signals::SignalPublisher;

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub publisher: Arc<SignalPublisher>,
    pub history: Arc<PriceHistory>,
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

/// Error responses as `{ "error": message }`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        let status = match e {
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::AlreadyTaken(_) => StatusCode::CONFLICT,
            _ => {
                error!(error = %e, "Signal store error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: e.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "traderedge-signal-engine"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis() as u64,
            "HTTP request error"
        );
    }

    response
}

#[derive(Debug, Deserialize)]
pub struct SignalQuery {
    limit: Option<usize>,
    risk_tier: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSignalRequest {
    pub symbol: String,
    pub signal_type: String,
    pub confidence: f64,
    pub price: f64,
    #[serde(default)]
    pub risk_tier: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TakeSignalRequest {
    pub result: String,
    pub pnl: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignalResponse {
    pub id: i64,
    pub symbol: String,
    pub signal_type: SignalDirection,
    pub confidence: f64,
    pub price: f64,
    pub timestamp: DateTime<Utc>,
    pub status: String,
    pub risk_tier: RiskTier,
    pub rationale: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub result: Option<TradeResult>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub pnl: Option<f64>,
}

impl From<Signal> for SignalResponse {
    fn from(signal: Signal) -> Self {
        Self {
            id: signal.id.unwrap_or(0),
            symbol: signal.symbol,
            signal_type: signal.direction,
            confidence: signal.confidence,
            price: signal.price,
            timestamp: signal.generated_at,
            status: signal.status.as_str().to_string(),
            risk_tier: signal.risk_tier,
            rationale: signal.rationale,
            result: signal.outcome.as_ref().map(|o| o.result),
            pnl: signal.outcome.as_ref().map(|o| o.pnl),
        }
    }
}

fn parse_tier(raw: &str) -> Result<RiskTier, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request(format!("unknown risk_tier '{}'", raw)))
}

/// List signals, newest first, optionally for one risk tier
async fn list_signals(
    State(state): State<AppState>,
    query: Result<Query<SignalQuery>, QueryRejection>,
) -> Result<Json<Vec<SignalResponse>>, ApiError> {
    let Query(params) = query?;
    let tier = params.risk_tier.as_deref().map(parse_tier).transpose()?;
    let signals = state.publisher.recent(params.limit, tier).await?;
    Ok(Json(signals.into_iter().map(Into::into).collect()))
}

/// Manually inject an active signal
async fn create_signal(
    State(state): State<AppState>,
    body: Result<Json<CreateSignalRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SignalResponse>), ApiError> {
    let Json(request) = body?;
    let symbol = request.symbol.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(ApiError::bad_request("symbol must not be empty"));
    }

    let direction: SignalDirection = request
        .signal_type
        .parse()
        .map_err(|_| ApiError::bad_request("signal_type must be 'buy' or 'sell'"))?;
    if direction == SignalDirection::Hold {
        return Err(ApiError::bad_request("signal_type must be 'buy' or 'sell'"));
    }

    if !(0.0..=1.0).contains(&request.confidence) {
        return Err(ApiError::bad_request("confidence must be between 0 and 1"));
    }
    if !request.price.is_finite() || request.price <= 0.0 {
        return Err(ApiError::bad_request("price must be a positive number"));
    }

    let tier = match request.risk_tier.as_deref() {
        Some(raw) => parse_tier(raw)?,
        None => RiskTier::from_confidence(request.confidence),
    };

    let signal = Signal::new(symbol, direction, request.confidence, request.price, tier)
        .with_rationale(vec!["Manual entry".to_string()]);
    let stored = state.publisher.publish(signal).await?;

    info!(
        signal_id = stored.id.unwrap_or(0),
        symbol = %stored.symbol,
        "Manual signal created"
    );
    Ok((StatusCode::CREATED, Json(stored.into())))
}

async fn get_signal(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<SignalResponse>, ApiError> {
    let Path(id) = path?;
    let signal = state
        .publisher
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("signal {} not found", id)))?;
    Ok(Json(signal.into()))
}

/// Record that a consumer acted on a signal
async fn take_signal(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<TakeSignalRequest>, JsonRejection>,
) -> Result<Json<SignalResponse>, ApiError> {
    let Path(id) = path?;
    let Json(request) = body?;
    let result: TradeResult = request
        .result
        .parse()
        .map_err(|_| ApiError::bad_request("result must be 'win', 'loss' or 'breakeven'"))?;
    if !request.pnl.is_finite() {
        return Err(ApiError::bad_request("pnl must be a finite number"));
    }

    let signal = state.publisher.take(id, result, request.pnl).await?;
    Ok(Json(signal.into()))
}

/// Indicator values computed from the retained history of a symbol
async fn get_indicators(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<IndicatorSnapshot>, ApiError> {
    let symbol = symbol.to_uppercase();
    let points = state.history.snapshot(&symbol).await;
    let snapshot = compute_snapshot(&points)
        .ok_or_else(|| ApiError::not_found(format!("no price history for {}", symbol)))?;
    Ok(Json(snapshot))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/signals", get(list_signals).post(create_signal))
        .route("/signals/{id}", get(get_signal))
        .route("/signals/{id}/take", post(take_signal))
        .route("/indicators/{symbol}", get(get_indicators))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Resolves on ctrl-c. If the handler cannot be installed it never resolves,
/// so the server keeps running instead of stopping at once.
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

pub async fn start_server(
    port: u16,
    state: AppState,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}
