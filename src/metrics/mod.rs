//! Prometheus metrics for the HTTP layer and the analysis loop

use prometheus::{Encoder, Gauge, Histogram, HistogramOpts, IntCounter, IntGauge, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_requests_in_flight: IntGauge,
    pub http_request_duration_seconds: Histogram,
    pub analysis_cycles_total: IntCounter,
    pub signals_emitted_total: IntCounter,
    pub feed_errors_total: IntCounter,
    pub storage_errors_total: IntCounter,
    pub database_connected: Gauge,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total HTTP requests served")?;
        let http_requests_in_flight =
            IntGauge::new("http_requests_in_flight", "HTTP requests currently in flight")?;
        let http_request_duration_seconds = Histogram::with_opts(
            HistogramOpts::new("http_request_duration_seconds", "HTTP request latency")
                .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
        )?;
        let analysis_cycles_total =
            IntCounter::new("analysis_cycles_total", "Completed analysis cycles")?;
        let signals_emitted_total =
            IntCounter::new("signals_emitted_total", "Signals that passed the emission gate")?;
        let feed_errors_total =
            IntCounter::new("feed_errors_total", "Failed market data fetches")?;
        let storage_errors_total =
            IntCounter::new("storage_errors_total", "Failed price or signal writes")?;
        let database_connected =
            Gauge::new("database_connected", "1 when a database backend is connected")?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(analysis_cycles_total.clone()))?;
        registry.register(Box::new(signals_emitted_total.clone()))?;
        registry.register(Box::new(feed_errors_total.clone()))?;
        registry.register(Box::new(storage_errors_total.clone()))?;
        registry.register(Box::new(database_connected.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_requests_in_flight,
            http_request_duration_seconds,
            analysis_cycles_total,
            signals_emitted_total,
            feed_errors_total,
            storage_errors_total,
            database_connected,
        })
    }

    /// Render all registered metrics in the Prometheus text format
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
