//! Environment-driven configuration

use std::env;

/// Thresholds used by the signal scorer
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub min_confidence: f64,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    /// Absolute 24h percent change above which a move counts as strong
    pub strong_move_pct: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.7,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            strong_move_pct: 1.0,
        }
    }
}

/// Process-level settings shared by the binaries
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub port: u16,
    pub eval_interval_seconds: u64,
    pub symbols: Vec<String>,
    pub history_capacity: usize,
    pub price_feed_url: Option<String>,
    pub database_url: Option<String>,
    pub scoring: ScoringConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            eval_interval_seconds: 15,
            symbols: vec![
                "EURUSD".to_string(),
                "GBPUSD".to_string(),
                "USDJPY".to_string(),
            ],
            history_capacity: 100,
            price_feed_url: None,
            database_url: None,
            scoring: ScoringConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Build from environment variables, falling back to defaults for
    /// anything missing or unparsable
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let symbols = env::var("SYMBOLS")
            .ok()
            .map(|s| parse_symbols(&s))
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.symbols);

        let mut scoring = defaults.scoring;
        if let Some(min) = parse_var::<f64>("MIN_CONFIDENCE") {
            scoring.min_confidence = min.clamp(0.0, 1.0);
        }

        Self {
            port: parse_var("PORT").unwrap_or(defaults.port),
            eval_interval_seconds: parse_var("EVAL_INTERVAL_SECONDS")
                .unwrap_or(defaults.eval_interval_seconds),
            symbols,
            history_capacity: parse_var::<usize>("HISTORY_CAPACITY")
                .filter(|c| *c > 0)
                .unwrap_or(defaults.history_capacity),
            price_feed_url: non_empty_var("PRICE_FEED_URL"),
            database_url: get_database_url(),
            scoring,
        }
    }
}

/// Split a comma separated symbol list, uppercasing and dropping blanks
pub fn parse_symbols(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

pub fn get_database_url() -> Option<String> {
    non_empty_var("DATABASE_URL")
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
