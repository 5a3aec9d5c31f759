//! Signal records and their lifecycle

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::models::indicators::IndicatorSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalDirection {
    Buy,
    Sell,
    Hold,
}

impl SignalDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalDirection::Buy => "buy",
            SignalDirection::Sell => "sell",
            SignalDirection::Hold => "hold",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Tier assigned to a generated signal: the higher the confidence, the
    /// lower the risk
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 0.9 {
            RiskTier::Low
        } else if confidence >= 0.8 {
            RiskTier::Medium
        } else {
            RiskTier::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalStatus {
    Active,
    Taken,
}

impl SignalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalStatus::Active => "active",
            SignalStatus::Taken => "taken",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeResult {
    Win,
    Loss,
    Breakeven,
}

impl TradeResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeResult::Win => "win",
            TradeResult::Loss => "loss",
            TradeResult::Breakeven => "breakeven",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized value '{0}'")]
pub struct ParseEnumError(pub String);

impl FromStr for SignalDirection {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" => Ok(SignalDirection::Buy),
            "sell" => Ok(SignalDirection::Sell),
            "hold" => Ok(SignalDirection::Hold),
            other => Err(ParseEnumError(other.to_string())),
        }
    }
}

impl FromStr for RiskTier {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(RiskTier::Low),
            "medium" => Ok(RiskTier::Medium),
            "high" => Ok(RiskTier::High),
            other => Err(ParseEnumError(other.to_string())),
        }
    }
}

impl FromStr for SignalStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(SignalStatus::Active),
            "taken" => Ok(SignalStatus::Taken),
            other => Err(ParseEnumError(other.to_string())),
        }
    }
}

impl FromStr for TradeResult {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "win" => Ok(TradeResult::Win),
            "loss" => Ok(TradeResult::Loss),
            "breakeven" => Ok(TradeResult::Breakeven),
            other => Err(ParseEnumError(other.to_string())),
        }
    }
}

/// Recorded when a consumer acts on a signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalOutcome {
    pub result: TradeResult,
    pub pnl: f64,
    pub closed_at: DateTime<Utc>,
}

/// Scorer output before the emission gate is applied
#[derive(Debug, Clone, PartialEq)]
pub struct SignalEvaluation {
    pub direction: SignalDirection,
    pub confidence: f64,
    pub rationale: Vec<String>,
}

/// A published trading signal.
///
/// Content fields are fixed at creation; only `status` and `outcome` change,
/// once, when the signal is taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub id: Option<i64>,
    pub symbol: String,
    pub direction: SignalDirection,
    pub confidence: f64,
    pub price: f64,
    pub generated_at: DateTime<Utc>,
    pub snapshot: Option<IndicatorSnapshot>,
    pub rationale: Vec<String>,
    pub risk_tier: RiskTier,
    pub status: SignalStatus,
    pub outcome: Option<SignalOutcome>,
}

impl Signal {
    pub fn new(
        symbol: impl Into<String>,
        direction: SignalDirection,
        confidence: f64,
        price: f64,
        risk_tier: RiskTier,
    ) -> Self {
        Self {
            id: None,
            symbol: symbol.into(),
            direction,
            confidence: confidence.clamp(0.0, 1.0),
            price,
            generated_at: Utc::now(),
            snapshot: None,
            rationale: Vec::new(),
            risk_tier,
            status: SignalStatus::Active,
            outcome: None,
        }
    }

    pub fn with_snapshot(mut self, snapshot: IndicatorSnapshot) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    pub fn with_rationale(mut self, rationale: Vec<String>) -> Self {
        self.rationale = rationale;
        self
    }

    pub fn with_generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = generated_at;
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == SignalStatus::Active
    }
}

/// Query parameters for listing signals
#[derive(Debug, Clone, Default)]
pub struct SignalFilter {
    pub limit: Option<usize>,
    /// Exact tier match; no fallback to neighbouring tiers
    pub risk_tier: Option<RiskTier>,
    pub symbol: Option<String>,
}

impl SignalFilter {
    pub fn matches(&self, signal: &Signal) -> bool {
        self.risk_tier.map_or(true, |tier| signal.risk_tier == tier)
            && self
                .symbol
                .as_deref()
                .map_or(true, |symbol| signal.symbol.eq_ignore_ascii_case(symbol))
    }
}
