//! Rule-based scorer turning an indicator snapshot into a directional call

use crate::config::ScoringConfig;
use crate::models::indicators::IndicatorSnapshot;
use crate::models::signal::{RiskTier, Signal, SignalDirection, SignalEvaluation};

pub const BASE_CONFIDENCE: f64 = 0.5;
pub const RSI_WEIGHT: f64 = 0.2;
pub const TREND_WEIGHT: f64 = 0.15;
pub const MACD_WEIGHT: f64 = 0.1;
pub const BOLLINGER_WEIGHT: f64 = 0.1;
pub const MOMENTUM_WEIGHT: f64 = 0.05;

pub struct SignalScorer {
    config: ScoringConfig,
}

impl SignalScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Apply the scoring rules without the emission gate.
    ///
    /// Only the RSI rule picks a direction. Later rules add confidence when
    /// they agree with it and never change it.
    pub fn evaluate(&self, snapshot: &IndicatorSnapshot) -> SignalEvaluation {
        let price = snapshot.current_price;
        let mut direction = SignalDirection::Hold;
        let mut confidence = BASE_CONFIDENCE;
        let mut rationale = Vec::new();

        if snapshot.rsi_14 < self.config.rsi_oversold {
            direction = SignalDirection::Buy;
            confidence += RSI_WEIGHT;
            rationale.push(format!("RSI oversold ({:.2})", snapshot.rsi_14));
        } else if snapshot.rsi_14 > self.config.rsi_overbought {
            direction = SignalDirection::Sell;
            confidence += RSI_WEIGHT;
            rationale.push(format!("RSI overbought ({:.2})", snapshot.rsi_14));
        }

        match direction {
            SignalDirection::Buy => {
                if price > snapshot.sma_20 && snapshot.sma_20 > snapshot.sma_50 {
                    confidence += TREND_WEIGHT;
                    rationale.push("Price above moving averages".to_string());
                }
                if snapshot.macd_line > snapshot.macd_signal {
                    confidence += MACD_WEIGHT;
                    rationale.push("MACD bullish crossover".to_string());
                }
                if price <= snapshot.bollinger_lower {
                    confidence += BOLLINGER_WEIGHT;
                    rationale.push("Price at lower Bollinger Band".to_string());
                }
            }
            SignalDirection::Sell => {
                if price < snapshot.sma_20 && snapshot.sma_20 < snapshot.sma_50 {
                    confidence += TREND_WEIGHT;
                    rationale.push("Price below moving averages".to_string());
                }
                if snapshot.macd_line < snapshot.macd_signal {
                    confidence += MACD_WEIGHT;
                    rationale.push("MACD bearish crossover".to_string());
                }
                if price >= snapshot.bollinger_upper {
                    confidence += BOLLINGER_WEIGHT;
                    rationale.push("Price at upper Bollinger Band".to_string());
                }
            }
            SignalDirection::Hold => {}
        }

        if snapshot.change_24h_pct.abs() > self.config.strong_move_pct {
            confidence += MOMENTUM_WEIGHT;
            rationale.push(format!(
                "Strong price movement ({:+.2}%)",
                snapshot.change_24h_pct
            ));
        }

        SignalEvaluation {
            direction,
            confidence: round_confidence(confidence),
            rationale,
        }
    }

    /// Whether an evaluation clears the emission gate
    pub fn passes_gate(&self, evaluation: &SignalEvaluation) -> bool {
        evaluation.direction != SignalDirection::Hold
            && evaluation.confidence >= self.config.min_confidence
    }

    /// Score a snapshot and build a signal if it clears the gate
    pub fn score(&self, symbol: &str, snapshot: &IndicatorSnapshot) -> Option<Signal> {
        let evaluation = self.evaluate(snapshot);
        if !self.passes_gate(&evaluation) {
            return None;
        }

        let tier = RiskTier::from_confidence(evaluation.confidence);
        Some(
            Signal::new(
                symbol,
                evaluation.direction,
                evaluation.confidence,
                snapshot.current_price,
                tier,
            )
            .with_rationale(evaluation.rationale)
            .with_snapshot(snapshot.clone()),
        )
    }
}

/// Clamp to [0, 1] and round to the hundredths the weights are expressed in
fn round_confidence(confidence: f64) -> f64 {
    (confidence.clamp(0.0, 1.0) * 100.0).round() / 100.0
}

impl Default for SignalScorer {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}
