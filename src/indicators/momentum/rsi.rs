//! RSI (Relative Strength Index) indicator

use crate::indicators::reading::{Reading, NEUTRAL_RSI};

/// Calculate RSI from the last `period` price deltas
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
///
/// No losses in the window yields 100. Fewer than `period + 1` prices yields
/// the neutral 50.
pub fn calculate_rsi(prices: &[f64], period: usize) -> Reading<f64> {
    let required = period + 1;
    if period == 0 || prices.len() < required {
        return Reading::gated(required, prices.len(), NEUTRAL_RSI);
    }

    let window = &prices[prices.len() - required..];
    let (gains, losses) = window
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .fold((0.0, 0.0), |(gains, losses), change| {
            if change > 0.0 {
                (gains + change, losses)
            } else {
                (gains, losses - change)
            }
        });

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;

    if avg_loss == 0.0 {
        return Reading::computed(100.0);
    }

    let rs = avg_gain / avg_loss;
    Reading::computed(100.0 - (100.0 / (1.0 + rs)))
}
