//! Bollinger Bands indicator

use crate::common::math;
use crate::indicators::reading::Reading;
use crate::models::indicators::BollingerBands;

/// Calculate Bollinger Bands
///
/// Middle Band = SMA(period)
/// Upper Band = Middle + (std_dev * population standard deviation)
/// Lower Band = Middle - (std_dev * population standard deviation)
///
/// With fewer than `period` prices all three bands collapse to the last price.
pub fn calculate_bollinger_bands(
    prices: &[f64],
    period: usize,
    std_dev: f64,
) -> Reading<BollingerBands> {
    if prices.len() < period {
        let current = prices.last().copied().unwrap_or(0.0);
        return Reading::gated(
            period,
            prices.len(),
            BollingerBands {
                upper: current,
                middle: current,
                lower: current,
            },
        );
    }

    let middle = math::sma(prices, period);
    let spread = std_dev * math::standard_deviation(prices, period);

    Reading::computed(BollingerBands {
        upper: middle + spread,
        middle,
        lower: middle - spread,
    })
}
