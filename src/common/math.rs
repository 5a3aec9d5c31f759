//! Numeric helpers shared by the indicator calculators

/// Arithmetic mean; 0.0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// The trailing `window` values, or all of them when fewer exist
pub fn tail(values: &[f64], window: usize) -> &[f64] {
    &values[values.len().saturating_sub(window)..]
}

/// Mean of the trailing `window` values
pub fn sma(values: &[f64], window: usize) -> f64 {
    mean(tail(values, window))
}

pub fn ema_alpha(window: usize) -> f64 {
    2.0 / (window as f64 + 1.0)
}

/// Running EMA at every index, seeded with the first value
pub fn ema_series(values: &[f64], window: usize) -> Vec<f64> {
    let alpha = ema_alpha(window);
    let mut series = Vec::with_capacity(values.len());
    let mut iter = values.iter();
    let Some(&first) = iter.next() else {
        return series;
    };
    let mut current = first;
    series.push(current);
    for &value in iter {
        current = alpha * value + (1.0 - alpha) * current;
        series.push(current);
    }
    series
}

/// Final EMA value, seeded with the first value; 0.0 for an empty slice
pub fn ema(values: &[f64], window: usize) -> f64 {
    ema_series(values, window).last().copied().unwrap_or(0.0)
}

/// Population standard deviation of the trailing `window` values
pub fn standard_deviation(values: &[f64], window: usize) -> f64 {
    let window = tail(values, window);
    if window.is_empty() {
        return 0.0;
    }
    let avg = mean(window);
    let variance = window.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / window.len() as f64;
    variance.sqrt()
}

/// Percent change from `reference` to `current`; 0.0 when the reference is zero
pub fn percent_change(reference: f64, current: f64) -> f64 {
    if reference == 0.0 {
        return 0.0;
    }
    (current - reference) / reference * 100.0
}
