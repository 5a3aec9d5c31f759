//! Indicator results that record whether enough history was available

pub const RSI_PERIOD: usize = 14;
/// RSI needs `RSI_PERIOD` deltas, so one more point than the period
pub const RSI_MIN_POINTS: usize = RSI_PERIOD + 1;
pub const NEUTRAL_RSI: f64 = 50.0;

pub const SMA_SHORT_PERIOD: usize = 20;
pub const SMA_LONG_PERIOD: usize = 50;

pub const EMA_FAST_PERIOD: usize = 12;
pub const EMA_SLOW_PERIOD: usize = 26;

pub const MACD_SIGNAL_PERIOD: usize = 9;
pub const MACD_SIGNAL_MIN_POINTS: usize = EMA_SLOW_PERIOD + MACD_SIGNAL_PERIOD;

pub const BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_STD_DEV: f64 = 2.0;

/// Outcome of an indicator calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading<T> {
    Computed { value: T },
    /// Fewer than `required` points were available; `fallback` stands in
    InsufficientHistory {
        required: usize,
        available: usize,
        fallback: T,
    },
}

impl<T: Copy> Reading<T> {
    pub fn computed(value: T) -> Self {
        Reading::Computed { value }
    }

    /// Tag `value` as computed when `available >= required`, otherwise as a fallback
    pub fn gated(required: usize, available: usize, value: T) -> Self {
        if available >= required {
            Reading::Computed { value }
        } else {
            Reading::InsufficientHistory {
                required,
                available,
                fallback: value,
            }
        }
    }

    pub fn value(&self) -> T {
        match *self {
            Reading::Computed { value } => value,
            Reading::InsufficientHistory { fallback, .. } => fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Reading::InsufficientHistory { .. })
    }
}
