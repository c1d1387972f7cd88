//! Fibonacci retracement levels from the most recent rolling swing.
//!
//! Levels are measured down from the 50-bar rolling high toward the rolling
//! low at the latest bar. When the swing cannot be established (short or
//! degenerate history) every level falls back to the latest close, which
//! makes level-proximity checks neutral rather than erroneous.

use crate::domain::Candle;

use super::rolling::{rolling_max, rolling_min};

pub const FIB_LOOKBACK: usize = 50;

/// Retracement ratios, shallow to deep.
const RATIOS: [f64; 4] = [0.236, 0.382, 0.5, 0.618];

#[derive(Debug, Clone, Copy)]
pub struct FibLevels {
    pub l236: f64,
    pub l382: f64,
    pub l500: f64,
    pub l618: f64,
}

impl FibLevels {
    /// Levels sorted ascending by price (61.8% retracement is the lowest).
    pub fn ascending(&self) -> [f64; 4] {
        [self.l618, self.l500, self.l382, self.l236]
    }

    fn neutral(close: f64) -> Self {
        Self {
            l236: close,
            l382: close,
            l500: close,
            l618: close,
        }
    }
}

/// Compute the retracement levels for the latest bar.
pub fn fibonacci_levels(candles: &[Candle]) -> FibLevels {
    let close = candles.last().map(|c| c.close).unwrap_or(f64::NAN);

    let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
    let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();
    let recent_high = rolling_max(&highs, FIB_LOOKBACK).last().copied().unwrap_or(f64::NAN);
    let recent_low = rolling_min(&lows, FIB_LOOKBACK).last().copied().unwrap_or(f64::NAN);

    if recent_high.is_nan() || recent_low.is_nan() {
        return FibLevels::neutral(close);
    }

    let diff = recent_high - recent_low;
    let level = |ratio: f64| recent_high - diff * ratio;
    FibLevels {
        l236: level(RATIOS[0]),
        l382: level(RATIOS[1]),
        l500: level(RATIOS[2]),
        l618: level(RATIOS[3]),
    }
}
