//! Stochastic oscillator.
//!
//! %K = 100 * (close - lowest_low) / (highest_high - lowest_low) over k_window
//! %D = SMA(%K, d_window)
//! A flat window (highest == lowest) has no defined position → NaN.

use crate::domain::Candle;

use super::rolling::{rolling_max, rolling_mean, rolling_min};

#[derive(Debug, Clone)]
pub struct StochasticSeries {
    pub k: Vec<f64>,
    pub d: Vec<f64>,
}

pub fn stochastic(candles: &[Candle], k_window: usize, d_window: usize) -> StochasticSeries {
    let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
    let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();

    let highest = rolling_max(&highs, k_window);
    let lowest = rolling_min(&lows, k_window);

    let n = candles.len();
    let mut k = vec![f64::NAN; n];
    for i in 0..n {
        let hh = highest[i];
        let ll = lowest[i];
        if hh.is_nan() || ll.is_nan() || hh == ll {
            continue;
        }
        k[i] = 100.0 * (candles[i].close - ll) / (hh - ll);
    }
    let d = rolling_mean(&k, d_window);

    StochasticSeries { k, d }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_ohlc_candles, DEFAULT_EPSILON};

    #[test]
    fn k_at_range_extremes() {
        let candles = make_ohlc_candles(&[
            (100.0, 110.0, 90.0, 95.0),
            (95.0, 108.0, 92.0, 100.0),
            (100.0, 110.0, 90.0, 110.0), // close at the 3-bar high
        ]);
        let out = stochastic(&candles, 3, 1);
        assert_approx(out.k[2], 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn flat_window_unavailable() {
        let candles = make_ohlc_candles(&[(100.0, 100.0, 100.0, 100.0); 5]);
        let out = stochastic(&candles, 3, 3);
        assert!(out.k.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn d_smooths_k() {
        let candles = make_ohlc_candles(&[
            (100.0, 110.0, 90.0, 95.0),
            (95.0, 108.0, 92.0, 100.0),
            (100.0, 110.0, 90.0, 110.0),
            (110.0, 112.0, 95.0, 96.0),
            (96.0, 105.0, 94.0, 104.0),
        ]);
        let out = stochastic(&candles, 3, 3);
        // %D first valid where three %K values exist.
        assert!(out.d[3].is_nan());
        assert!(!out.d[4].is_nan());
    }
}
