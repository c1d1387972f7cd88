//! ADX — Average Directional Index with DI+ and DI-.
//!
//! Directional movement from consecutive highs/lows, rolling-mean smoothed
//! (same plain rolling means as the rest of this library):
//! +DI = 100 * mean(+DM) / mean(TR), -DI likewise,
//! DX = 100 * |+DI - -DI| / (+DI + -DI), ADX = rolling mean of DX.
//! A flat market makes mean(TR) = 0 → DI and ADX unavailable (NaN).

use crate::domain::Candle;

use super::atr::true_range;
use super::rolling::rolling_mean;

#[derive(Debug, Clone)]
pub struct AdxSeries {
    pub adx: Vec<f64>,
    pub di_plus: Vec<f64>,
    pub di_minus: Vec<f64>,
}

pub fn adx(candles: &[Candle], window: usize) -> AdxSeries {
    let n = candles.len();
    let mut plus_dm = vec![0.0; n];
    let mut minus_dm = vec![0.0; n];

    for i in 1..n {
        let high_diff = candles[i].high - candles[i - 1].high;
        let low_diff = candles[i - 1].low - candles[i].low;
        if high_diff > low_diff && high_diff > 0.0 {
            plus_dm[i] = high_diff;
        }
        if low_diff > high_diff && low_diff > 0.0 {
            minus_dm[i] = low_diff;
        }
    }

    let tr_avg = rolling_mean(&true_range(candles), window);
    let plus_avg = rolling_mean(&plus_dm, window);
    let minus_avg = rolling_mean(&minus_dm, window);

    let mut di_plus = vec![f64::NAN; n];
    let mut di_minus = vec![f64::NAN; n];
    let mut dx = vec![f64::NAN; n];

    for i in 0..n {
        if tr_avg[i].is_nan() || plus_avg[i].is_nan() || minus_avg[i].is_nan() {
            continue;
        }
        if tr_avg[i] == 0.0 {
            continue; // flat market, direction undefined
        }
        di_plus[i] = 100.0 * plus_avg[i] / tr_avg[i];
        di_minus[i] = 100.0 * minus_avg[i] / tr_avg[i];
        let sum = di_plus[i] + di_minus[i];
        if sum != 0.0 {
            dx[i] = 100.0 * (di_plus[i] - di_minus[i]).abs() / sum;
        }
    }

    let adx = rolling_mean(&dx, window);

    AdxSeries {
        adx,
        di_plus,
        di_minus,
    }
}
