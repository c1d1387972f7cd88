//! Average True Range from a rolling mean of the true range.
//!
//! TR[0] = high[0] - low[0] (no previous close).
//! TR[t] = max(high-low, |high - prev_close|, |low - prev_close|).
//! ATR = rolling mean of TR. A flat market legitimately gives ATR = 0;
//! consumers of ATR-scaled targets must survive that.

use crate::domain::Candle;

use super::rolling::rolling_mean;

/// True Range series.
pub fn true_range(candles: &[Candle]) -> Vec<f64> {
    let n = candles.len();
    let mut tr = vec![f64::NAN; n];
    if n == 0 {
        return tr;
    }
    tr[0] = candles[0].high - candles[0].low;
    for i in 1..n {
        let h = candles[i].high;
        let l = candles[i].low;
        let pc = candles[i - 1].close;
        tr[i] = (h - l).max((h - pc).abs()).max((l - pc).abs());
    }
    tr
}

pub fn atr(candles: &[Candle], window: usize) -> Vec<f64> {
    rolling_mean(&true_range(candles), window)
}
