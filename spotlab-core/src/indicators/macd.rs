//! MACD — Moving Average Convergence Divergence.
//!
//! macd = EMA(close, fast) - EMA(close, slow)
//! signal = EMA(macd, signal_span)
//! histogram = macd - signal

use super::ma::ema;

#[derive(Debug, Clone)]
pub struct MacdSeries {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

pub fn macd(closes: &[f64], fast: usize, slow: usize, signal_span: usize) -> MacdSeries {
    let ema_fast = ema(closes, fast);
    let ema_slow = ema(closes, slow);

    let line: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| f - s)
        .collect();
    let signal = ema(&line, signal_span);
    let histogram: Vec<f64> = line.iter().zip(&signal).map(|(m, s)| m - s).collect();

    MacdSeries {
        macd: line,
        signal,
        histogram,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn macd_constant_series_is_zero() {
        let out = macd(&[100.0; 40], 12, 26, 9);
        assert_approx(out.macd[39], 0.0, DEFAULT_EPSILON);
        assert_approx(out.signal[39], 0.0, DEFAULT_EPSILON);
        assert_approx(out.histogram[39], 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn macd_positive_in_sustained_uptrend() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let out = macd(&closes, 12, 26, 9);
        // Fast EMA tracks a rising series more closely than the slow EMA.
        assert!(out.macd[59] > 0.0);
        assert!(out.signal[59] > 0.0);
    }

    #[test]
    fn macd_lengths_match_input() {
        let closes = vec![100.0; 30];
        let out = macd(&closes, 12, 26, 9);
        assert_eq!(out.macd.len(), 30);
        assert_eq!(out.signal.len(), 30);
        assert_eq!(out.histogram.len(), 30);
    }
}
