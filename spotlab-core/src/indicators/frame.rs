//! IndicatorFrame — every derived series for one candle sequence, computed
//! once up front.
//!
//! Column-oriented: each indicator is a full-length series with NaN during
//! warm-up. Scoring reads the last one to three rows (divergence checks look
//! back ten). `value_at` converts the NaN convention into `Option`, which is
//! how consumers express "skip this signal".

use crate::domain::Candle;
use crate::error::AnalysisError;

use super::adx::adx;
use super::atr::atr;
use super::bollinger::bollinger;
use super::fibonacci::{fibonacci_levels, FibLevels};
use super::ichimoku::ichimoku;
use super::ma::{ema, sma};
use super::macd::macd;
use super::obv::obv;
use super::patterns::{detect_patterns, PatternSeries};
use super::rolling::{rolling_max, rolling_mean, rolling_min};
use super::rsi::rsi;
use super::stochastic::stochastic;

/// NaN-aware series access: `None` during warm-up or degenerate stretches.
pub fn value_at(series: &[f64], index: usize) -> Option<f64> {
    series.get(index).copied().filter(|v| v.is_finite())
}

#[derive(Debug, Clone)]
pub struct IndicatorFrame {
    len: usize,
    // Moving averages
    pub ema_10: Vec<f64>,
    pub ema_20: Vec<f64>,
    pub ema_50: Vec<f64>,
    // Momentum
    pub rsi: Vec<f64>,
    pub macd: Vec<f64>,
    pub macd_signal: Vec<f64>,
    pub macd_hist: Vec<f64>,
    // Volatility
    pub bb_upper: Vec<f64>,
    pub bb_middle: Vec<f64>,
    pub bb_lower: Vec<f64>,
    pub bb_width: Vec<f64>,
    pub bb_width_sma: Vec<f64>,
    pub atr: Vec<f64>,
    // Volume
    pub volume_sma: Vec<f64>,
    pub volume_ratio: Vec<f64>,
    pub obv: Vec<f64>,
    pub obv_sma: Vec<f64>,
    // Levels
    pub support: Vec<f64>,
    pub resistance: Vec<f64>,
    pub fib: FibLevels,
    // Oscillators
    pub stoch_k: Vec<f64>,
    pub stoch_d: Vec<f64>,
    // Trend strength
    pub adx: Vec<f64>,
    pub di_plus: Vec<f64>,
    pub di_minus: Vec<f64>,
    // Ichimoku
    pub tenkan: Vec<f64>,
    pub kijun: Vec<f64>,
    pub senkou_a: Vec<f64>,
    pub senkou_b: Vec<f64>,
    pub chikou: Vec<f64>,
    // Candlestick shapes
    pub patterns: PatternSeries,
}

impl IndicatorFrame {
    /// Minimum candles before any analysis is attempted.
    pub const MIN_CANDLES: usize = 50;

    pub fn compute(candles: &[Candle]) -> Result<Self, AnalysisError> {
        if candles.len() < Self::MIN_CANDLES {
            return Err(AnalysisError::insufficient(Self::MIN_CANDLES, candles.len()));
        }

        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
        let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();
        let volumes: Vec<f64> = candles.iter().map(|c| c.volume).collect();

        let macd_series = macd(&closes, 12, 26, 9);
        let bb = bollinger(&closes, 20, 2.0);
        let bb_width_sma = rolling_mean(&bb.width, 20);

        let volume_sma = sma(&volumes, 20);
        let volume_ratio: Vec<f64> = volumes
            .iter()
            .zip(&volume_sma)
            .map(|(v, s)| if *s > 0.0 { v / s } else { f64::NAN })
            .collect();

        let obv_series = obv(candles);
        let obv_sma = sma(&obv_series, 20);

        let stoch = stochastic(candles, 14, 3);
        let adx_series = adx(candles, 14);
        let ichimoku_series = ichimoku(candles);

        Ok(Self {
            len: candles.len(),
            ema_10: ema(&closes, 10),
            ema_20: ema(&closes, 20),
            ema_50: ema(&closes, 50),
            rsi: rsi(&closes, 14),
            macd: macd_series.macd,
            macd_signal: macd_series.signal,
            macd_hist: macd_series.histogram,
            bb_upper: bb.upper,
            bb_middle: bb.middle,
            bb_lower: bb.lower,
            bb_width: bb.width,
            bb_width_sma,
            atr: atr(candles, 14),
            volume_sma,
            volume_ratio,
            obv: obv_series,
            obv_sma,
            support: rolling_min(&lows, 20),
            resistance: rolling_max(&highs, 20),
            fib: fibonacci_levels(candles),
            stoch_k: stoch.k,
            stoch_d: stoch.d,
            adx: adx_series.adx,
            di_plus: adx_series.di_plus,
            di_minus: adx_series.di_minus,
            tenkan: ichimoku_series.tenkan,
            kijun: ichimoku_series.kijun,
            senkou_a: ichimoku_series.senkou_a,
            senkou_b: ichimoku_series.senkou_b,
            chikou: ichimoku_series.chikou,
            patterns: detect_patterns(candles),
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn last_index(&self) -> usize {
        self.len - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_candles;

    #[test]
    fn rejects_short_series() {
        let candles = make_candles(&vec![100.0; 49]);
        let err = IndicatorFrame::compute(&candles).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::InsufficientData { required: 50, got: 49 }
        ));
    }

    #[test]
    fn computes_all_series_at_full_length() {
        let closes: Vec<f64> = (0..80).map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0).collect();
        let candles = make_candles(&closes);
        let frame = IndicatorFrame::compute(&candles).unwrap();
        assert_eq!(frame.len(), 80);
        assert_eq!(frame.ema_10.len(), 80);
        assert_eq!(frame.adx.len(), 80);
        assert_eq!(frame.senkou_a.len(), 80);
        // The last row has the core values populated.
        let last = frame.last_index();
        assert!(value_at(&frame.ema_20, last).is_some());
        assert!(value_at(&frame.rsi, last).is_some());
        assert!(value_at(&frame.atr, last).is_some());
        assert!(value_at(&frame.bb_middle, last).is_some());
    }

    #[test]
    fn value_at_skips_warmup() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let candles = make_candles(&closes);
        let frame = IndicatorFrame::compute(&candles).unwrap();
        assert!(value_at(&frame.bb_middle, 0).is_none());
        assert!(value_at(&frame.bb_middle, 30).is_some());
        assert!(value_at(&frame.bb_middle, 999).is_none()); // out of range
    }
}
