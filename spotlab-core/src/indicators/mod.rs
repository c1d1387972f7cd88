//! Technical indicator library.
//!
//! Every function takes a full series and returns a same-length series with
//! NaN during the warm-up period, mirroring how a column-oriented dataframe
//! would hold it. `frame::IndicatorFrame` bundles the whole set for one
//! candle sequence.

pub mod adx;
pub mod atr;
pub mod bollinger;
pub mod fibonacci;
pub mod frame;
pub mod ichimoku;
pub mod ma;
pub mod macd;
pub mod obv;
pub mod patterns;
pub mod rolling;
pub mod rsi;
pub mod stochastic;

pub use adx::{adx, AdxSeries};
pub use atr::{atr, true_range};
pub use bollinger::{bollinger, BollingerSeries};
pub use fibonacci::{fibonacci_levels, FibLevels, FIB_LOOKBACK};
pub use frame::{value_at, IndicatorFrame};
pub use ichimoku::{ichimoku, IchimokuSeries};
pub use ma::{ema, sma};
pub use macd::{macd, MacdSeries};
pub use obv::obv;
pub use patterns::{detect_patterns, PatternSeries};
pub use rsi::rsi;
pub use stochastic::{stochastic, StochasticSeries};

#[cfg(test)]
pub(crate) const DEFAULT_EPSILON: f64 = 1e-10;

#[cfg(test)]
pub(crate) fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "expected {expected}, got {actual}"
    );
}

/// Build hourly candles from a close series. Each candle opens at the prior
/// close, with high/low padded one unit beyond the open/close extremes.
#[cfg(test)]
pub(crate) fn make_candles(closes: &[f64]) -> Vec<crate::domain::Candle> {
    use chrono::{TimeZone, Utc};

    let mut out = Vec::with_capacity(closes.len());
    let mut prev = closes.first().copied().unwrap_or(0.0);
    for (i, &close) in closes.iter().enumerate() {
        let open = prev;
        out.push(crate::domain::Candle {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                + chrono::Duration::hours(i as i64),
            open,
            high: open.max(close) + 1.0,
            low: open.min(close) - 1.0,
            close,
            volume: 1000.0,
        });
        prev = close;
    }
    out
}

/// Build hourly candles from explicit (open, high, low, close) tuples.
#[cfg(test)]
pub(crate) fn make_ohlc_candles(spec: &[(f64, f64, f64, f64)]) -> Vec<crate::domain::Candle> {
    use chrono::{TimeZone, Utc};

    spec.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| crate::domain::Candle {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                + chrono::Duration::hours(i as i64),
            open,
            high,
            low,
            close,
            volume: 1000.0,
        })
        .collect()
}
