//! Candlestick pattern recognition via pure body/shadow geometry.
//!
//! Single-candle shapes (hammer, hanging man, doji) look at the body and
//! shadows of one candle; two/three-candle shapes (bullish engulfing,
//! morning/evening star) compare against the preceding closes. The star
//! patterns are the simplified three-close variants.

use crate::domain::Candle;

#[derive(Debug, Clone)]
pub struct PatternSeries {
    pub hammer: Vec<bool>,
    pub bullish_engulfing: Vec<bool>,
    pub morning_star: Vec<bool>,
    pub hanging_man: Vec<bool>,
    pub evening_star: Vec<bool>,
    pub doji: Vec<bool>,
}

pub fn detect_patterns(candles: &[Candle]) -> PatternSeries {
    let n = candles.len();
    let mut out = PatternSeries {
        hammer: vec![false; n],
        bullish_engulfing: vec![false; n],
        morning_star: vec![false; n],
        hanging_man: vec![false; n],
        evening_star: vec![false; n],
        doji: vec![false; n],
    };

    for i in 0..n {
        let c = &candles[i];
        let body = c.body();
        let upper = c.upper_shadow();
        let lower = c.lower_shadow();
        let range = c.high - c.low;

        let hammer_shape = lower > 2.0 * body && upper < body;
        out.hammer[i] = hammer_shape;
        out.hanging_man[i] = hammer_shape && c.close < c.open;
        out.doji[i] = range > 0.0 && body < range * 0.1;

        if i >= 1 {
            let p = &candles[i - 1];
            out.bullish_engulfing[i] =
                p.close < p.open && c.close > c.open && c.open < p.close && c.close > p.open;
        }

        if i >= 2 {
            let prev_close = candles[i - 1].close;
            let prev2_close = candles[i - 2].close;
            out.morning_star[i] =
                prev2_close > prev_close && c.close > prev_close && c.close > c.open;
            out.evening_star[i] =
                prev2_close < prev_close && c.close < prev_close && c.close < c.open;
        }
    }

    out
}
