//! On-Balance Volume: cumulative signed volume keyed to close direction.

use crate::domain::Candle;

pub fn obv(candles: &[Candle]) -> Vec<f64> {
    let n = candles.len();
    let mut out = vec![0.0; n];
    let mut acc = 0.0;
    for i in 0..n {
        if i > 0 {
            let change = candles[i].close - candles[i - 1].close;
            if change > 0.0 {
                acc += candles[i].volume;
            } else if change < 0.0 {
                acc -= candles[i].volume;
            }
        }
        out[i] = acc;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_candles, DEFAULT_EPSILON};

    #[test]
    fn obv_accumulates_signed_volume() {
        // closes 100 → 101 (up) → 100 (down) → 100 (flat), volume 1000 each
        let candles = make_candles(&[100.0, 101.0, 100.0, 100.0]);
        let out = obv(&candles);
        assert_approx(out[0], 0.0, DEFAULT_EPSILON);
        assert_approx(out[1], 1000.0, DEFAULT_EPSILON);
        assert_approx(out[2], 0.0, DEFAULT_EPSILON);
        assert_approx(out[3], 0.0, DEFAULT_EPSILON);
    }
}
