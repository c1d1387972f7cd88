//! Relative Strength Index from rolling mean gains/losses.
//!
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss) over a rolling window of
//! price changes (plain rolling mean, not Wilder smoothing).
//! Edge cases: avg_loss == 0 with gains → 100; a completely flat window has
//! no defined relative strength → NaN (consumers skip the signal).

use super::rolling::{diff, rolling_mean};

pub fn rsi(closes: &[f64], window: usize) -> Vec<f64> {
    let n = closes.len();
    let deltas = diff(closes);

    let gains: Vec<f64> = deltas
        .iter()
        .map(|&d| if d.is_nan() { f64::NAN } else { d.max(0.0) })
        .collect();
    let losses: Vec<f64> = deltas
        .iter()
        .map(|&d| if d.is_nan() { f64::NAN } else { (-d).max(0.0) })
        .collect();

    let avg_gain = rolling_mean(&gains, window);
    let avg_loss = rolling_mean(&losses, window);

    let mut out = vec![f64::NAN; n];
    for i in 0..n {
        let g = avg_gain[i];
        let l = avg_loss[i];
        if g.is_nan() || l.is_nan() {
            continue;
        }
        out[i] = if l == 0.0 && g == 0.0 {
            f64::NAN // flat window, no movement to measure
        } else if l == 0.0 {
            100.0
        } else {
            100.0 - 100.0 / (1.0 + g / l)
        };
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn rsi_all_gains_is_100() {
        let closes = [100.0, 101.0, 102.0, 103.0, 104.0];
        let out = rsi(&closes, 3);
        assert_approx(out[3], 100.0, DEFAULT_EPSILON);
        assert_approx(out[4], 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rsi_all_losses_is_0() {
        let closes = [104.0, 103.0, 102.0, 101.0, 100.0];
        let out = rsi(&closes, 3);
        assert_approx(out[3], 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rsi_mixed_in_bounds() {
        let closes = [44.0, 44.34, 44.09, 43.61, 44.33, 44.83];
        let out = rsi(&closes, 3);
        assert!(out[0].is_nan());
        assert!(out[2].is_nan()); // needs 3 changes, first valid at index 3
        for &v in &out[3..] {
            assert!((0.0..=100.0).contains(&v), "RSI out of bounds: {v}");
        }
    }

    #[test]
    fn rsi_flat_window_is_unavailable() {
        let closes = [50.0; 8];
        let out = rsi(&closes, 3);
        assert!(out.iter().all(|v| v.is_nan()));
    }
}
