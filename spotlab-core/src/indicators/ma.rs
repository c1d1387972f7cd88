//! Moving averages.
//!
//! EMA is span-based recursive: alpha = 2/(span+1), seeded with the first
//! value. This matches the exponential weighting the rest of the engine was
//! tuned against (no SMA seed, no warm-up NaN prefix).
//! SMA is a plain rolling mean with NaN warm-up.

use super::rolling::rolling_mean;

/// Exponential moving average of a series. Empty input gives empty output.
/// A NaN poisons every value from that point on.
pub fn ema(values: &[f64], span: usize) -> Vec<f64> {
    let n = values.len();
    let mut out = vec![f64::NAN; n];
    if n == 0 || span == 0 {
        return out;
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut prev = values[0];
    out[0] = prev;
    for i in 1..n {
        if values[i].is_nan() || prev.is_nan() {
            // poisoned from here on
            return out;
        }
        let v = alpha * values[i] + (1.0 - alpha) * prev;
        out[i] = v;
        prev = v;
    }
    out
}

/// Simple moving average of a series.
pub fn sma(values: &[f64], window: usize) -> Vec<f64> {
    rolling_mean(values, window)
}
