//! Rolling-window primitives shared by the indicator library.
//!
//! All functions return a series of the input length with `f64::NAN` during
//! warm-up. A window containing any NaN yields NaN for that position, so
//! warm-up gaps propagate instead of silently shrinking the sample.

/// Rolling arithmetic mean over `window` values.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(values, window, |w| w.iter().sum::<f64>() / w.len() as f64)
}

/// Rolling maximum over `window` values.
pub fn rolling_max(values: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(values, window, |w| {
        w.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    })
}

/// Rolling minimum over `window` values.
pub fn rolling_min(values: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(values, window, |w| {
        w.iter().copied().fold(f64::INFINITY, f64::min)
    })
}

/// Rolling sample standard deviation (N-1 denominator) over `window` values.
pub fn rolling_std(values: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(values, window, |w| {
        if w.len() < 2 {
            return f64::NAN;
        }
        let mean = w.iter().sum::<f64>() / w.len() as f64;
        let var = w.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (w.len() - 1) as f64;
        var.sqrt()
    })
}

/// Bar-over-bar difference; index 0 is NaN.
pub fn diff(values: &[f64]) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    for i in 1..values.len() {
        out[i] = values[i] - values[i - 1];
    }
    out
}

fn rolling_apply(values: &[f64], window: usize, f: impl Fn(&[f64]) -> f64) -> Vec<f64> {
    let n = values.len();
    let mut out = vec![f64::NAN; n];
    if window == 0 || n < window {
        return out;
    }
    for i in (window - 1)..n {
        let slice = &values[i + 1 - window..=i];
        if slice.iter().any(|v| v.is_nan()) {
            continue;
        }
        out[i] = f(slice);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn rolling_mean_basic() {
        let out = rolling_mean(&[1.0, 2.0, 3.0, 4.0], 2);
        assert!(out[0].is_nan());
        assert_approx(out[1], 1.5, DEFAULT_EPSILON);
        assert_approx(out[3], 3.5, DEFAULT_EPSILON);
    }

    #[test]
    fn rolling_mean_nan_window_is_nan() {
        let out = rolling_mean(&[1.0, f64::NAN, 3.0, 4.0], 2);
        assert!(out[1].is_nan());
        assert!(out[2].is_nan());
        assert_approx(out[3], 3.5, DEFAULT_EPSILON);
    }

    #[test]
    fn rolling_extrema() {
        let values = [3.0, 1.0, 4.0, 1.5];
        assert_approx(rolling_max(&values, 3)[2], 4.0, DEFAULT_EPSILON);
        assert_approx(rolling_min(&values, 3)[3], 1.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rolling_std_sample() {
        // std([1,2,3], ddof=1) = 1.0
        let out = rolling_std(&[1.0, 2.0, 3.0], 3);
        assert_approx(out[2], 1.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rolling_std_flat_is_zero() {
        let out = rolling_std(&[5.0; 6], 3);
        assert_approx(out[5], 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn diff_first_is_nan() {
        let out = diff(&[10.0, 12.0, 11.0]);
        assert!(out[0].is_nan());
        assert_approx(out[1], 2.0, DEFAULT_EPSILON);
        assert_approx(out[2], -1.0, DEFAULT_EPSILON);
    }

    #[test]
    fn window_larger_than_series() {
        let out = rolling_mean(&[1.0, 2.0], 5);
        assert!(out.iter().all(|v| v.is_nan()));
    }
}
