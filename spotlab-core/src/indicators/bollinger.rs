//! Bollinger Bands — SMA middle band ± a standard-deviation multiple.
//!
//! Uses sample standard deviation (N-1 denominator).
//! Also derives band width (upper - lower) / middle, used by the scorer to
//! detect narrow sideways ranges. A zero middle band makes the width
//! unavailable (NaN), never a division error.

use super::rolling::{rolling_mean, rolling_std};

#[derive(Debug, Clone)]
pub struct BollingerSeries {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
    pub width: Vec<f64>,
}

pub fn bollinger(closes: &[f64], window: usize, num_std: f64) -> BollingerSeries {
    let middle = rolling_mean(closes, window);
    let std = rolling_std(closes, window);

    let n = closes.len();
    let mut upper = vec![f64::NAN; n];
    let mut lower = vec![f64::NAN; n];
    let mut width = vec![f64::NAN; n];

    for i in 0..n {
        if middle[i].is_nan() || std[i].is_nan() {
            continue;
        }
        upper[i] = middle[i] + std[i] * num_std;
        lower[i] = middle[i] - std[i] * num_std;
        if middle[i] != 0.0 {
            width[i] = (upper[i] - lower[i]) / middle[i];
        }
    }

    BollingerSeries {
        upper,
        middle,
        lower,
        width,
    }
}
