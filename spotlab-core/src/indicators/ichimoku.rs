//! Ichimoku Cloud components.
//!
//! tenkan = 9-bar high/low midpoint, kijun = 26-bar midpoint,
//! senkou A = midpoint(tenkan, kijun) shifted forward 26,
//! senkou B = 52-bar midpoint shifted forward 26,
//! chikou = close shifted back 26 (last 26 positions NaN).
//! Forward shifts leave the first 26 positions NaN; consumers compare the
//! current close against the cloud values aligned at the current index.

use crate::domain::Candle;

use super::rolling::{rolling_max, rolling_min};

#[derive(Debug, Clone)]
pub struct IchimokuSeries {
    pub tenkan: Vec<f64>,
    pub kijun: Vec<f64>,
    pub senkou_a: Vec<f64>,
    pub senkou_b: Vec<f64>,
    pub chikou: Vec<f64>,
}

const TENKAN_WINDOW: usize = 9;
const KIJUN_WINDOW: usize = 26;
const SENKOU_B_WINDOW: usize = 52;
const CLOUD_SHIFT: usize = 26;

pub fn ichimoku(candles: &[Candle]) -> IchimokuSeries {
    let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
    let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();

    let tenkan = midpoint(&highs, &lows, TENKAN_WINDOW);
    let kijun = midpoint(&highs, &lows, KIJUN_WINDOW);

    let raw_a: Vec<f64> = tenkan.iter().zip(&kijun).map(|(t, k)| (t + k) / 2.0).collect();
    let raw_b = midpoint(&highs, &lows, SENKOU_B_WINDOW);

    let senkou_a = shift_forward(&raw_a, CLOUD_SHIFT);
    let senkou_b = shift_forward(&raw_b, CLOUD_SHIFT);

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let chikou = shift_back(&closes, CLOUD_SHIFT);

    IchimokuSeries {
        tenkan,
        kijun,
        senkou_a,
        senkou_b,
        chikou,
    }
}

fn midpoint(highs: &[f64], lows: &[f64], window: usize) -> Vec<f64> {
    let hh = rolling_max(highs, window);
    let ll = rolling_min(lows, window);
    hh.iter().zip(&ll).map(|(h, l)| (h + l) / 2.0).collect()
}

fn shift_forward(values: &[f64], shift: usize) -> Vec<f64> {
    let n = values.len();
    let mut out = vec![f64::NAN; n];
    for i in shift..n {
        out[i] = values[i - shift];
    }
    out
}

fn shift_back(values: &[f64], shift: usize) -> Vec<f64> {
    let n = values.len();
    let mut out = vec![f64::NAN; n];
    for i in 0..n.saturating_sub(shift) {
        out[i] = values[i + shift];
    }
    out
}
