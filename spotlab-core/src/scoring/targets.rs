//! Take-profit and stop-loss computation.
//!
//! ATR multipliers are keyed by investment type and trend label, then the
//! BUY path blends in Fibonacci, support, and Bollinger levels before a
//! final validation pass enforces the floor ordering and the 1.5:1 reward
//! floor. A zero or unavailable ATR collapses the ATR terms and the floors
//! still produce a valid bracket.

use crate::domain::{InvestmentType, SignalType, TrendStrength};
use crate::indicators::{value_at, IndicatorFrame};
use serde::{Deserialize, Serialize};

/// Minimum reward-to-risk on TP1 for a BUY.
pub const MIN_RISK_REWARD: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceTargets {
    pub tp1: f64,
    pub tp2: f64,
    pub stop_loss: f64,
}

impl PriceTargets {
    /// Reward-to-risk on TP1; zero for WAIT brackets by convention.
    pub fn risk_reward(&self, entry_price: f64, signal_type: SignalType) -> f64 {
        match signal_type {
            SignalType::Buy => (self.tp1 - entry_price) / (entry_price - self.stop_loss),
            SignalType::Wait => 0.0,
        }
    }
}

/// (tp1, tp2, sl) ATR multipliers per investment type and trend label.
fn atr_multipliers(investment_type: InvestmentType, trend: TrendStrength) -> (f64, f64, f64) {
    use TrendStrength::*;
    match investment_type {
        InvestmentType::M60 => match trend {
            StrongUp => (2.8, 4.5, 1.5),
            StrongDown | WaitForUptrend => (1.2, 2.0, 1.0),
            Mixed => (1.8, 2.8, 1.2),
        },
        InvestmentType::H4 => match trend {
            StrongUp => (4.2, 6.5, 1.8),
            StrongDown | WaitForUptrend => (1.6, 2.6, 1.3),
            Mixed => (2.3, 3.6, 1.5),
        },
        InvestmentType::D1 => match trend {
            StrongUp => (5.5, 9.0, 2.2),
            StrongDown | WaitForUptrend => (2.2, 3.6, 1.8),
            Mixed => (3.0, 5.2, 2.0),
        },
    }
}

pub fn compute_targets(
    entry_price: f64,
    signal_type: SignalType,
    atr: f64,
    trend: TrendStrength,
    investment_type: InvestmentType,
    frame: &IndicatorFrame,
) -> PriceTargets {
    let atr = if atr.is_finite() { atr } else { 0.0 };

    let (mut tp1, mut tp2, mut sl) = match signal_type {
        SignalType::Buy => {
            let (m1, m2, ms) = atr_multipliers(investment_type, trend);
            (
                entry_price + atr * m1,
                entry_price + atr * m2,
                entry_price - atr * ms,
            )
        }
        // Informational bracket only, never traded.
        SignalType::Wait => (
            entry_price + atr,
            entry_price + atr * 2.0,
            entry_price - atr * 0.5,
        ),
    };

    if signal_type == SignalType::Buy {
        let i = frame.last_index();

        // Blend TP1 toward the next Fibonacci level above entry.
        let levels = frame.fib.ascending();
        if levels.iter().all(|l| l.is_finite()) {
            if let Some(next_level) = levels.iter().find(|&&l| l > entry_price * 1.005) {
                if (entry_price * 1.01..=entry_price * 1.15).contains(next_level) {
                    tp1 = (tp1 + next_level) / 2.0;
                }
            }

            // TP2 aims at the highest level meaningfully above entry.
            if let Some(higher) = levels.iter().rev().find(|&&l| l > entry_price * 1.02) {
                if *higher > tp1 && *higher <= entry_price * 1.25 {
                    tp2 = (tp2 + higher) / 2.0;
                }
            }
        }

        // Stop just below support, blended when it lands near the ATR stop.
        if let Some(support) = value_at(&frame.support, i) {
            if support < entry_price {
                let support_sl = support * 0.995;
                let atr_distance = entry_price - sl;
                let support_distance = entry_price - support_sl;
                if atr_distance > 0.0 {
                    let ratio = support_distance / atr_distance;
                    if (0.5..=2.0).contains(&ratio) {
                        sl = (sl + support_sl) / 2.0;
                    }
                }
            }
        }

        // Entries near the lower Bollinger band target the middle/upper band.
        if let (Some(lower), Some(upper), Some(middle)) = (
            value_at(&frame.bb_lower, i),
            value_at(&frame.bb_upper, i),
            value_at(&frame.bb_middle, i),
        ) {
            let band = upper - lower;
            if band > 0.0 && (entry_price - lower) / band < 0.3 {
                if middle > entry_price * 1.005 {
                    tp1 = tp1.min(middle);
                }
                if upper > tp1 {
                    tp2 = (tp2 + upper) / 2.0;
                }
            }
        }

        // Trend strength widens or tightens the bracket.
        if let Some(adx) = value_at(&frame.adx, i) {
            if adx > 40.0 {
                tp2 *= 1.1;
            } else if adx < 20.0 {
                tp1 *= 0.9;
                tp2 *= 0.9;
            }
        }

        if let Some(volume_ratio) = value_at(&frame.volume_ratio, i) {
            if volume_ratio > 2.0 {
                tp2 *= 1.05;
            } else if volume_ratio < 0.8 {
                tp1 *= 0.95;
                tp2 *= 0.95;
            }
        }
    }

    // Floors: minimum profit, TP2 above TP1, bounded loss.
    let mut tp1 = tp1.max(entry_price * 1.002);
    let mut tp2 = tp2.max(tp1 * 1.2);
    let stop_loss = sl.min(entry_price * 0.98);

    let risk = entry_price - stop_loss;
    if risk > 0.0 && (tp1 - entry_price) / risk < MIN_RISK_REWARD {
        tp1 = entry_price + risk * MIN_RISK_REWARD;
        tp2 = entry_price + risk * 2.5;
    }

    PriceTargets { tp1, tp2, stop_loss }
}
