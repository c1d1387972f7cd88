//! Success-probability estimation for a scored signal.
//!
//! Starts from the buy score, then stacks trend, RSI, volume, separation and
//! confirmation bonuses against risk penalties, clamped to [0, 0.95]. A
//! sell-dominant breakdown demotes the decision to WAIT with a zero base
//! before any bonus applies.

use crate::domain::{Candle, SignalType, Timeframe, TrendStrength};
use crate::indicators::{value_at, IndicatorFrame};

use super::trend::{timeframe_weight, TimeframeReading, TrendAssessment};

/// Hard ceiling on any probability estimate.
pub const MAX_PROBABILITY: f64 = 0.95;

/// UTC hours treated as thin-liquidity, inclusive.
const LOW_LIQUIDITY_HOURS: std::ops::RangeInclusive<u32> = 2..=6;

pub struct ProbabilityInputs<'a> {
    pub buy_score: f64,
    pub sell_score: f64,
    pub assessment: &'a TrendAssessment,
    pub readings: &'a [TimeframeReading],
    pub main_timeframe: Timeframe,
    pub frame: &'a IndicatorFrame,
    pub last_candle: &'a Candle,
}

/// Estimate the success probability and the BUY/WAIT decision.
pub fn estimate(inputs: &ProbabilityInputs<'_>) -> (f64, SignalType) {
    let signal_type = if inputs.sell_score > inputs.buy_score {
        SignalType::Wait
    } else {
        SignalType::Buy
    };

    let base = match signal_type {
        SignalType::Buy => (inputs.buy_score / 20.0).min(0.7),
        SignalType::Wait => 0.0,
    };

    let frame = inputs.frame;
    let i = frame.last_index();
    let close = inputs.last_candle.close;
    let buying = signal_type == SignalType::Buy;

    let mut confirmation = 0.0;

    if buying && inputs.assessment.strength == TrendStrength::StrongUp {
        if value_at(&frame.adx, i).is_some_and(|adx| adx > 25.0) {
            confirmation += 0.1;
        }
    }

    if let (Some(span_a), Some(span_b)) = (value_at(&frame.senkou_a, i), value_at(&frame.senkou_b, i)) {
        if buying && close > span_a.max(span_b) {
            confirmation += 0.08;
        }
    }

    if buying {
        if let Some(k) = value_at(&frame.stoch_k, i) {
            if k < 20.0 {
                confirmation += 0.05;
            } else if k > 80.0 {
                confirmation -= 0.1;
            }
        }
    }

    if let (Some(obv), Some(obv_sma)) = (value_at(&frame.obv, i), value_at(&frame.obv_sma, i)) {
        if buying && obv > obv_sma {
            confirmation += 0.06;
        }
    }

    if let (Some(lower), Some(upper)) = (value_at(&frame.bb_lower, i), value_at(&frame.bb_upper, i)) {
        let band = upper - lower;
        if band > 0.0 && buying && (close - lower) / band < 0.2 {
            confirmation += 0.05;
        }
    }

    let mut rsi_bonus = 0.0;
    if buying {
        if let Some(rsi) = value_at(&frame.rsi, i) {
            rsi_bonus = if rsi < 25.0 {
                0.2
            } else if rsi <= 40.0 {
                0.15
            } else if rsi <= 55.0 {
                0.05
            } else if rsi > 75.0 {
                -0.2
            } else {
                0.0
            };
        }
    }

    let mut volume_bonus = 0.0;
    let mut volume_consistency = 0.0;
    for reading in inputs.readings {
        if !reading.volume.is_elevated() {
            continue;
        }
        let weight = timeframe_weight(reading.timeframe, inputs.main_timeframe);
        if reading.price_change_pct > 0.0 && buying {
            volume_bonus += 0.05 * weight;
            volume_consistency += weight;
        } else if reading.price_change_pct < 0.0 {
            volume_bonus -= 0.03 * weight;
        }
    }
    if volume_consistency >= 0.6 {
        volume_bonus += 0.08;
    }

    let score_diff = inputs.buy_score - inputs.sell_score;
    let score_bonus = if score_diff > 8.0 {
        0.15
    } else if score_diff > 5.0 {
        0.1
    } else if score_diff < -3.0 {
        -0.2
    } else {
        0.0
    };

    let mut risk_penalty = 0.0;
    if let (Some(width), Some(width_sma)) =
        (value_at(&frame.bb_width, i), value_at(&frame.bb_width_sma, i))
    {
        if width < width_sma * 0.7 {
            risk_penalty += 0.15;
        }
    }
    // Thin-liquidity window, judged from the data's own clock.
    use chrono::Timelike;
    if LOW_LIQUIDITY_HOURS.contains(&inputs.last_candle.timestamp.hour()) {
        risk_penalty += 0.05;
    }

    let probability = (base
        + inputs.assessment.trend_bonus
        + rsi_bonus
        + volume_bonus
        + score_bonus
        + confirmation
        - risk_penalty)
        .clamp(0.0, MAX_PROBABILITY);

    (probability, signal_type)
}
