//! Multi-timeframe trend aggregation.
//!
//! Each analysis timeframe is classified independently from its own
//! indicator frame, then the readings are combined with weights that depend
//! on which timeframe the investment type centres on. The output feeds both
//! the trend label on the signal and the trend bonus inside the probability
//! estimate.

use crate::domain::{Candle, Timeframe, TrendStrength};
use crate::indicators::{value_at, IndicatorFrame};
use serde::{Deserialize, Serialize};

/// Per-timeframe trend classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeframeTrend {
    StrongUptrend,
    Uptrend,
    Sideways,
    Downtrend,
    StrongDowntrend,
    Unknown,
}

/// Volume regime relative to the 20-bar average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeLevel {
    High,
    Elevated,
    Normal,
    Low,
}

impl VolumeLevel {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > 2.0 {
            VolumeLevel::High
        } else if ratio > 1.5 {
            VolumeLevel::Elevated
        } else if ratio > 0.8 {
            VolumeLevel::Normal
        } else {
            VolumeLevel::Low
        }
    }

    pub fn is_elevated(self) -> bool {
        matches!(self, VolumeLevel::High | VolumeLevel::Elevated)
    }
}

/// One timeframe's contribution to the aggregate trend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimeframeReading {
    pub timeframe: Timeframe,
    pub trend: TimeframeTrend,
    pub volume: VolumeLevel,
    pub volume_ratio: f64,
    /// Bar-over-bar close change, percent.
    pub price_change_pct: f64,
}

/// Aggregate verdict plus the probability bonus it carries.
#[derive(Debug, Clone, Copy)]
pub struct TrendAssessment {
    pub weighted_score: f64,
    pub strength: TrendStrength,
    pub trend_bonus: f64,
}

/// Classify one timeframe from the tail of its frame.
pub fn classify_timeframe(
    timeframe: Timeframe,
    candles: &[Candle],
    frame: &IndicatorFrame,
) -> TimeframeReading {
    let i = frame.last_index();
    let close = candles[i].close;
    let prev_close = candles[i - 1].close;
    let price_change_pct = (close - prev_close) / prev_close * 100.0;

    let price_trend = match (value_at(&frame.ema_10, i), value_at(&frame.ema_20, i)) {
        (Some(e10), Some(e20)) => {
            if e10 > e20 && close > e10 {
                TimeframeTrend::Uptrend
            } else if e10 < e20 && close < e10 {
                TimeframeTrend::Downtrend
            } else {
                TimeframeTrend::Sideways
            }
        }
        _ => TimeframeTrend::Unknown,
    };

    let volume_ratio = value_at(&frame.volume_ratio, i).unwrap_or(1.0);
    let volume = VolumeLevel::from_ratio(volume_ratio);

    // Elevated volume in the direction of the move upgrades the trend.
    let trend = match price_trend {
        TimeframeTrend::Uptrend if volume.is_elevated() && price_change_pct > 0.0 => {
            TimeframeTrend::StrongUptrend
        }
        TimeframeTrend::Downtrend if volume.is_elevated() && price_change_pct < 0.0 => {
            TimeframeTrend::StrongDowntrend
        }
        other => other,
    };

    TimeframeReading {
        timeframe,
        trend,
        volume,
        volume_ratio,
        price_change_pct,
    }
}

/// Weight of a timeframe's vote, given the main analysis timeframe.
pub fn timeframe_weight(timeframe: Timeframe, main: Timeframe) -> f64 {
    match timeframe {
        Timeframe::M15 => {
            if main == Timeframe::M15 {
                0.4
            } else {
                0.2
            }
        }
        Timeframe::H1 => {
            if main == Timeframe::H1 {
                0.3
            } else {
                0.25
            }
        }
        Timeframe::H4 => {
            if main == Timeframe::H4 {
                0.2
            } else {
                0.35
            }
        }
        Timeframe::D1 => {
            if main == Timeframe::D1 {
                0.1
            } else {
                0.2
            }
        }
    }
}

/// Combine the readings into a single trend verdict.
pub fn aggregate(readings: &[TimeframeReading], main: Timeframe) -> TrendAssessment {
    let mut weighted = 0.0;
    let mut total_weight = 0.0;

    for reading in readings {
        let weight = timeframe_weight(reading.timeframe, main);
        total_weight += weight;
        weighted += match reading.trend {
            TimeframeTrend::StrongUptrend => 2.0 * weight,
            TimeframeTrend::Uptrend => weight,
            TimeframeTrend::StrongDowntrend => -2.0 * weight,
            TimeframeTrend::Downtrend => -weight,
            TimeframeTrend::Sideways | TimeframeTrend::Unknown => 0.0,
        };
    }

    if total_weight > 0.0 {
        weighted /= total_weight;
    }

    let (strength, mut bonus) = if weighted >= 1.5 {
        (TrendStrength::StrongUp, 0.25)
    } else if weighted >= 0.8 {
        (TrendStrength::StrongUp, 0.15)
    } else if weighted <= -1.5 {
        (TrendStrength::WaitForUptrend, -0.3)
    } else if weighted <= -0.8 {
        (TrendStrength::StrongDown, -0.2)
    } else {
        (TrendStrength::Mixed, weighted * 0.1)
    };

    // Volume-consistency term: elevated volume moving with or against price.
    for reading in readings {
        if reading.volume.is_elevated() {
            if reading.price_change_pct > 0.0 {
                bonus += 0.05;
            } else if reading.price_change_pct < 0.0 {
                bonus -= 0.05;
            }
        }
    }

    TrendAssessment {
        weighted_score: weighted,
        strength,
        trend_bonus: bonus,
    }
}
