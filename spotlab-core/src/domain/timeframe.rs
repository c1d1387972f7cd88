//! Timeframes and holding-duration profiles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Candle interval of an input series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    M15,
    H1,
    H4,
    D1,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::M15 => "15m",
            Timeframe::H1 => "1h",
            Timeframe::H4 => "4h",
            Timeframe::D1 => "1d",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "15m" => Ok(Timeframe::M15),
            "1h" => Ok(Timeframe::H1),
            "4h" => Ok(Timeframe::H4),
            "1d" => Ok(Timeframe::D1),
            other => Err(format!("unknown timeframe '{other}'")),
        }
    }
}

/// Holding-duration profile of a recommendation.
///
/// The profile decides which timeframe drives the analysis, which auxiliary
/// timeframes feed the trend aggregation, how many bars a backtested trade may
/// stay open, and how wide the ATR-based targets are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvestmentType {
    /// ~60 minute hold; analysis on 15m candles.
    M60,
    /// ~4 hour hold; analysis on 1h candles.
    H4,
    /// ~1 day hold; analysis on 4h candles.
    D1,
}

impl InvestmentType {
    /// Timeframe the signal score and targets are computed on.
    pub fn main_timeframe(&self) -> Timeframe {
        match self {
            InvestmentType::M60 => Timeframe::M15,
            InvestmentType::H4 => Timeframe::H1,
            InvestmentType::D1 => Timeframe::H4,
        }
    }

    /// Timeframes contributing to the multi-timeframe trend aggregation.
    pub fn analysis_timeframes(&self) -> [Timeframe; 2] {
        match self {
            InvestmentType::M60 => [Timeframe::M15, Timeframe::H1],
            InvestmentType::H4 => [Timeframe::H1, Timeframe::H4],
            InvestmentType::D1 => [Timeframe::H4, Timeframe::D1],
        }
    }

    /// Minutes per backtest bar for this profile.
    pub fn bar_minutes(&self) -> u32 {
        match self {
            InvestmentType::M60 => 60,
            InvestmentType::H4 => 240,
            InvestmentType::D1 => 1440,
        }
    }

    /// Maximum bars a simulated trade may stay open before TIMEOUT.
    pub fn max_hold_bars(&self) -> usize {
        match self {
            InvestmentType::M60 => 48,
            InvestmentType::H4 => 72,
            InvestmentType::D1 => 30,
        }
    }

    pub fn hold_duration(&self) -> &'static str {
        match self {
            InvestmentType::M60 => "60 minutes",
            InvestmentType::H4 => "4 hours",
            InvestmentType::D1 => "1 day",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InvestmentType::M60 => "60m",
            InvestmentType::H4 => "4h",
            InvestmentType::D1 => "1d",
        }
    }
}

impl fmt::Display for InvestmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvestmentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "60m" => Ok(InvestmentType::M60),
            "4h" => Ok(InvestmentType::H4),
            "1d" => Ok(InvestmentType::D1),
            other => Err(format!("unknown investment type '{other}'")),
        }
    }
}
