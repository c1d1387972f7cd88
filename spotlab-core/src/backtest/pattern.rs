//! Market pattern profiles: named parameter presets for the backtest.
//!
//! Eight built-in profiles cover the usual market regimes. A TOML document
//! can override any of them (or add new names); overridden profiles keep the
//! entry rule of the built-in kind their name matches, falling back to the
//! default rule otherwise.

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The built-in pattern regimes, which also select the entry rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Default,
    BullMarket,
    BearMarket,
    Sideways,
    HighVolatility,
    LowVolatility,
    Breakout,
    Scalping,
}

impl PatternKind {
    pub const ALL: [PatternKind; 8] = [
        PatternKind::Default,
        PatternKind::BullMarket,
        PatternKind::BearMarket,
        PatternKind::Sideways,
        PatternKind::HighVolatility,
        PatternKind::LowVolatility,
        PatternKind::Breakout,
        PatternKind::Scalping,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::Default => "default",
            PatternKind::BullMarket => "bull_market",
            PatternKind::BearMarket => "bear_market",
            PatternKind::Sideways => "sideways",
            PatternKind::HighVolatility => "high_volatility",
            PatternKind::LowVolatility => "low_volatility",
            PatternKind::Breakout => "breakout",
            PatternKind::Scalping => "scalping",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatternKind {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| AnalysisError::InvalidPattern(s.to_string()))
    }
}

/// Tunable parameters of one market pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketPatternProfile {
    pub name: String,
    pub description: String,
    pub tp1_multiplier: f64,
    pub tp2_multiplier: f64,
    pub sl_multiplier: f64,
    pub atr_period: usize,
    pub rsi_period: usize,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub ema_fast: usize,
    pub ema_slow: usize,
    pub bb_period: usize,
    pub bb_std: f64,
    pub volume_threshold: f64,
    pub volume_multiplier: f64,
    pub success_boost: f64,
}

impl MarketPatternProfile {
    pub fn preset(kind: PatternKind) -> Self {
        match kind {
            PatternKind::Default => Self {
                name: "Default".into(),
                description: "Balanced parameters for any market".into(),
                tp1_multiplier: 1.0,
                tp2_multiplier: 2.0,
                sl_multiplier: 1.0,
                atr_period: 14,
                rsi_period: 14,
                rsi_oversold: 30.0,
                rsi_overbought: 70.0,
                ema_fast: 12,
                ema_slow: 26,
                bb_period: 20,
                bb_std: 2.0,
                volume_threshold: 1.2,
                volume_multiplier: 1.2,
                success_boost: 1.0,
            },
            PatternKind::BullMarket => Self {
                name: "Bull market".into(),
                description: "Tuned for sustained uptrends".into(),
                tp1_multiplier: 1.5,
                tp2_multiplier: 3.0,
                sl_multiplier: 1.2,
                atr_period: 21,
                rsi_period: 21,
                rsi_oversold: 40.0,
                rsi_overbought: 80.0,
                ema_fast: 8,
                ema_slow: 21,
                bb_period: 20,
                bb_std: 2.2,
                volume_threshold: 1.5,
                volume_multiplier: 1.5,
                success_boost: 1.15,
            },
            PatternKind::BearMarket => Self {
                name: "Bear market".into(),
                description: "Conservative settings for downtrends".into(),
                tp1_multiplier: 0.8,
                tp2_multiplier: 1.5,
                sl_multiplier: 0.7,
                atr_period: 10,
                rsi_period: 10,
                rsi_oversold: 20.0,
                rsi_overbought: 60.0,
                ema_fast: 5,
                ema_slow: 13,
                bb_period: 14,
                bb_std: 1.8,
                volume_threshold: 1.0,
                volume_multiplier: 1.0,
                success_boost: 0.9,
            },
            PatternKind::Sideways => Self {
                name: "Sideways".into(),
                description: "Range-bound market strategy".into(),
                tp1_multiplier: 0.6,
                tp2_multiplier: 1.2,
                sl_multiplier: 0.5,
                atr_period: 7,
                rsi_period: 7,
                rsi_oversold: 35.0,
                rsi_overbought: 65.0,
                ema_fast: 5,
                ema_slow: 10,
                bb_period: 10,
                bb_std: 1.5,
                volume_threshold: 0.8,
                volume_multiplier: 0.8,
                success_boost: 0.85,
            },
            PatternKind::HighVolatility => Self {
                name: "High volatility".into(),
                description: "Adapted to large swings".into(),
                tp1_multiplier: 2.0,
                tp2_multiplier: 4.0,
                sl_multiplier: 1.5,
                atr_period: 28,
                rsi_period: 28,
                rsi_oversold: 25.0,
                rsi_overbought: 75.0,
                ema_fast: 21,
                ema_slow: 50,
                bb_period: 25,
                bb_std: 2.5,
                volume_threshold: 2.0,
                volume_multiplier: 2.0,
                success_boost: 1.1,
            },
            PatternKind::LowVolatility => Self {
                name: "Low volatility".into(),
                description: "Tight targets for quiet markets".into(),
                tp1_multiplier: 0.4,
                tp2_multiplier: 0.8,
                sl_multiplier: 0.3,
                atr_period: 5,
                rsi_period: 5,
                rsi_oversold: 40.0,
                rsi_overbought: 60.0,
                ema_fast: 3,
                ema_slow: 8,
                bb_period: 8,
                bb_std: 1.2,
                volume_threshold: 0.6,
                volume_multiplier: 0.6,
                success_boost: 0.8,
            },
            PatternKind::Breakout => Self {
                name: "Breakout".into(),
                description: "Catches strong breakout moves".into(),
                tp1_multiplier: 2.5,
                tp2_multiplier: 5.0,
                sl_multiplier: 1.8,
                atr_period: 20,
                rsi_period: 20,
                rsi_oversold: 30.0,
                rsi_overbought: 70.0,
                ema_fast: 10,
                ema_slow: 30,
                bb_period: 20,
                bb_std: 3.0,
                volume_threshold: 3.0,
                volume_multiplier: 3.0,
                success_boost: 1.2,
            },
            PatternKind::Scalping => Self {
                name: "Scalping".into(),
                description: "High-frequency short holds".into(),
                tp1_multiplier: 0.3,
                tp2_multiplier: 0.6,
                sl_multiplier: 0.2,
                atr_period: 3,
                rsi_period: 3,
                rsi_oversold: 45.0,
                rsi_overbought: 55.0,
                ema_fast: 2,
                ema_slow: 5,
                bb_period: 5,
                bb_std: 1.0,
                volume_threshold: 0.5,
                volume_multiplier: 0.5,
                success_boost: 0.75,
            },
        }
    }
}

/// TOML override document: `[patterns.<name>]` tables of full profiles.
#[derive(Debug, Deserialize)]
struct PatternOverrides {
    #[serde(default)]
    patterns: BTreeMap<String, MarketPatternProfile>,
}

/// Named profile lookup: built-ins plus any loaded overrides.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    profiles: BTreeMap<String, MarketPatternProfile>,
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PatternLibrary {
    pub fn builtin() -> Self {
        let profiles = PatternKind::ALL
            .iter()
            .map(|&kind| (kind.as_str().to_string(), MarketPatternProfile::preset(kind)))
            .collect();
        Self { profiles }
    }

    /// Merge profiles from a TOML document over the built-ins.
    pub fn apply_overrides(&mut self, toml_text: &str) -> Result<(), AnalysisError> {
        let overrides: PatternOverrides = toml::from_str(toml_text)?;
        self.profiles.extend(overrides.patterns);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&MarketPatternProfile, AnalysisError> {
        self.profiles
            .get(name)
            .ok_or_else(|| AnalysisError::InvalidPattern(name.to_string()))
    }

    /// The entry rule a named profile runs under: its matching built-in
    /// kind, or the default rule for custom names.
    pub fn rule_kind(name: &str) -> PatternKind {
        PatternKind::from_str(name).unwrap_or(PatternKind::Default)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }
}
