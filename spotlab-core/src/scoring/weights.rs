//! Scoring weights, centralized so they can be tuned without touching the
//! scorer. Defaults are the production values.

use serde::{Deserialize, Serialize};

/// Base strengths for each signal family. Every one is multiplied by the
/// ADX regime factor before landing in a score.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub ichimoku_cross: f64,
    pub cloud_position: f64,
    pub ema_cross: f64,
    pub ema_alignment: f64,
    pub stoch_oversold_cross: f64,
    pub stoch_mid_cross: f64,
    pub stoch_weak_cross: f64,
    pub stoch_divergence: f64,
    pub rsi_deep: f64,
    pub rsi_strong: f64,
    pub rsi_neutral: f64,
    pub obv_confirm: f64,
    pub obv_mild: f64,
    pub obv_divergence: f64,
    pub macd_strong: f64,
    pub macd_improving: f64,
    pub macd_weak: f64,
    pub macd_zero_cross: f64,
    pub fib_strong: f64,
    pub fib_mild: f64,
    pub pattern_base: f64,
    pub pattern_support_boost: f64,
    pub pattern_volume_boost: f64,
    pub doji_penalty: f64,
    pub in_cloud_penalty: f64,
    pub very_strong_winner_boost: f64,
    pub consensus_boost: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            ichimoku_cross: 5.0,
            cloud_position: 4.0,
            ema_cross: 3.5,
            ema_alignment: 3.0,
            stoch_oversold_cross: 4.0,
            stoch_mid_cross: 3.0,
            stoch_weak_cross: 1.5,
            stoch_divergence: 2.5,
            rsi_deep: 3.5,
            rsi_strong: 3.0,
            rsi_neutral: 2.0,
            obv_confirm: 3.0,
            obv_mild: 2.0,
            obv_divergence: 2.0,
            macd_strong: 4.0,
            macd_improving: 3.0,
            macd_weak: 2.0,
            macd_zero_cross: 2.5,
            fib_strong: 3.0,
            fib_mild: 2.0,
            pattern_base: 2.5,
            pattern_support_boost: 1.5,
            pattern_volume_boost: 1.2,
            doji_penalty: 0.7,
            in_cloud_penalty: 0.7,
            very_strong_winner_boost: 1.2,
            consensus_boost: 1.15,
        }
    }
}
