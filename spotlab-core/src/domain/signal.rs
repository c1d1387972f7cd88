//! Signal decision types: the BUY/WAIT verdict, trend labels, trigger tags,
//! and the complete per-symbol analysis result.

use super::timeframe::{InvestmentType, Timeframe};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Trading decision. Spot-only: the engine never recommends a short, so a
/// bearish consensus is demoted to `Wait` at the decision boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalType {
    Buy,
    Wait,
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalType::Buy => f.write_str("BUY"),
            SignalType::Wait => f.write_str("WAIT"),
        }
    }
}

/// Aggregated multi-timeframe trend verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendStrength {
    StrongUp,
    StrongDown,
    Mixed,
    /// Heavily bearish consensus: do not buy until the trend turns.
    WaitForUptrend,
}

impl fmt::Display for TrendStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendStrength::StrongUp => f.write_str("STRONG_UP"),
            TrendStrength::StrongDown => f.write_str("STRONG_DOWN"),
            TrendStrength::Mixed => f.write_str("MIXED"),
            TrendStrength::WaitForUptrend => f.write_str("WAIT_FOR_UPTREND"),
        }
    }
}

/// Confidence tier derived from success probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryQuality {
    High,
    Medium,
    Low,
}

impl EntryQuality {
    /// HIGH above 0.75, MEDIUM above 0.6, LOW otherwise.
    pub fn from_probability(probability: f64) -> Self {
        if probability > 0.75 {
            EntryQuality::High
        } else if probability > 0.6 {
            EntryQuality::Medium
        } else {
            EntryQuality::Low
        }
    }
}

/// Named condition that contributed to a score.
///
/// A fixed enumerated set rather than an open string map, so consumers can
/// match exhaustively and serialization stays stable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Trigger {
    // Trend regime
    VeryStrongTrend,
    StrongTrend,
    WeakTrend,
    VeryNarrowRange,
    NarrowRange,
    ExpandingRange,
    // Ichimoku
    IchimokuBullishCross,
    IchimokuBearishCross,
    PriceAboveCloud,
    PriceBelowCloud,
    PriceInCloud,
    // Moving averages
    EmaBullishCross,
    EmaBearishCross,
    BullishAlignment,
    BearishAlignment,
    // Stochastic
    StochBullishCross,
    StochBearishCross,
    StochBullishDivergence,
    StochBearishDivergence,
    // RSI
    RsiDeepOversoldRecovery,
    RsiOversoldRecovery,
    RsiNeutralBullish,
    RsiOverboughtDecline,
    RsiStrongDecline,
    // OBV
    ObvBullishConfirm,
    ObvMildBullish,
    ObvBearishConfirm,
    ObvMildBearish,
    ObvBullishDivergence,
    ObvBearishDivergence,
    // MACD
    MacdStrongBullish,
    MacdBullishImproving,
    MacdWeakBullish,
    MacdStrongBearish,
    MacdBearishDeteriorating,
    MacdWeakBearish,
    MacdAboveZero,
    MacdBelowZero,
    // Fibonacci
    FibStrongBounce,
    FibMildBounce,
    FibStrongRejection,
    FibMildRejection,
    // Candlesticks
    BullishHammer,
    BullishEngulfing,
    MorningStar,
    HangingMan,
    EveningStar,
    PatternAtSupport,
    PatternAtResistance,
    PatternVolumeConfirm,
    DojiIndecision,
    // Consensus
    BullishConsensus,
    BearishConsensus,
}

/// Ordered set of triggers fired during scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSet(BTreeSet<Trigger>);

impl TriggerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, trigger: Trigger) {
        self.0.insert(trigger);
    }

    pub fn contains(&self, trigger: Trigger) -> bool {
        self.0.contains(&trigger)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Trigger> + '_ {
        self.0.iter().copied()
    }

    /// How many of the given triggers are present (consensus counting).
    pub fn count_of(&self, triggers: &[Trigger]) -> usize {
        triggers.iter().filter(|t| self.0.contains(t)).count()
    }
}

/// Complete analysis verdict for one (symbol, investment type).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalResult {
    pub symbol: String,
    pub investment_type: InvestmentType,
    pub timeframe: Timeframe,
    pub entry_price: f64,
    pub signal_type: SignalType,
    pub buy_score: f64,
    pub sell_score: f64,
    pub triggers: TriggerSet,
    pub trend_strength: TrendStrength,
    /// Always within [0, 0.95].
    pub success_probability: f64,
    pub tp1: f64,
    pub tp2: f64,
    pub stop_loss: f64,
    /// (tp1 - entry) / (entry - stop_loss) for BUY; 0 for WAIT.
    pub risk_reward: f64,
    pub entry_quality: EntryQuality,
    pub rsi: f64,
    pub atr: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_quality_tiers() {
        assert_eq!(EntryQuality::from_probability(0.8), EntryQuality::High);
        assert_eq!(EntryQuality::from_probability(0.75), EntryQuality::Medium);
        assert_eq!(EntryQuality::from_probability(0.61), EntryQuality::Medium);
        assert_eq!(EntryQuality::from_probability(0.6), EntryQuality::Low);
        assert_eq!(EntryQuality::from_probability(0.0), EntryQuality::Low);
    }

    #[test]
    fn trigger_set_counting() {
        let mut set = TriggerSet::new();
        set.insert(Trigger::EmaBullishCross);
        set.insert(Trigger::MacdStrongBullish);
        set.insert(Trigger::EmaBullishCross); // duplicate ignored
        assert_eq!(set.len(), 2);
        assert_eq!(
            set.count_of(&[
                Trigger::EmaBullishCross,
                Trigger::MacdStrongBullish,
                Trigger::PriceAboveCloud
            ]),
            2
        );
    }

    #[test]
    fn trigger_set_serializes_as_array() {
        let mut set = TriggerSet::new();
        set.insert(Trigger::DojiIndecision);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["DojiIndecision"]"#);
    }
}
