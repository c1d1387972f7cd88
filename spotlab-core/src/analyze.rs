//! Analysis orchestration: candles in, a complete `SignalResult` out.
//!
//! The main timeframe for the investment type must carry enough history;
//! auxiliary timeframes that are short or missing are skipped rather than
//! failing the whole analysis. No clock and no I/O — callers hand in the
//! candles and get a deterministic verdict back.

use crate::domain::{Candle, EntryQuality, InvestmentType, SignalResult, Timeframe};
use crate::error::AnalysisError;
use crate::indicators::{value_at, IndicatorFrame};
use crate::scoring::{
    aggregate, classify_timeframe, compute_targets, estimate, ProbabilityInputs, ScoreWeights,
    SignalScorer, TimeframeReading,
};
use std::collections::BTreeMap;

/// Candle history per timeframe, as supplied by the caller.
pub type TimeframeData = BTreeMap<Timeframe, Vec<Candle>>;

#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    scorer: SignalScorer,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: ScoreWeights) -> Self {
        Self {
            scorer: SignalScorer::with_weights(weights),
        }
    }

    pub fn analyze(
        &self,
        symbol: &str,
        data: &TimeframeData,
        investment_type: InvestmentType,
    ) -> Result<SignalResult, AnalysisError> {
        let main_timeframe = investment_type.main_timeframe();
        let candles = data
            .get(&main_timeframe)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let frame = IndicatorFrame::compute(candles)?;

        let readings = self.classify_auxiliary(data, investment_type);
        let breakdown = self.scorer.score(candles, &frame);
        let assessment = aggregate(&readings, main_timeframe);

        let last_candle = &candles[frame.last_index()];
        let (probability, signal_type) = estimate(&ProbabilityInputs {
            buy_score: breakdown.buy_score,
            sell_score: breakdown.sell_score,
            assessment: &assessment,
            readings: &readings,
            main_timeframe,
            frame: &frame,
            last_candle,
        });

        let entry_price = last_candle.close;
        let atr = value_at(&frame.atr, frame.last_index()).unwrap_or(0.0);
        let targets = compute_targets(
            entry_price,
            signal_type,
            atr,
            assessment.strength,
            investment_type,
            &frame,
        );

        Ok(SignalResult {
            symbol: symbol.to_string(),
            investment_type,
            timeframe: main_timeframe,
            entry_price,
            signal_type,
            buy_score: breakdown.buy_score,
            sell_score: breakdown.sell_score,
            triggers: breakdown.triggers,
            trend_strength: assessment.strength,
            success_probability: probability,
            tp1: targets.tp1,
            tp2: targets.tp2,
            stop_loss: targets.stop_loss,
            risk_reward: targets.risk_reward(entry_price, signal_type),
            entry_quality: EntryQuality::from_probability(probability),
            rsi: value_at(&frame.rsi, frame.last_index()).unwrap_or(f64::NAN),
            atr,
        })
    }

    /// Trend/volume readings for every analysis timeframe with usable data.
    fn classify_auxiliary(
        &self,
        data: &TimeframeData,
        investment_type: InvestmentType,
    ) -> Vec<TimeframeReading> {
        investment_type
            .analysis_timeframes()
            .iter()
            .filter_map(|&timeframe| {
                let candles = data.get(&timeframe)?;
                let frame = IndicatorFrame::compute(candles).ok()?;
                Some(classify_timeframe(timeframe, candles, &frame))
            })
            .collect()
    }
}
