//! spotlab-core — spot-only crypto signal scoring and backtesting engine.
//!
//! The library turns candle history into a BUY/WAIT decision with a success
//! probability and a TP/SL bracket, tracks how issued predictions resolve,
//! and replays pattern-driven entry rules over history to grade a strategy.
//! Everything here is pure and deterministic: no network, no filesystem, no
//! clock reads. Callers supply candles and the current instant.
//!
//! ```
//! use spotlab_core::{Analyzer, InvestmentType, TimeframeData};
//!
//! let analyzer = Analyzer::new();
//! let data = TimeframeData::new();
//! // With fewer than 50 candles per timeframe, analysis declines to guess.
//! assert!(analyzer.analyze("BTCUSDT", &data, InvestmentType::H4).is_err());
//! ```

pub mod analyze;
pub mod backtest;
pub mod domain;
pub mod error;
pub mod indicators;
pub mod scoring;
pub mod tracker;

pub use analyze::{Analyzer, TimeframeData};
pub use backtest::{bar_budget, BacktestSimulator, MarketPatternProfile, PatternKind, PatternLibrary};
pub use domain::{
    BacktestReport, BacktestTrade, Candle, EntryQuality, ExitReason, InvestmentType, Prediction,
    PredictionStats, PredictionStatus, SignalResult, SignalType, Timeframe, TrendStrength,
    Trigger, TriggerSet,
};
pub use error::AnalysisError;
pub use indicators::IndicatorFrame;
pub use scoring::{ScoreWeights, SignalScorer};
pub use tracker::PredictionTracker;
