//! Domain types: candles, timeframes, signal verdicts, predictions, trades,
//! and backtest reports.

pub mod candle;
pub mod prediction;
pub mod report;
pub mod signal;
pub mod timeframe;
pub mod trade;

pub use candle::Candle;
pub use prediction::{Prediction, PredictionStats, PredictionStatus};
pub use report::BacktestReport;
pub use signal::{EntryQuality, SignalResult, SignalType, TrendStrength, Trigger, TriggerSet};
pub use timeframe::{InvestmentType, Timeframe};
pub use trade::{BacktestTrade, ExitReason};
