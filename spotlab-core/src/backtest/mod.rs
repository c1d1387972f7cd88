//! Pattern-profile backtesting.

pub mod pattern;
pub mod simulator;

pub use pattern::{MarketPatternProfile, PatternKind, PatternLibrary};
pub use simulator::{bar_budget, BacktestSimulator, MIN_BACKTEST_CANDLES};
