//! BacktestTrade — one simulated round trip, immutable once recorded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a simulated trade closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitReason {
    Tp1,
    StopLoss,
    Timeout,
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitReason::Tp1 => f.write_str("TP1"),
            ExitReason::StopLoss => f.write_str("STOP_LOSS"),
            ExitReason::Timeout => f.write_str("TIMEOUT"),
        }
    }
}

/// A completed simulated trade. tp2 is carried for display only; backtest
/// exits use tp1 and the stop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestTrade {
    pub entry_index: usize,
    pub entry_time: DateTime<Utc>,
    pub entry_price: f64,
    pub tp1: f64,
    pub tp2: f64,
    pub stop_loss: f64,
    pub exit_time: DateTime<Utc>,
    pub exit_price: f64,
    pub exit_reason: ExitReason,
    pub pnl_percent: f64,
}

impl BacktestTrade {
    pub fn is_winner(&self) -> bool {
        self.pnl_percent > 0.0
    }
}
