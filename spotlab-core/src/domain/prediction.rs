//! Issued predictions and their lifecycle.
//!
//! A prediction is created from a `SignalResult` at issuance time and is only
//! ever mutated by evaluation against a later price (or by 24h expiry). Status
//! transitions are one-way: once terminal, a prediction never returns to
//! `Pending`.

use super::signal::{SignalType, TrendStrength};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of an issued prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictionStatus {
    Pending,
    HitTp1,
    HitTp2,
    HitSl,
    Expired,
}

impl PredictionStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PredictionStatus::Pending)
    }
}

/// One recorded recommendation awaiting (or past) resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub symbol: String,
    pub issued_at: DateTime<Utc>,
    pub signal_type: SignalType,
    pub entry_price: f64,
    pub tp1: f64,
    pub tp2: f64,
    pub stop_loss: f64,
    pub success_probability: f64,
    pub trend_strength: TrendStrength,
    pub status: PredictionStatus,
    /// 100 once a take-profit was reached, 0 once stopped out or expired.
    /// `None` while pending.
    pub accuracy: Option<f64>,
    pub exit_price: Option<f64>,
}

/// Per-symbol aggregate over the tracked prediction history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionStats {
    pub total: usize,
    pub hit_tp1: usize,
    pub hit_tp2: usize,
    pub hit_sl: usize,
    pub expired: usize,
    pub pending: usize,
    /// Accuracy of the most recently issued prediction (live-evaluated while
    /// pending).
    pub latest_accuracy: f64,
    /// Mean accuracy across the tracked history.
    pub average_accuracy: f64,
}
