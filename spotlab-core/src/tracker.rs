//! In-memory prediction tracking and accuracy bookkeeping.
//!
//! Per symbol, the last 50 issued predictions are kept in issue order.
//! Evaluation never reads a clock: the caller supplies both the current
//! price and the current instant, so replays and tests are deterministic.

use crate::domain::{
    Prediction, PredictionStats, PredictionStatus, SignalResult, SignalType,
};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

/// FIFO cap on tracked predictions per symbol.
pub const MAX_TRACKED: usize = 50;

/// Pending predictions expire after this long.
pub const EXPIRY_HOURS: i64 = 24;

#[derive(Debug, Clone, Default)]
pub struct PredictionTracker {
    predictions: HashMap<String, Vec<Prediction>>,
}

impl PredictionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new prediction from an analysis result, evicting the oldest
    /// entry once the per-symbol cap is reached.
    pub fn add_prediction(&mut self, symbol: &str, result: &SignalResult, issued_at: DateTime<Utc>) {
        let queue = self.predictions.entry(symbol.to_string()).or_default();
        queue.push(Prediction {
            symbol: symbol.to_string(),
            issued_at,
            signal_type: result.signal_type,
            entry_price: result.entry_price,
            tp1: result.tp1,
            tp2: result.tp2,
            stop_loss: result.stop_loss,
            success_probability: result.success_probability,
            trend_strength: result.trend_strength,
            status: PredictionStatus::Pending,
            accuracy: None,
            exit_price: None,
        });
        if queue.len() > MAX_TRACKED {
            let excess = queue.len() - MAX_TRACKED;
            queue.drain(..excess);
        }
    }

    /// Evaluate every tracked prediction for `symbol` against the current
    /// price and instant, then return the aggregate stats.
    ///
    /// Expiry is checked first; an expired prediction is not resolved against
    /// price even if the price would now hit a target. Resolution order for a
    /// pending BUY is TP2, then TP1, then SL. WAIT records only expire.
    pub fn check_predictions(
        &mut self,
        symbol: &str,
        current_price: f64,
        now: DateTime<Utc>,
    ) -> PredictionStats {
        let Some(queue) = self.predictions.get_mut(symbol) else {
            return PredictionStats::default();
        };

        let mut stats = PredictionStats::default();
        let mut accuracy_sum = 0.0;
        let last = queue.len().saturating_sub(1);

        for (index, prediction) in queue.iter_mut().enumerate() {
            if prediction.status == PredictionStatus::Pending {
                if now - prediction.issued_at > Duration::hours(EXPIRY_HOURS) {
                    prediction.status = PredictionStatus::Expired;
                } else if prediction.signal_type == SignalType::Buy {
                    if current_price >= prediction.tp2 {
                        prediction.status = PredictionStatus::HitTp2;
                        prediction.exit_price = Some(current_price);
                    } else if current_price >= prediction.tp1 {
                        prediction.status = PredictionStatus::HitTp1;
                        prediction.exit_price = Some(current_price);
                    } else if current_price <= prediction.stop_loss {
                        prediction.status = PredictionStatus::HitSl;
                        prediction.exit_price = Some(current_price);
                    }
                }
            }

            let live_accuracy = single_accuracy(prediction, current_price);
            if prediction.accuracy.is_none() || index == last {
                prediction.accuracy = Some(live_accuracy);
            }
            accuracy_sum += prediction.accuracy.unwrap_or(0.0);
            if index == last {
                stats.latest_accuracy = live_accuracy;
            }

            stats.total += 1;
            match prediction.status {
                PredictionStatus::HitTp1 => stats.hit_tp1 += 1,
                PredictionStatus::HitTp2 => stats.hit_tp2 += 1,
                PredictionStatus::HitSl => stats.hit_sl += 1,
                PredictionStatus::Expired => stats.expired += 1,
                PredictionStatus::Pending => stats.pending += 1,
            }
        }

        if stats.total > 0 {
            stats.average_accuracy = accuracy_sum / stats.total as f64;
        }
        stats
    }

    /// Tracked history for one symbol, oldest first.
    pub fn history(&self, symbol: &str) -> &[Prediction] {
        self.predictions.get(symbol).map_or(&[], Vec::as_slice)
    }

    pub fn tracked_count(&self, symbol: &str) -> usize {
        self.predictions.get(symbol).map_or(0, Vec::len)
    }
}

/// A BUY counts as accurate once the price reached TP1; WAIT never scores.
fn single_accuracy(prediction: &Prediction, current_price: f64) -> f64 {
    match prediction.signal_type {
        SignalType::Buy if current_price >= prediction.tp1 => 100.0,
        _ => 0.0,
    }
}
