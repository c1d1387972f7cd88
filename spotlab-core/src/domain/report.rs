//! BacktestReport — aggregate statistics over a simulated trade list.

use super::timeframe::InvestmentType;
use super::trade::{BacktestTrade, ExitReason};
use serde::{Deserialize, Serialize};

/// Epsilon floor for the profit factor denominator: a run with no losing
/// trades reports a large finite factor instead of dividing by zero.
pub const PROFIT_FACTOR_EPSILON: f64 = 0.01;

/// Aggregate result of one backtest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestReport {
    pub symbol: String,
    pub pattern_name: String,
    pub investment_type: InvestmentType,
    pub days_back: u32,
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    /// Percent of trades with positive pnl, 0-100.
    pub win_rate: f64,
    pub total_pnl: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    pub profit_factor: f64,
    pub avg_pnl_percent: f64,
    pub tp1_hits: usize,
    pub sl_hits: usize,
    pub timeouts: usize,
    /// clamp(win_rate*0.4 + profit_factor*20 + avg_pnl*2, 0, 100).
    pub performance_score: f64,
    pub best_trade: Option<BacktestTrade>,
    pub worst_trade: Option<BacktestTrade>,
    /// Most recent trades, at most 10.
    pub recent_trades: Vec<BacktestTrade>,
    /// Set when the run produced no trades (not an error).
    pub reason: Option<String>,
}

impl BacktestReport {
    /// Zero-trade report with an explanatory reason.
    pub fn empty(
        symbol: &str,
        pattern_name: &str,
        investment_type: InvestmentType,
        days_back: u32,
        reason: String,
    ) -> Self {
        Self {
            symbol: symbol.to_string(),
            pattern_name: pattern_name.to_string(),
            investment_type,
            days_back,
            total_trades: 0,
            winning_trades: 0,
            losing_trades: 0,
            win_rate: 0.0,
            total_pnl: 0.0,
            avg_win: 0.0,
            avg_loss: 0.0,
            profit_factor: 0.0,
            avg_pnl_percent: 0.0,
            tp1_hits: 0,
            sl_hits: 0,
            timeouts: 0,
            performance_score: 0.0,
            best_trade: None,
            worst_trade: None,
            recent_trades: Vec::new(),
            reason: Some(reason),
        }
    }

    /// Aggregate a non-empty trade list into a report.
    pub fn from_trades(
        symbol: &str,
        pattern_name: &str,
        investment_type: InvestmentType,
        days_back: u32,
        trades: Vec<BacktestTrade>,
    ) -> Self {
        let total = trades.len();
        let winning = trades.iter().filter(|t| t.is_winner()).count();
        let losing = total - winning;
        let win_rate = if total > 0 {
            winning as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        let total_pnl: f64 = trades.iter().map(|t| t.pnl_percent).sum();
        let total_profit: f64 = trades
            .iter()
            .filter(|t| t.pnl_percent > 0.0)
            .map(|t| t.pnl_percent)
            .sum();
        let total_loss: f64 = trades
            .iter()
            .filter(|t| t.pnl_percent < 0.0)
            .map(|t| t.pnl_percent.abs())
            .sum();

        let avg_win = total_profit / winning.max(1) as f64;
        let avg_loss = if losing > 0 {
            -(total_loss / losing as f64)
        } else {
            0.0
        };
        let profit_factor = total_profit / total_loss.max(PROFIT_FACTOR_EPSILON);
        let avg_pnl_percent = if total > 0 {
            total_pnl / total as f64
        } else {
            0.0
        };

        let tp1_hits = trades
            .iter()
            .filter(|t| t.exit_reason == ExitReason::Tp1)
            .count();
        let sl_hits = trades
            .iter()
            .filter(|t| t.exit_reason == ExitReason::StopLoss)
            .count();
        let timeouts = trades
            .iter()
            .filter(|t| t.exit_reason == ExitReason::Timeout)
            .count();

        let performance_score =
            (win_rate * 0.4 + profit_factor * 20.0 + avg_pnl_percent * 2.0).clamp(0.0, 100.0);

        let best_trade = trades
            .iter()
            .max_by(|a, b| a.pnl_percent.total_cmp(&b.pnl_percent))
            .cloned();
        let worst_trade = trades
            .iter()
            .min_by(|a, b| a.pnl_percent.total_cmp(&b.pnl_percent))
            .cloned();
        let recent_trades = trades
            .iter()
            .rev()
            .take(10)
            .rev()
            .cloned()
            .collect::<Vec<_>>();

        Self {
            symbol: symbol.to_string(),
            pattern_name: pattern_name.to_string(),
            investment_type,
            days_back,
            total_trades: total,
            winning_trades: winning,
            losing_trades: losing,
            win_rate,
            total_pnl,
            avg_win,
            avg_loss,
            profit_factor,
            avg_pnl_percent,
            tp1_hits,
            sl_hits,
            timeouts,
            performance_score,
            best_trade,
            worst_trade,
            recent_trades,
            reason: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn trade(pnl: f64, reason: ExitReason) -> BacktestTrade {
        let t = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        BacktestTrade {
            entry_index: 50,
            entry_time: t,
            entry_price: 100.0,
            tp1: 102.0,
            tp2: 108.0,
            stop_loss: 98.0,
            exit_time: t,
            exit_price: 100.0 * (1.0 + pnl / 100.0),
            exit_reason: reason,
            pnl_percent: pnl,
        }
    }

    #[test]
    fn report_aggregates_counts() {
        let trades = vec![
            trade(2.0, ExitReason::Tp1),
            trade(2.0, ExitReason::Tp1),
            trade(-2.0, ExitReason::StopLoss),
            trade(0.5, ExitReason::Timeout),
        ];
        let report =
            BacktestReport::from_trades("ETHUSDT", "default", InvestmentType::H4, 30, trades);
        assert_eq!(report.total_trades, 4);
        assert_eq!(report.winning_trades, 3);
        assert_eq!(report.losing_trades, 1);
        assert_eq!(report.tp1_hits, 2);
        assert_eq!(report.sl_hits, 1);
        assert_eq!(report.timeouts, 1);
        assert!((report.win_rate - 75.0).abs() < 1e-9);
        assert!((report.total_pnl - 2.5).abs() < 1e-9);
        assert!((report.profit_factor - 4.5 / 2.0).abs() < 1e-9);
        assert!(report.reason.is_none());
    }

    #[test]
    fn profit_factor_epsilon_floor_with_no_losses() {
        let trades = vec![trade(1.0, ExitReason::Tp1), trade(2.0, ExitReason::Tp1)];
        let report =
            BacktestReport::from_trades("ETHUSDT", "default", InvestmentType::H4, 30, trades);
        assert!(report.profit_factor.is_finite());
        assert!((report.profit_factor - 3.0 / PROFIT_FACTOR_EPSILON).abs() < 1e-9);
    }

    #[test]
    fn performance_score_clamped() {
        let trades = vec![trade(50.0, ExitReason::Tp1)];
        let report =
            BacktestReport::from_trades("ETHUSDT", "default", InvestmentType::H4, 30, trades);
        assert!(report.performance_score <= 100.0);
        assert!(report.performance_score >= 0.0);
    }

    #[test]
    fn recent_trades_capped_at_ten_most_recent() {
        let trades: Vec<_> = (0..15)
            .map(|i| trade(i as f64 / 10.0 + 0.1, ExitReason::Tp1))
            .collect();
        let report =
            BacktestReport::from_trades("ETHUSDT", "default", InvestmentType::H4, 30, trades);
        assert_eq!(report.recent_trades.len(), 10);
        // Last element is the most recent trade.
        assert!((report.recent_trades[9].pnl_percent - 1.5).abs() < 1e-9);
    }
}
