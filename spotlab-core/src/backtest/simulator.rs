//! Historical replay of pattern-driven entry rules.
//!
//! The series is truncated to a bar budget derived from the lookback window,
//! per-profile indicators are computed once, and each bar past the warm-up is
//! tested against the pattern's entry rule. Entries are simulated forward
//! with TP1-before-SL priority inside a bar and a max-hold timeout keyed by
//! the investment type. Zero entries is a reported outcome, not an error.

use crate::domain::{BacktestReport, BacktestTrade, Candle, ExitReason, InvestmentType};
use crate::error::AnalysisError;
use crate::indicators::rolling::{rolling_max, rolling_mean};
use crate::indicators::{atr, ema, rsi};

use super::pattern::{MarketPatternProfile, PatternKind, PatternLibrary};

/// Warm-up bars skipped before entries are considered.
const WARMUP_BARS: usize = 50;

/// Candles needed for one backtest run.
pub const MIN_BACKTEST_CANDLES: usize = 50;

/// How many candles a lookback of `days_back` needs, buffered for indicator
/// warm-up and clamped to a sane fetch size.
pub fn bar_budget(investment_type: InvestmentType, days_back: u32) -> usize {
    let candles_needed = days_back as usize * 1440 / investment_type.bar_minutes() as usize;
    (candles_needed + 100).clamp(200, 1000)
}

#[derive(Debug, Clone, Default)]
pub struct BacktestSimulator {
    library: PatternLibrary,
}

struct EntrySignal {
    index: usize,
    entry_price: f64,
    tp1: f64,
    tp2: f64,
    stop_loss: f64,
}

impl BacktestSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_library(library: PatternLibrary) -> Self {
        Self { library }
    }

    pub fn library(&self) -> &PatternLibrary {
        &self.library
    }

    /// Replay `pattern_name`'s entry rule over the candle history.
    pub fn run(
        &self,
        symbol: &str,
        candles: &[Candle],
        pattern_name: &str,
        investment_type: InvestmentType,
        days_back: u32,
    ) -> Result<BacktestReport, AnalysisError> {
        let profile = self.library.get(pattern_name)?;
        let rule = PatternLibrary::rule_kind(pattern_name);

        // Most recent bars only, within the budget for this lookback.
        let budget = bar_budget(investment_type, days_back);
        let candles = &candles[candles.len().saturating_sub(budget)..];
        if candles.len() < MIN_BACKTEST_CANDLES {
            return Err(AnalysisError::insufficient(MIN_BACKTEST_CANDLES, candles.len()));
        }

        let signals = generate_signals(candles, profile, rule);
        if signals.is_empty() {
            return Ok(BacktestReport::empty(
                symbol,
                pattern_name,
                investment_type,
                days_back,
                format!(
                    "no {} entries over the last {} days",
                    profile.name, days_back
                ),
            ));
        }

        let max_hold = investment_type.max_hold_bars();
        let trades: Vec<BacktestTrade> = signals
            .iter()
            .map(|signal| simulate_trade(signal, candles, max_hold))
            .collect();

        Ok(BacktestReport::from_trades(
            symbol,
            pattern_name,
            investment_type,
            days_back,
            trades,
        ))
    }
}

fn generate_signals(
    candles: &[Candle],
    profile: &MarketPatternProfile,
    rule: PatternKind,
) -> Vec<EntrySignal> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
    let volumes: Vec<f64> = candles.iter().map(|c| c.volume).collect();

    let ema_fast = ema(&closes, profile.ema_fast);
    let ema_slow = ema(&closes, profile.ema_slow);
    let rsi_series = rsi(&closes, profile.rsi_period);
    let atr_series = atr(candles, profile.atr_period);
    let atr_avg = rolling_mean(&atr_series, 20);
    let volume_avg = rolling_mean(&volumes, 20);
    let high_20 = rolling_max(&highs, 20);

    let mut signals = Vec::new();
    // The final bar is excluded: a trade entered there has nothing to exit into.
    for i in WARMUP_BARS..candles.len() - 1 {
        let close = closes[i];
        let ema_signal = ema_fast[i] > ema_slow[i];
        let rsi_value = rsi_series[i];
        let rsi_signal = rsi_value > profile.rsi_oversold && rsi_value < profile.rsi_overbought;
        let volume_signal = volumes[i] > volume_avg[i] * profile.volume_multiplier;

        // NaN indicator values fail every comparison, skipping the bar.
        let entered = match rule {
            PatternKind::BullMarket => ema_signal && rsi_value > 40.0,
            PatternKind::BearMarket => ema_signal && rsi_value > 50.0 && volume_signal,
            PatternKind::Sideways => {
                (ema_fast[i] - ema_slow[i]).abs() < close * 0.01 && rsi_signal
            }
            PatternKind::HighVolatility => ema_signal && atr_series[i] > atr_avg[i] * 1.5,
            PatternKind::LowVolatility => {
                ema_signal && rsi_signal && atr_series[i] < atr_avg[i] * 0.8
            }
            PatternKind::Breakout => close > high_20[i - 1] * 1.02,
            PatternKind::Scalping => {
                ema_signal && rsi_value > 45.0 && rsi_value < 55.0 && volume_signal
            }
            PatternKind::Default => ema_signal && rsi_signal,
        };

        if entered {
            signals.push(EntrySignal {
                index: i,
                entry_price: close,
                tp1: close * (1.0 + 2.0 * profile.tp1_multiplier / 100.0),
                tp2: close * (1.0 + 4.0 * profile.tp2_multiplier / 100.0),
                stop_loss: close * (1.0 - 2.0 * profile.sl_multiplier / 100.0),
            });
        }
    }
    signals
}

fn simulate_trade(signal: &EntrySignal, candles: &[Candle], max_hold: usize) -> BacktestTrade {
    let exit_index = (signal.index + max_hold).min(candles.len() - 1);

    let mut exit = (
        exit_index,
        candles[exit_index].close,
        ExitReason::Timeout,
    );
    for (i, candle) in candles
        .iter()
        .enumerate()
        .take(exit_index + 1)
        .skip(signal.index + 1)
    {
        // TP1 wins a same-bar tie against the stop.
        if candle.high >= signal.tp1 {
            exit = (i, signal.tp1, ExitReason::Tp1);
            break;
        }
        if candle.low <= signal.stop_loss {
            exit = (i, signal.stop_loss, ExitReason::StopLoss);
            break;
        }
    }

    let (index, exit_price, exit_reason) = exit;
    BacktestTrade {
        entry_index: signal.index,
        entry_time: candles[signal.index].timestamp,
        entry_price: signal.entry_price,
        tp1: signal.tp1,
        tp2: signal.tp2,
        stop_loss: signal.stop_loss,
        exit_time: candles[index].timestamp,
        exit_price,
        exit_reason,
        pnl_percent: (exit_price / signal.entry_price - 1.0) * 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_candles;

    fn rising_closes(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 * 1.004_f64.powi(i as i32)).collect()
    }

    #[test]
    fn budget_is_clamped_to_bounds() {
        // 30 days of 4h bars: 180 candles + 100 buffer.
        assert_eq!(bar_budget(InvestmentType::H4, 30), 280);
        assert_eq!(bar_budget(InvestmentType::D1, 30), 200); // floor
        assert_eq!(bar_budget(InvestmentType::M60, 365), 1000); // ceiling
    }

    #[test]
    fn too_few_candles_is_an_error() {
        let candles = make_candles(&rising_closes(40));
        let sim = BacktestSimulator::new();
        let err = sim
            .run("BTCUSDT", &candles, "default", InvestmentType::H4, 30)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientData { .. }));
    }

    #[test]
    fn unknown_pattern_is_rejected() {
        let candles = make_candles(&rising_closes(300));
        let sim = BacktestSimulator::new();
        let err = sim
            .run("BTCUSDT", &candles, "moonshot", InvestmentType::H4, 30)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidPattern(_)));
    }

    #[test]
    fn rally_produces_winning_bull_trades() {
        let candles = make_candles(&rising_closes(400));
        let sim = BacktestSimulator::new();
        let report = sim
            .run("BTCUSDT", &candles, "bull_market", InvestmentType::H4, 30)
            .unwrap();
        assert!(report.total_trades > 0);
        assert!(report.win_rate > 50.0);
        assert!(report.tp1_hits > 0);
        assert!(report.reason.is_none());
    }

    #[test]
    fn flat_market_reports_zero_trades_with_reason() {
        // Flat closes keep the fast EMA equal to the slow EMA, so the
        // default rule (fast strictly above slow) never fires.
        let candles = make_candles(&vec![100.0; 300]);
        let sim = BacktestSimulator::new();
        let report = sim
            .run("BTCUSDT", &candles, "default", InvestmentType::H4, 30)
            .unwrap();
        assert_eq!(report.total_trades, 0);
        assert!(report.reason.is_some());
    }

    #[test]
    fn backtest_is_deterministic() {
        let candles = make_candles(
            &(0..400)
                .map(|i| 100.0 + (i as f64 * 0.15).sin() * 6.0 + i as f64 * 0.05)
                .collect::<Vec<_>>(),
        );
        let sim = BacktestSimulator::new();
        let a = sim
            .run("BTCUSDT", &candles, "default", InvestmentType::M60, 30)
            .unwrap();
        let b = sim
            .run("BTCUSDT", &candles, "default", InvestmentType::M60, 30)
            .unwrap();
        assert_eq!(a.total_trades, b.total_trades);
        assert_eq!(a.total_pnl, b.total_pnl);
        assert_eq!(a.performance_score, b.performance_score);
    }

    #[test]
    fn same_bar_tp1_beats_stop() {
        // One entry bar followed by a huge-range bar covering both levels.
        let mut candles = make_candles(&rising_closes(60));
        let entry_close = candles[58].close;
        let last = candles.last_mut().unwrap();
        last.high = entry_close * 1.5;
        last.low = entry_close * 0.5;

        let signal = EntrySignal {
            index: 58,
            entry_price: entry_close,
            tp1: entry_close * 1.02,
            tp2: entry_close * 1.08,
            stop_loss: entry_close * 0.98,
        };
        let trade = simulate_trade(&signal, &candles, 48);
        assert_eq!(trade.exit_reason, ExitReason::Tp1);
        assert!(trade.pnl_percent > 0.0);
    }

    #[test]
    fn timeout_exits_at_window_close()  {
        let candles = make_candles(&vec![100.0; 120]);
        let signal = EntrySignal {
            index: 60,
            entry_price: 100.0,
            tp1: 150.0,
            tp2: 200.0,
            stop_loss: 50.0,
        };
        let trade = simulate_trade(&signal, &candles, 30);
        assert_eq!(trade.exit_reason, ExitReason::Timeout);
        assert_eq!(trade.exit_price, 100.0);
        assert_eq!(trade.entry_index, 60);
    }

    #[test]
    fn breakout_rule_needs_a_range_break() {
        // Long consolidation then a surge: breakout entries only in the surge.
        let mut closes = vec![100.0; 250];
        for (offset, close) in closes.iter_mut().enumerate().skip(200) {
            *close = 100.0 * 1.04_f64.powi((offset - 199) as i32);
        }
        let candles = make_candles(&closes);
        let sim = BacktestSimulator::new();
        let report = sim
            .run("BTCUSDT", &candles, "breakout", InvestmentType::H4, 30)
            .unwrap();
        assert!(report.total_trades > 0);
        for trade in &report.recent_trades {
            assert!(trade.entry_index >= 200);
        }
    }
}
