//! Property tests for engine invariants.
//!
//! Uses proptest to verify:
//! 1. Probability bounds — success probability always lands in [0, 0.95]
//! 2. Bracket ordering — every BUY has sl < entry < tp1 < tp2 and R:R >= 1.5
//! 3. Tracker FIFO — per-symbol history never exceeds the cap
//! 4. Status monotonicity — resolved predictions never revert to pending
//! 5. Backtest accounting — trade counts and exit tallies stay consistent

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use spotlab_core::tracker::MAX_TRACKED;
use spotlab_core::{
    bar_budget, Analyzer, BacktestSimulator, Candle, InvestmentType, PredictionStatus,
    PredictionTracker, SignalType, TimeframeData,
};

// ── Strategies (proptest) ────────────────────────────────────────────

/// Per-bar log-ish returns small enough to keep prices positive.
fn arb_returns(len: impl Into<prop::collection::SizeRange>) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-0.03..0.03_f64, len)
}

fn candles_from_returns(returns: &[f64]) -> Vec<Candle> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut close = 100.0;
    returns
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let open = close;
            close *= 1.0 + r;
            Candle {
                timestamp: start + Duration::hours(i as i64),
                open,
                high: open.max(close) * 1.003,
                low: open.min(close) * 0.997,
                close,
                volume: 1000.0 + (i % 7) as f64 * 150.0,
            }
        })
        .collect()
}

fn data_from_returns(returns: &[f64], investment_type: InvestmentType) -> TimeframeData {
    let candles = candles_from_returns(returns);
    let mut data = TimeframeData::new();
    data.insert(investment_type.main_timeframe(), candles.clone());
    for tf in investment_type.analysis_timeframes() {
        data.insert(tf, candles.clone());
    }
    data
}

// ── 1 & 2. Probability Bounds + Bracket Ordering ─────────────────────

proptest! {
    /// Any candle history that clears the warm-up bar yields a probability
    /// within [0, 0.95], regardless of how erratic the walk is.
    #[test]
    fn probability_always_within_bounds(returns in arb_returns(60..200)) {
        let data = data_from_returns(&returns, InvestmentType::H4);
        let result = Analyzer::new()
            .analyze("BTCUSDT", &data, InvestmentType::H4)
            .unwrap();
        prop_assert!(result.success_probability >= 0.0);
        prop_assert!(result.success_probability <= 0.95);
        prop_assert!(result.buy_score >= 0.0);
        prop_assert!(result.sell_score >= 0.0);
    }

    /// Every BUY carries a tradeable bracket: stop below entry, targets
    /// above it in order, and at least 1.5 reward per unit of risk.
    #[test]
    fn buy_brackets_are_ordered(returns in arb_returns(60..200)) {
        let data = data_from_returns(&returns, InvestmentType::M60);
        let result = Analyzer::new()
            .analyze("BTCUSDT", &data, InvestmentType::M60)
            .unwrap();
        match result.signal_type {
            SignalType::Buy => {
                prop_assert!(result.stop_loss < result.entry_price);
                prop_assert!(result.entry_price < result.tp1);
                prop_assert!(result.tp1 < result.tp2);
                prop_assert!(result.risk_reward >= 1.5 - 1e-9);
            }
            SignalType::Wait => {
                prop_assert_eq!(result.risk_reward, 0.0);
            }
        }
    }
}

// ── 3. Tracker FIFO ──────────────────────────────────────────────────

proptest! {
    /// However many predictions are issued, the per-symbol history holds at
    /// most the cap, and what survives is the most recent tail.
    #[test]
    fn tracker_history_is_capped(count in 1..130_usize) {
        let returns = vec![0.004; 80];
        let data = data_from_returns(&returns, InvestmentType::H4);
        let result = Analyzer::new()
            .analyze("BTCUSDT", &data, InvestmentType::H4)
            .unwrap();

        let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let mut tracker = PredictionTracker::new();
        for i in 0..count {
            tracker.add_prediction("BTCUSDT", &result, t0 + Duration::minutes(i as i64));
        }

        prop_assert_eq!(tracker.tracked_count("BTCUSDT"), count.min(MAX_TRACKED));
        let history = tracker.history("BTCUSDT");
        prop_assert!(history.windows(2).all(|w| w[0].issued_at <= w[1].issued_at));
        // The newest issuance always survives eviction.
        prop_assert_eq!(
            history.last().unwrap().issued_at,
            t0 + Duration::minutes(count as i64 - 1)
        );
    }
}

// ── 4. Status Monotonicity ───────────────────────────────────────────

proptest! {
    /// Once a prediction leaves Pending it never comes back, no matter what
    /// prices are observed afterwards.
    #[test]
    fn resolved_predictions_stay_resolved(
        prices in prop::collection::vec(50.0..200.0_f64, 2..20),
    ) {
        let returns = vec![0.004; 80];
        let data = data_from_returns(&returns, InvestmentType::H4);
        let result = Analyzer::new()
            .analyze("BTCUSDT", &data, InvestmentType::H4)
            .unwrap();

        let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let mut tracker = PredictionTracker::new();
        tracker.add_prediction("BTCUSDT", &result, t0);

        let mut seen_terminal: Option<PredictionStatus> = None;
        for (i, price) in prices.iter().enumerate() {
            tracker.check_predictions("BTCUSDT", *price, t0 + Duration::hours(i as i64 + 1));
            let status = tracker.history("BTCUSDT")[0].status;
            if let Some(terminal) = seen_terminal {
                prop_assert_eq!(status, terminal);
            } else if status.is_terminal() {
                seen_terminal = Some(status);
            }
        }
    }
}

// ── 5. Backtest Accounting ───────────────────────────────────────────

proptest! {
    /// The bar budget stays inside its clamp for any lookback.
    #[test]
    fn bar_budget_is_bounded(days in 1..3650_u32) {
        for it in [InvestmentType::M60, InvestmentType::H4, InvestmentType::D1] {
            let budget = bar_budget(it, days);
            prop_assert!((200..=1000).contains(&budget));
        }
    }

    /// Win/loss and exit-reason tallies always add up to the trade count,
    /// and re-running the same input reproduces the same report.
    #[test]
    fn backtest_tallies_are_consistent(
        returns in arb_returns(250..400),
        days in 5..60_u32,
    ) {
        let candles = candles_from_returns(&returns);
        let sim = BacktestSimulator::new();
        let report = sim
            .run("BTCUSDT", &candles, "default", InvestmentType::H4, days)
            .unwrap();

        prop_assert_eq!(
            report.winning_trades + report.losing_trades,
            report.total_trades
        );
        prop_assert_eq!(
            report.tp1_hits + report.sl_hits + report.timeouts,
            report.total_trades
        );
        prop_assert!(report.win_rate >= 0.0 && report.win_rate <= 100.0);
        prop_assert!(report.performance_score >= 0.0 && report.performance_score <= 100.0);
        prop_assert!(report.recent_trades.len() <= 10);
        prop_assert_eq!(report.reason.is_some(), report.total_trades == 0);

        let again = sim
            .run("BTCUSDT", &candles, "default", InvestmentType::H4, days)
            .unwrap();
        prop_assert_eq!(report.total_trades, again.total_trades);
        prop_assert_eq!(report.total_pnl, again.total_pnl);
    }
}
