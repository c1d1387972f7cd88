//! Criterion benchmarks for the analysis hot paths.
//!
//! Benchmarks:
//! 1. Indicator frame computation (the full batch over one series)
//! 2. Signal scoring over a precomputed frame
//! 3. Full analysis (frame + score + trend + probability + targets)
//! 4. Backtest replay over a candle history

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use spotlab_core::{
    Analyzer, BacktestSimulator, Candle, IndicatorFrame, InvestmentType, SignalScorer,
    TimeframeData,
};

fn make_candles(n: usize) -> Vec<Candle> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0 + i as f64 * 0.02;
            let open = close - 0.3;
            Candle {
                timestamp: start + Duration::hours(i as i64),
                open,
                high: close + 1.5,
                low: open - 1.5,
                close,
                volume: 1000.0 + (i % 11) as f64 * 120.0,
            }
        })
        .collect()
}

fn make_data(n: usize, investment_type: InvestmentType) -> TimeframeData {
    let candles = make_candles(n);
    let mut data = TimeframeData::new();
    data.insert(investment_type.main_timeframe(), candles.clone());
    for tf in investment_type.analysis_timeframes() {
        data.insert(tf, candles.clone());
    }
    data
}

fn bench_indicator_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("indicator_frame");
    for &n in &[100, 500, 1000] {
        let candles = make_candles(n);
        group.bench_with_input(BenchmarkId::new("compute", n), &n, |b, _| {
            b.iter(|| IndicatorFrame::compute(black_box(&candles)).unwrap());
        });
    }
    group.finish();
}

fn bench_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("signal_scoring");
    for &n in &[100, 500, 1000] {
        let candles = make_candles(n);
        let frame = IndicatorFrame::compute(&candles).unwrap();
        let scorer = SignalScorer::new();
        group.bench_with_input(BenchmarkId::new("score", n), &n, |b, _| {
            b.iter(|| scorer.score(black_box(&candles), black_box(&frame)));
        });
    }
    group.finish();
}

fn bench_full_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_analysis");
    for &n in &[100, 500, 1000] {
        let data = make_data(n, InvestmentType::H4);
        let analyzer = Analyzer::new();
        group.bench_with_input(BenchmarkId::new("analyze", n), &n, |b, _| {
            b.iter(|| {
                analyzer
                    .analyze(black_box("BTCUSDT"), black_box(&data), InvestmentType::H4)
                    .unwrap()
            });
        });
    }
    group.finish();
}

fn bench_backtest(c: &mut Criterion) {
    let mut group = c.benchmark_group("backtest");
    let candles = make_candles(1000);
    let sim = BacktestSimulator::new();
    for pattern in ["default", "bull_market", "breakout"] {
        group.bench_function(pattern, |b| {
            b.iter(|| {
                sim.run(
                    black_box("BTCUSDT"),
                    black_box(&candles),
                    pattern,
                    InvestmentType::H4,
                    90,
                )
                .unwrap()
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_indicator_frame,
    bench_scoring,
    bench_full_analysis,
    bench_backtest,
);
criterion_main!(benches);
