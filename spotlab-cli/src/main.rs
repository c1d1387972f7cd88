//! spotlab CLI — run analysis and backtests over candle CSV files.
//!
//! Commands:
//! - `analyze` — score a symbol from per-timeframe candle CSVs
//! - `backtest` — replay a market pattern's entry rule over history
//! - `patterns` — list the available market patterns
//!
//! Candle CSVs carry `timestamp,open,high,low,close,volume` rows with
//! millisecond UTC timestamps, ascending by time.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use spotlab_core::{
    Analyzer, BacktestReport, BacktestSimulator, Candle, InvestmentType, PatternLibrary,
    SignalResult, TimeframeData,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "spotlab",
    about = "spotlab CLI — spot signal scoring and pattern backtesting"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a symbol from per-timeframe candle CSVs.
    Analyze {
        /// Symbol to analyze (e.g. BTCUSDT).
        symbol: String,

        /// Directory containing <SYMBOL>_<TIMEFRAME>.csv files.
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Investment type: 60m, 4h, or 1d.
        #[arg(long, default_value = "4h")]
        investment_type: InvestmentType,

        /// Emit the full result as JSON instead of a summary.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Replay a market pattern's entry rule over a candle history.
    Backtest {
        /// Symbol label for the report.
        symbol: String,

        /// Candle CSV for the investment type's bar interval.
        #[arg(long)]
        candles: PathBuf,

        /// Market pattern name (see `patterns`).
        #[arg(long, default_value = "default")]
        pattern: String,

        /// Investment type: 60m, 4h, or 1d.
        #[arg(long, default_value = "4h")]
        investment_type: InvestmentType,

        /// Days of history to replay.
        #[arg(long, default_value_t = 30)]
        days_back: u32,

        /// TOML file with pattern profile overrides.
        #[arg(long)]
        patterns_file: Option<PathBuf>,

        /// Emit the full report as JSON instead of a summary.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List the available market patterns.
    Patterns {
        /// TOML file with pattern profile overrides.
        #[arg(long)]
        patterns_file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            symbol,
            data_dir,
            investment_type,
            json,
        } => run_analyze(&symbol, &data_dir, investment_type, json),
        Commands::Backtest {
            symbol,
            candles,
            pattern,
            investment_type,
            days_back,
            patterns_file,
            json,
        } => run_backtest(
            &symbol,
            &candles,
            &pattern,
            investment_type,
            days_back,
            patterns_file.as_deref(),
            json,
        ),
        Commands::Patterns { patterns_file } => run_patterns(patterns_file.as_deref()),
    }
}

#[derive(Debug, Deserialize)]
struct CandleRow {
    timestamp: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

fn load_candles(path: &Path) -> Result<Vec<Candle>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening candle file {}", path.display()))?;

    let mut candles = Vec::new();
    for row in reader.deserialize() {
        let row: CandleRow = row.with_context(|| format!("parsing {}", path.display()))?;
        let timestamp = DateTime::<Utc>::from_timestamp_millis(row.timestamp)
            .with_context(|| format!("timestamp {} out of range", row.timestamp))?;
        let candle = Candle {
            timestamp,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
        };
        if !candle.is_sane() {
            bail!(
                "{}: malformed candle at {} (o={} h={} l={} c={})",
                path.display(),
                timestamp,
                row.open,
                row.high,
                row.low,
                row.close
            );
        }
        candles.push(candle);
    }

    if candles.windows(2).any(|w| w[0].timestamp >= w[1].timestamp) {
        bail!("{}: candles must be ascending by timestamp", path.display());
    }
    Ok(candles)
}

fn run_analyze(
    symbol: &str,
    data_dir: &Path,
    investment_type: InvestmentType,
    json: bool,
) -> Result<()> {
    let mut data = TimeframeData::new();
    let mut timeframes = investment_type.analysis_timeframes().to_vec();
    let main = investment_type.main_timeframe();
    if !timeframes.contains(&main) {
        timeframes.push(main);
    }

    for timeframe in timeframes {
        let path = data_dir.join(format!("{symbol}_{timeframe}.csv"));
        if !path.exists() {
            if timeframe == main {
                bail!("missing main timeframe data: {}", path.display());
            }
            continue; // auxiliary timeframes are optional
        }
        data.insert(timeframe, load_candles(&path)?);
    }

    let result = Analyzer::new().analyze(symbol, &data, investment_type)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_signal_summary(&result);
    }
    Ok(())
}

fn run_backtest(
    symbol: &str,
    candles_path: &Path,
    pattern: &str,
    investment_type: InvestmentType,
    days_back: u32,
    patterns_file: Option<&Path>,
    json: bool,
) -> Result<()> {
    let candles = load_candles(candles_path)?;
    let simulator = BacktestSimulator::with_library(load_library(patterns_file)?);
    let report = simulator.run(symbol, &candles, pattern, investment_type, days_back)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_backtest_summary(&report);
    }
    Ok(())
}

fn run_patterns(patterns_file: Option<&Path>) -> Result<()> {
    let library = load_library(patterns_file)?;
    for name in library.names() {
        let profile = library.get(name)?;
        println!("{name:<16} {} — {}", profile.name, profile.description);
    }
    Ok(())
}

fn load_library(patterns_file: Option<&Path>) -> Result<PatternLibrary> {
    let mut library = PatternLibrary::builtin();
    if let Some(path) = patterns_file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading pattern overrides {}", path.display()))?;
        library
            .apply_overrides(&text)
            .with_context(|| format!("applying pattern overrides {}", path.display()))?;
    }
    Ok(library)
}

fn print_signal_summary(result: &SignalResult) {
    println!();
    println!("=== {} ({}) ===", result.symbol, result.investment_type);
    println!("Timeframe:      {}", result.timeframe);
    println!("Hold:           {}", result.investment_type.hold_duration());
    println!("Signal:         {}", result.signal_type);
    println!("Trend:          {}", result.trend_strength);
    println!(
        "Scores:         buy {:.2} / sell {:.2}",
        result.buy_score, result.sell_score
    );
    println!(
        "Probability:    {:.0}% ({:?})",
        result.success_probability * 100.0,
        result.entry_quality
    );
    println!("Entry:          {:.6}", result.entry_price);
    println!("TP1 / TP2:      {:.6} / {:.6}", result.tp1, result.tp2);
    println!("Stop loss:      {:.6}", result.stop_loss);
    println!("Risk:reward:    {:.2}", result.risk_reward);
    println!("RSI / ATR:      {:.1} / {:.6}", result.rsi, result.atr);
    let triggers: Vec<String> = result.triggers.iter().map(|t| format!("{t:?}")).collect();
    println!("Triggers:       {}", triggers.join(", "));
    println!();
}

fn print_backtest_summary(report: &BacktestReport) {
    println!();
    println!(
        "=== Backtest {} ({}, pattern '{}', {} days) ===",
        report.symbol, report.investment_type, report.pattern_name, report.days_back
    );
    if let Some(reason) = &report.reason {
        println!("No trades: {reason}");
        println!();
        return;
    }
    println!(
        "Trades:         {} (win {} / lose {})",
        report.total_trades, report.winning_trades, report.losing_trades
    );
    println!("Win rate:       {:.1}%", report.win_rate);
    println!("Total PnL:      {:+.2}%", report.total_pnl);
    println!(
        "Avg win/loss:   {:+.2}% / {:+.2}%",
        report.avg_win, report.avg_loss
    );
    println!("Profit factor:  {:.2}", report.profit_factor);
    println!(
        "Exits:          TP1 {} / SL {} / timeout {}",
        report.tp1_hits, report.sl_hits, report.timeouts
    );
    println!("Performance:    {:.2}/100", report.performance_score);
    if let (Some(best), Some(worst)) = (&report.best_trade, &report.worst_trade) {
        println!(
            "Best / worst:   {:+.2}% / {:+.2}%",
            best.pnl_percent, worst.pnl_percent
        );
    }
    println!();
}
