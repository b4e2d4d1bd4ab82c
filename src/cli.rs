//! CLI definition and dispatch.
//!
//! Results go to stdout; progress and diagnostics go through `tracing`.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn};

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::{
    validate_backtest_config, validate_oscillator_config, validate_strategy_config,
};
use crate::domain::error::SignalbenchError;
use crate::domain::indicator::{
    calculate_bollinger, calculate_mfi, calculate_roc, calculate_rsi, calculate_stochastic,
    latest_movement, OscillatorKind,
};
use crate::domain::ohlcv::PriceBar;
use crate::domain::report::{discrete_signals, latest_regime, latest_signal, LatestRegime};
use crate::domain::settings::{OscillatorSettings, Settings};
use crate::domain::strategy::{SignalSeries, StrategyKind};
use crate::domain::sweep::SweepResult;
use crate::ports::data_port::DataPort;

#[derive(Parser, Debug)]
#[command(
    name = "signalbench",
    about = "Technical indicator signal generator and backtester"
)]
pub struct Cli {
    /// Log every sweep evaluation
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sweep each configured strategy and report the best parameterization
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        /// Price CSV directory, overriding [data] dir
        #[arg(long)]
        data: Option<PathBuf>,
        /// Ticker, overriding [backtest] ticker
        #[arg(long)]
        ticker: Option<String>,
    },
    /// Report signals and oscillator regimes at default parameters
    Signals {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        data: Option<PathBuf>,
        #[arg(long)]
        ticker: Option<String>,
        /// List every buy/sell event instead of only the latest
        #[arg(long)]
        all: bool,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            data,
            ticker,
        } => run_backtest(&config, data, ticker.as_deref()),
        Command::Signals {
            config,
            data,
            ticker,
            all,
        } => run_signals(&config, data, ticker.as_deref(), all),
        Command::Validate { config } => run_validate(&config),
    }
}

fn fail(err: SignalbenchError) -> ExitCode {
    error!("{err}");
    (&err).into()
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, SignalbenchError> {
    info!(path = %path.display(), "loading config");
    FileConfigAdapter::from_file(path)
}

/// Loads, validates and resolves a config file, applying CLI overrides.
pub fn load_settings(
    path: &Path,
    data_override: Option<PathBuf>,
    ticker_override: Option<&str>,
) -> Result<Settings, SignalbenchError> {
    let adapter = load_config(path)?;
    validate_backtest_config(&adapter)?;
    validate_strategy_config(&adapter)?;
    validate_oscillator_config(&adapter)?;

    let mut settings = Settings::from_config(&adapter)?;
    if let Some(dir) = data_override {
        settings.data_dir = dir;
    }
    if let Some(ticker) = ticker_override.map(str::trim).filter(|t| !t.is_empty()) {
        settings.ticker = ticker.to_string();
    }
    Ok(settings)
}

pub fn fetch_series(
    settings: &Settings,
    data_port: &dyn DataPort,
) -> Result<Vec<PriceBar>, SignalbenchError> {
    let bars = data_port.fetch_prices(
        &settings.ticker,
        settings.start_date,
        settings.end_date,
        &settings.interval,
    )?;
    info!(
        ticker = %settings.ticker,
        rows = bars.len(),
        start = %settings.start_date,
        end = %settings.end_date,
        "price series loaded"
    );
    Ok(bars)
}

/// Best parameterization of one strategy kind plus its latest signal.
#[derive(Debug)]
pub struct StrategyOutcome {
    pub kind: StrategyKind,
    pub sweep: SweepResult<SignalSeries>,
    pub latest_signal: Option<String>,
}

pub fn evaluate_strategies(
    settings: &Settings,
    bars: &[PriceBar],
) -> Result<Vec<StrategyOutcome>, SignalbenchError> {
    let sweeper = settings.sweeper();
    settings
        .kinds
        .iter()
        .map(|&kind| {
            let sweep = sweeper.sweep(kind, bars, &settings.sweep)?;
            let latest_signal = latest_signal(&sweep.best_series.rows()).ok();
            Ok(StrategyOutcome {
                kind,
                sweep,
                latest_signal,
            })
        })
        .collect()
}

pub fn strategy_lines(outcome: &StrategyOutcome) -> Vec<String> {
    vec![
        format!(
            "Best {}: ${:.2} {}",
            outcome.kind, outcome.sweep.final_fund, outcome.sweep.best_params
        ),
        format!(
            "  Latest: {}",
            outcome.latest_signal.as_deref().unwrap_or("no signals")
        ),
    ]
}

fn oscillator_regime(kind: OscillatorKind, bars: &[PriceBar], osc: &OscillatorSettings) -> LatestRegime {
    match kind {
        OscillatorKind::Rsi => latest_regime(&calculate_rsi(bars, &osc.rsi)),
        OscillatorKind::Mfi => latest_regime(&calculate_mfi(bars, &osc.mfi)),
        OscillatorKind::Stochastic => latest_regime(&calculate_stochastic(bars, &osc.stochastic)),
    }
}

/// Oscillator regimes, latest ROC trend and latest Bollinger bands.
pub fn oscillator_lines(bars: &[PriceBar], osc: &OscillatorSettings) -> Vec<String> {
    let mut lines: Vec<String> = OscillatorKind::ALL
        .iter()
        .map(|&kind| format!("{}: {}", kind, oscillator_regime(kind, bars, osc)))
        .collect();

    let trend = latest_movement(&calculate_roc(bars, osc.roc_period))
        .map_or_else(|| "undefined".to_string(), |m| m.to_string());
    lines.push(format!("Rate of Change ({}): {}", osc.roc_period, trend));

    let bands = calculate_bollinger(bars, &osc.bollinger);
    let latest = bands.last().and_then(|row| {
        Some(format!(
            "upper {:.2}, middle {:.2}, lower {:.2} on {}",
            row.upper?, row.middle?, row.lower?, row.date
        ))
    });
    lines.push(format!(
        "Bollinger Bands ({}, {}): {}",
        osc.bollinger.period,
        osc.bollinger.k,
        latest.unwrap_or_else(|| "insufficient history".to_string())
    ));
    lines
}

/// Signal report for each kind at its default parameterization.
pub fn signal_lines(settings: &Settings, bars: &[PriceBar], all: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for &kind in &settings.kinds {
        let params = kind.default_params();
        let series = kind.evaluate(bars, &params);
        let rows = series.rows();
        lines.push(format!("{} {}:", kind, params));
        if all {
            let events = discrete_signals(&rows);
            if events.is_empty() {
                lines.push("  no signals".to_string());
            }
            lines.extend(events.iter().map(|e| format!("  {e}")));
        } else {
            match latest_signal(&rows) {
                Ok(latest) => lines.push(format!("  {latest}")),
                Err(e) => lines.push(format!("  {e}")),
            }
        }
    }
    lines
}

fn run_backtest(config_path: &Path, data: Option<PathBuf>, ticker: Option<&str>) -> ExitCode {
    let settings = match load_settings(config_path, data, ticker) {
        Ok(s) => s,
        Err(e) => return fail(e),
    };
    let adapter = CsvAdapter::new(settings.data_dir.clone());
    let bars = match fetch_series(&settings, &adapter) {
        Ok(b) => b,
        Err(e) => return fail(e),
    };

    info!(
        kinds = settings.kinds.len(),
        parameterizations = settings.sweep.len(),
        parallel = settings.parallel,
        "running sweeps"
    );
    let outcomes = match evaluate_strategies(&settings, &bars) {
        Ok(o) => o,
        Err(e) => return fail(e),
    };

    println!(
        "{} {} to {} ({} rows), fund ${:.2}",
        settings.ticker,
        settings.start_date,
        settings.end_date,
        bars.len(),
        settings.fund
    );
    for outcome in &outcomes {
        if outcome.latest_signal.is_none() {
            warn!(strategy = %outcome.kind, "best parameterization produced no signals");
        }
        for line in strategy_lines(outcome) {
            println!("{line}");
        }
    }
    for line in oscillator_lines(&bars, &settings.oscillators) {
        println!("{line}");
    }
    ExitCode::SUCCESS
}

fn run_signals(
    config_path: &Path,
    data: Option<PathBuf>,
    ticker: Option<&str>,
    all: bool,
) -> ExitCode {
    let settings = match load_settings(config_path, data, ticker) {
        Ok(s) => s,
        Err(e) => return fail(e),
    };
    let adapter = CsvAdapter::new(settings.data_dir.clone());
    let bars = match fetch_series(&settings, &adapter) {
        Ok(b) => b,
        Err(e) => return fail(e),
    };

    for line in signal_lines(&settings, &bars, all) {
        println!("{line}");
    }
    for line in oscillator_lines(&bars, &settings.oscillators) {
        println!("{line}");
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &Path) -> ExitCode {
    let settings = match load_settings(config_path, None, None) {
        Ok(s) => s,
        Err(e) => return fail(e),
    };

    println!("Configuration is valid");
    println!(
        "  {} {} to {} ({}), fund ${:.2}",
        settings.ticker, settings.start_date, settings.end_date, settings.interval, settings.fund
    );
    let kinds: Vec<String> = settings.kinds.iter().map(|k| k.to_string()).collect();
    println!("  strategies: {}", kinds.join(", "));
    let sweep: Vec<String> = settings.sweep.iter().map(|p| p.to_string()).collect();
    println!("  sweep: {}", sweep.join(", "));
    println!("  data: {}", settings.data_dir.display());
    ExitCode::SUCCESS
}
