//! Configuration validation.
//!
//! Every field is checked up front, before any price data is read, so an
//! unknown strategy tag or a bad window fails at startup rather than midway
//! through a sweep. The `read_*` helpers are shared with [`Settings`] so the
//! validated value and the used value can never disagree.
//!
//! [`Settings`]: crate::domain::settings::Settings

use crate::domain::error::SignalbenchError;
use crate::domain::indicator::{BollingerParams, MfiParams, RsiParams, StochasticParams};
use crate::domain::indicator::roc;
use crate::domain::strategy::{default_sweep, parse_kinds, parse_sweep, Parameterization, StrategyKind};
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_INTERVAL: &str = "1d";
pub const DEFAULT_DATA_DIR: &str = "./data";

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), SignalbenchError> {
    read_fund(config)?;
    read_ticker(config)?;
    read_dates(config)?;
    read_interval(config)?;
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), SignalbenchError> {
    read_kinds(config)?;
    read_sweep(config)?;
    read_parallel(config)?;
    Ok(())
}

pub fn validate_oscillator_config(config: &dyn ConfigPort) -> Result<(), SignalbenchError> {
    read_rsi(config)?;
    read_mfi(config)?;
    read_stochastic(config)?;
    read_roc_period(config)?;
    read_bollinger(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> SignalbenchError {
    SignalbenchError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

/// Trimmed value, treating an empty value as absent.
fn optional(config: &dyn ConfigPort, section: &str, key: &str) -> Option<String> {
    config
        .get_string(section, key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn required(config: &dyn ConfigPort, section: &str, key: &str) -> Result<String, SignalbenchError> {
    optional(config, section, key).ok_or_else(|| SignalbenchError::ConfigMissing {
        section: section.to_string(),
        key: key.to_string(),
    })
}

/// Parses an optional value, failing on anything present but malformed.
fn parse_optional<T: FromStr>(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<T>, SignalbenchError> {
    optional(config, section, key)
        .map(|s| {
            s.parse::<T>()
                .map_err(|_| invalid(section, key, format!("cannot parse '{s}'")))
        })
        .transpose()
}

fn positive_period(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: usize,
) -> Result<usize, SignalbenchError> {
    let period = parse_optional::<usize>(config, section, key)?.unwrap_or(default);
    if period == 0 {
        return Err(invalid(section, key, format!("{key} must be positive")));
    }
    Ok(period)
}

/// Reads `<prefix>_upper` / `<prefix>_lower` and checks `0 <= lower < upper <= 100`.
fn bands(
    config: &dyn ConfigPort,
    prefix: &str,
    default_upper: f64,
    default_lower: f64,
) -> Result<(f64, f64), SignalbenchError> {
    let upper_key = format!("{prefix}_upper");
    let lower_key = format!("{prefix}_lower");
    let upper = parse_optional::<f64>(config, "oscillators", &upper_key)?.unwrap_or(default_upper);
    let lower = parse_optional::<f64>(config, "oscillators", &lower_key)?.unwrap_or(default_lower);

    for (key, value) in [(&upper_key, upper), (&lower_key, lower)] {
        if !(0.0..=100.0).contains(&value) {
            return Err(invalid("oscillators", key, "band must be between 0 and 100"));
        }
    }
    if lower >= upper {
        return Err(invalid(
            "oscillators",
            &lower_key,
            format!("{lower_key} must be below {upper_key}"),
        ));
    }
    Ok((upper, lower))
}

pub fn read_fund(config: &dyn ConfigPort) -> Result<f64, SignalbenchError> {
    let raw = required(config, "backtest", "fund")?;
    let fund: f64 = raw
        .parse()
        .map_err(|_| invalid("backtest", "fund", format!("cannot parse '{raw}'")))?;
    if !fund.is_finite() || fund <= 0.0 {
        return Err(invalid("backtest", "fund", "fund must be positive"));
    }
    Ok(fund)
}

pub fn read_ticker(config: &dyn ConfigPort) -> Result<String, SignalbenchError> {
    required(config, "backtest", "ticker")
}

pub fn read_dates(config: &dyn ConfigPort) -> Result<(NaiveDate, NaiveDate), SignalbenchError> {
    let start = parse_date(config, "start_date")?;
    let end = parse_date(config, "end_date")?;
    if start >= end {
        return Err(invalid(
            "backtest",
            "start_date",
            "start_date must be before end_date",
        ));
    }
    Ok((start, end))
}

fn parse_date(config: &dyn ConfigPort, key: &str) -> Result<NaiveDate, SignalbenchError> {
    let raw = required(config, "backtest", key)?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map_err(|_| invalid("backtest", key, format!("invalid {key} format, expected YYYY-MM-DD")))
}

pub fn read_interval(config: &dyn ConfigPort) -> Result<String, SignalbenchError> {
    let interval =
        optional(config, "backtest", "interval").unwrap_or_else(|| DEFAULT_INTERVAL.to_string());
    if interval.chars().any(|c| !c.is_ascii_alphanumeric()) {
        return Err(invalid(
            "backtest",
            "interval",
            "interval must be alphanumeric (e.g. 1d, 1wk)",
        ));
    }
    Ok(interval)
}

pub fn read_kinds(config: &dyn ConfigPort) -> Result<Vec<StrategyKind>, SignalbenchError> {
    match optional(config, "strategies", "kinds") {
        None => Ok(StrategyKind::ALL.to_vec()),
        Some(raw) => {
            let kinds = parse_kinds(&raw)?;
            if kinds.is_empty() {
                return Err(invalid("strategies", "kinds", "at least one strategy is required"));
            }
            Ok(kinds)
        }
    }
}

pub fn read_sweep(config: &dyn ConfigPort) -> Result<Vec<Parameterization>, SignalbenchError> {
    match optional(config, "strategies", "sweep") {
        None => Ok(default_sweep()),
        Some(raw) => {
            let sweep = parse_sweep(&raw)?;
            if sweep.is_empty() {
                return Err(invalid(
                    "strategies",
                    "sweep",
                    "at least one parameterization is required",
                ));
            }
            Ok(sweep)
        }
    }
}

pub fn read_parallel(config: &dyn ConfigPort) -> Result<bool, SignalbenchError> {
    match optional(config, "strategies", "parallel") {
        None => Ok(false),
        Some(raw) => match raw.to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(invalid(
                "strategies",
                "parallel",
                format!("expected a boolean, got '{raw}'"),
            )),
        },
    }
}

pub fn read_rsi(config: &dyn ConfigPort) -> Result<RsiParams, SignalbenchError> {
    let defaults = RsiParams::default();
    let period = positive_period(config, "oscillators", "rsi_period", defaults.period)?;
    let (upper, lower) = bands(config, "rsi", defaults.upper, defaults.lower)?;
    Ok(RsiParams {
        period,
        upper,
        lower,
    })
}

pub fn read_mfi(config: &dyn ConfigPort) -> Result<MfiParams, SignalbenchError> {
    let defaults = MfiParams::default();
    let period = positive_period(config, "oscillators", "mfi_period", defaults.period)?;
    let (upper, lower) = bands(config, "mfi", defaults.upper, defaults.lower)?;
    Ok(MfiParams {
        period,
        upper,
        lower,
    })
}

pub fn read_stochastic(config: &dyn ConfigPort) -> Result<StochasticParams, SignalbenchError> {
    let defaults = StochasticParams::default();
    let period = positive_period(config, "oscillators", "stochastic_period", defaults.period)?;
    let (upper, lower) = bands(config, "stochastic", defaults.upper, defaults.lower)?;
    Ok(StochasticParams {
        period,
        upper,
        lower,
    })
}

pub fn read_roc_period(config: &dyn ConfigPort) -> Result<usize, SignalbenchError> {
    positive_period(config, "oscillators", "roc_period", roc::DEFAULT_PERIOD)
}

pub fn read_bollinger(config: &dyn ConfigPort) -> Result<BollingerParams, SignalbenchError> {
    let defaults = BollingerParams::default();
    let period = positive_period(config, "oscillators", "bollinger_period", defaults.period)?;
    if period < 2 {
        return Err(invalid(
            "oscillators",
            "bollinger_period",
            "bollinger_period must be at least 2",
        ));
    }
    let k = parse_optional::<f64>(config, "oscillators", "bollinger_k")?.unwrap_or(defaults.k);
    if !k.is_finite() || k <= 0.0 {
        return Err(invalid("oscillators", "bollinger_k", "bollinger_k must be positive"));
    }
    Ok(BollingerParams { period, k })
}

pub fn read_data_dir(config: &dyn ConfigPort) -> PathBuf {
    optional(config, "data", "dir")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}
