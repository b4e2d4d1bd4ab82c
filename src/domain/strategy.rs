//! Crossover strategy kinds, their parameterizations and dispatch.

use crate::domain::backtest::Backtest;
use crate::domain::error::SignalbenchError;
use crate::domain::indicator::{
    calculate_ema, calculate_macd, calculate_sma, CrossoverRow, MacdRow,
};
use crate::domain::ohlcv::PriceBar;
use crate::domain::signal::SignalRow;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_MACD_SIGNAL: usize = 9;

/// Window lengths for one strategy evaluation.
///
/// Construction enforces `0 < short < long` and a non-zero signal window, so
/// an existing value is always meaningful for a crossover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Parameterization {
    short: usize,
    long: usize,
    signal: Option<usize>,
}

impl Parameterization {
    pub fn new(short: usize, long: usize) -> Result<Self, SignalbenchError> {
        Self::build(short, long, None)
    }

    pub fn with_signal(short: usize, long: usize, signal: usize) -> Result<Self, SignalbenchError> {
        Self::build(short, long, Some(signal))
    }

    fn build(short: usize, long: usize, signal: Option<usize>) -> Result<Self, SignalbenchError> {
        let candidate = Parameterization {
            short,
            long,
            signal,
        };
        let reason = if short == 0 {
            Some("short window must be positive")
        } else if short >= long {
            Some("short window must be less than long window")
        } else if signal == Some(0) {
            Some("signal window must be positive")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(SignalbenchError::InvalidParameterization {
                params: candidate.to_string(),
                reason: reason.to_string(),
            }),
            None => Ok(candidate),
        }
    }

    pub fn short(&self) -> usize {
        self.short
    }

    pub fn long(&self) -> usize {
        self.long
    }

    /// Signal-smoothing window, falling back to the MACD default.
    pub fn signal_or_default(&self) -> usize {
        self.signal.unwrap_or(DEFAULT_MACD_SIGNAL)
    }

    pub fn signal(&self) -> Option<usize> {
        self.signal
    }
}

impl fmt::Display for Parameterization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.signal {
            Some(signal) => write!(f, "({}, {}, {})", self.short, self.long, signal),
            None => write!(f, "({}, {})", self.short, self.long),
        }
    }
}

/// Parses `short:long` or `short:long:signal`.
impl FromStr for Parameterization {
    type Err = SignalbenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| SignalbenchError::InvalidParameterization {
            params: s.trim().to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<usize> = s
            .split(':')
            .map(|p| p.trim().parse::<usize>())
            .collect::<Result<_, _>>()
            .map_err(|_| invalid("expected non-negative integers"))?;

        match parts.as_slice() {
            [short, long] => Parameterization::new(*short, *long),
            [short, long, signal] => Parameterization::with_signal(*short, *long, *signal),
            _ => Err(invalid("expected short:long or short:long:signal")),
        }
    }
}

/// Parses a comma-separated list of parameterizations, keeping input order.
pub fn parse_sweep(s: &str) -> Result<Vec<Parameterization>, SignalbenchError> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(Parameterization::from_str)
        .collect()
}

/// The reference sweep: (3, 5) then (5, 10).
pub fn default_sweep() -> Vec<Parameterization> {
    vec![
        Parameterization {
            short: 3,
            long: 5,
            signal: None,
        },
        Parameterization {
            short: 5,
            long: 10,
            signal: None,
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Sma,
    Ema,
    Macd,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [StrategyKind::Sma, StrategyKind::Ema, StrategyKind::Macd];

    pub fn tag(self) -> &'static str {
        match self {
            StrategyKind::Sma => "sma",
            StrategyKind::Ema => "ema",
            StrategyKind::Macd => "macd",
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            StrategyKind::Sma => "SMA",
            StrategyKind::Ema => "EMA",
            StrategyKind::Macd => "MACD",
        }
    }

    /// Default windows for a single evaluation of this kind.
    pub fn default_params(self) -> Parameterization {
        match self {
            StrategyKind::Sma => Parameterization {
                short: 3,
                long: 5,
                signal: None,
            },
            StrategyKind::Ema => Parameterization {
                short: 5,
                long: 10,
                signal: None,
            },
            StrategyKind::Macd => Parameterization {
                short: 12,
                long: 26,
                signal: Some(DEFAULT_MACD_SIGNAL),
            },
        }
    }

    /// Runs this kind's indicator over `bars`.
    pub fn evaluate(self, bars: &[PriceBar], params: &Parameterization) -> SignalSeries {
        match self {
            StrategyKind::Sma => SignalSeries::Crossover(calculate_sma(bars, params)),
            StrategyKind::Ema => SignalSeries::Crossover(calculate_ema(bars, params)),
            StrategyKind::Macd => SignalSeries::Macd(calculate_macd(bars, params)),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Strategy", self.short_name())
    }
}

impl FromStr for StrategyKind {
    type Err = SignalbenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.tag() == tag)
            .ok_or_else(|| SignalbenchError::UnsupportedStrategy {
                name: s.trim().to_string(),
            })
    }
}

/// Parses a comma-separated list of strategy tags; any unknown tag is fatal.
pub fn parse_kinds(s: &str) -> Result<Vec<StrategyKind>, SignalbenchError> {
    s.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(StrategyKind::from_str)
        .collect()
}

/// A signal-annotated series produced by one of the crossover strategies.
#[derive(Debug, Clone, PartialEq)]
pub enum SignalSeries {
    Crossover(Vec<CrossoverRow>),
    Macd(Vec<MacdRow>),
}

impl SignalSeries {
    pub fn len(&self) -> usize {
        match self {
            SignalSeries::Crossover(rows) => rows.len(),
            SignalSeries::Macd(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rounded final fund after replaying this series through `backtest`.
    pub fn backtest(&self, backtest: &Backtest) -> f64 {
        match self {
            SignalSeries::Crossover(rows) => backtest.test(rows),
            SignalSeries::Macd(rows) => backtest.test(rows),
        }
    }

    /// The rows viewed through the signal interface.
    pub fn rows(&self) -> Vec<&dyn SignalRow> {
        match self {
            SignalSeries::Crossover(rows) => rows.iter().map(|r| r as &dyn SignalRow).collect(),
            SignalSeries::Macd(rows) => rows.iter().map(|r| r as &dyn SignalRow).collect(),
        }
    }
}
