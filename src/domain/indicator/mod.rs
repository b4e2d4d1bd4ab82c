//! Technical indicator implementations.
//!
//! Every indicator is a pure function from a price series (plus parameters)
//! to a freshly allocated series of typed rows aligned one-for-one with the
//! input bars:
//! - crossover indicators (SMA, EMA, MACD) carry a [`Signal`] per row
//! - oscillators (RSI, MFI, Stochastic) carry overbought/oversold flags
//! - ROC and Bollinger Bands are informational
//!
//! Values that cannot be computed (short history, zero denominators) are
//! `None` and never produce a signal or flag.

pub mod bollinger;
pub mod crossover;
pub mod ema;
pub mod macd;
pub mod mfi;
pub mod roc;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod window;

pub use bollinger::{calculate_bollinger, BollingerParams, BollingerRow};
pub use ema::calculate_ema;
pub use macd::{calculate_macd, MacdRow};
pub use mfi::{calculate_mfi, MfiParams, MfiRow};
pub use roc::{calculate_roc, latest_movement, Movement, RocRow};
pub use rsi::{calculate_rsi, RsiParams, RsiRow};
pub use sma::calculate_sma;
pub use stochastic::{calculate_stochastic, StochasticParams, StochasticRow};

use crate::domain::ohlcv::PriceBar;
use crate::domain::signal::{Signal, SignalRow};
use chrono::NaiveDate;
use std::fmt;

/// Row produced by the SMA and EMA crossover indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossoverRow {
    pub date: NaiveDate,
    pub price: f64,
    pub short: Option<f64>,
    pub long: Option<f64>,
    pub signal: Signal,
}

impl SignalRow for CrossoverRow {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn price(&self) -> f64 {
        self.price
    }

    fn signal(&self) -> Signal {
        self.signal
    }
}

/// Oscillator families reported in regime mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OscillatorKind {
    Rsi,
    Mfi,
    Stochastic,
}

impl OscillatorKind {
    pub const ALL: [OscillatorKind; 3] = [
        OscillatorKind::Rsi,
        OscillatorKind::Mfi,
        OscillatorKind::Stochastic,
    ];
}

impl fmt::Display for OscillatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OscillatorKind::Rsi => write!(f, "RSI Oscillator"),
            OscillatorKind::Mfi => write!(f, "MFI Oscillator"),
            OscillatorKind::Stochastic => write!(f, "Stochastic Oscillator"),
        }
    }
}

/// Adjusted closes as a fully-defined optional series.
pub(crate) fn adjusted_closes(bars: &[PriceBar]) -> Vec<Option<f64>> {
    window::defined(bars.iter().map(|b| b.adj_close))
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::domain::ohlcv::PriceBar;
    use chrono::NaiveDate;

    /// Bars on consecutive days with every price field set to `price`.
    pub fn make_bars(prices: &[f64]) -> Vec<PriceBar> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        prices
            .iter()
            .enumerate()
            .map(|(i, &price)| PriceBar {
                date: start + chrono::Duration::days(i as i64),
                open: price,
                high: price,
                low: price,
                close: price,
                adj_close: price,
                volume: 1000.0,
            })
            .collect()
    }
}
