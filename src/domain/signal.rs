//! Signal vocabulary shared by indicators, the simulator and the reporter.
//!
//! Crossover indicators annotate each row with a [`Signal`]; oscillators
//! annotate each row with overbought/oversold flags instead.

use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Signal {
    Sell,
    #[default]
    Hold,
    Buy,
}

impl Signal {
    /// -1 (sell), 0 (hold), 1 (buy)
    pub fn value(self) -> i8 {
        match self {
            Signal::Sell => -1,
            Signal::Hold => 0,
            Signal::Buy => 1,
        }
    }

    /// Unrecognized values map to `Hold`.
    pub fn from_value(value: i8) -> Self {
        match value {
            1 => Signal::Buy,
            -1 => Signal::Sell,
            _ => Signal::Hold,
        }
    }

    pub fn is_actionable(self) -> bool {
        self != Signal::Hold
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Sell => write!(f, "Sell"),
            Signal::Hold => write!(f, "Hold"),
            Signal::Buy => write!(f, "Buy"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OscillatorFlag {
    Overbought,
    Oversold,
}

impl OscillatorFlag {
    pub fn opposite(self) -> Self {
        match self {
            OscillatorFlag::Overbought => OscillatorFlag::Oversold,
            OscillatorFlag::Oversold => OscillatorFlag::Overbought,
        }
    }
}

impl fmt::Display for OscillatorFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OscillatorFlag::Overbought => write!(f, "Overbought"),
            OscillatorFlag::Oversold => write!(f, "Oversold"),
        }
    }
}

/// MACD zero-line regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Regime {
    Bull,
    Bear,
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Regime::Bull => write!(f, "bull"),
            Regime::Bear => write!(f, "bear"),
        }
    }
}

/// A row of a crossover-annotated series, consumed by the simulator.
pub trait SignalRow {
    fn date(&self) -> NaiveDate;
    /// Adjusted close the simulator trades at.
    fn price(&self) -> f64;
    fn signal(&self) -> Signal;
}

impl<T: SignalRow + ?Sized> SignalRow for &T {
    fn date(&self) -> NaiveDate {
        (**self).date()
    }

    fn price(&self) -> f64 {
        (**self).price()
    }

    fn signal(&self) -> Signal {
        (**self).signal()
    }
}

/// A row of an oscillator-annotated series, consumed by the regime reporter.
pub trait FlaggedRow {
    fn date(&self) -> NaiveDate;
    fn overbought(&self) -> bool;
    fn oversold(&self) -> bool;

    /// Overbought wins if both are somehow set.
    fn flag(&self) -> Option<OscillatorFlag> {
        if self.overbought() {
            Some(OscillatorFlag::Overbought)
        } else if self.oversold() {
            Some(OscillatorFlag::Oversold)
        } else {
            None
        }
    }
}
