//! Crossover detection between two aligned series.
//!
//! Buy when `fast` moves from `<= slow` to `> slow`; sell when it moves from
//! `>= slow` to `< slow`. Both rows of both series must be defined.

use crate::domain::signal::{Regime, Signal};

pub fn crossover_signals(fast: &[Option<f64>], slow: &[Option<f64>]) -> Vec<Signal> {
    let len = fast.len().min(slow.len());
    let mut signals = vec![Signal::Hold; len];

    for i in 1..len {
        let (Some(f), Some(s), Some(pf), Some(ps)) = (fast[i], slow[i], fast[i - 1], slow[i - 1])
        else {
            continue;
        };
        if f > s && pf <= ps {
            signals[i] = Signal::Buy;
        } else if f < s && pf >= ps {
            signals[i] = Signal::Sell;
        }
    }
    signals
}

/// Zero-line crossings: bull when the line moves from `<= 0` to `> 0`.
pub fn zero_line_regimes(line: &[Option<f64>]) -> Vec<Option<Regime>> {
    let mut regimes = vec![None; line.len()];

    for i in 1..line.len() {
        let (Some(curr), Some(prev)) = (line[i], line[i - 1]) else {
            continue;
        };
        if curr > 0.0 && prev <= 0.0 {
            regimes[i] = Some(Regime::Bull);
        } else if curr < 0.0 && prev >= 0.0 {
            regimes[i] = Some(Regime::Bear);
        }
    }
    regimes
}
