//! ROC (Rate of Change) with a per-row movement classification.
//!
//! ROC(n)[i] = ((P[i] - P[i-n]) / P[i-n]) * 100 on adjusted close.
//! Undefined for the first n rows and when P[i-n] == 0.

use crate::domain::ohlcv::PriceBar;
use chrono::NaiveDate;
use std::fmt;

pub const DEFAULT_PERIOD: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Movement {
    Increasing,
    Decreasing,
    Flat,
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Movement::Increasing => write!(f, "Increasing"),
            Movement::Decreasing => write!(f, "Decreasing"),
            Movement::Flat => write!(f, "Flat"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RocRow {
    pub date: NaiveDate,
    pub price: f64,
    pub roc: Option<f64>,
    pub movement: Option<Movement>,
}

pub fn calculate_roc(bars: &[PriceBar], period: usize) -> Vec<RocRow> {
    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            let roc = if period > 0 && i >= period {
                let prev = bars[i - period].adj_close;
                (prev != 0.0).then(|| (bar.adj_close - prev) / prev * 100.0)
            } else {
                None
            };
            let movement = roc.map(|r| {
                if r > 0.0 {
                    Movement::Increasing
                } else if r < 0.0 {
                    Movement::Decreasing
                } else {
                    Movement::Flat
                }
            });
            RocRow {
                date: bar.date,
                price: bar.adj_close,
                roc,
                movement,
            }
        })
        .collect()
}

/// Movement on the final row, if that row is defined.
pub fn latest_movement(rows: &[RocRow]) -> Option<Movement> {
    rows.last().and_then(|r| r.movement)
}
