//! Stochastic Oscillator (%K).
//!
//! %K = 100 * (C - L) / (H - L), where L and H are the lowest and highest
//! close over the trailing window (default 14). Undefined while the window
//! is incomplete and when H == L.

use crate::domain::indicator::window::{defined, rolling_max, rolling_min};
use crate::domain::ohlcv::PriceBar;
use crate::domain::signal::FlaggedRow;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StochasticParams {
    pub period: usize,
    pub upper: f64,
    pub lower: f64,
}

impl Default for StochasticParams {
    fn default() -> Self {
        StochasticParams {
            period: 14,
            upper: 80.0,
            lower: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StochasticRow {
    pub date: NaiveDate,
    pub close: f64,
    pub lowest: Option<f64>,
    pub highest: Option<f64>,
    pub k: Option<f64>,
    pub overbought: bool,
    pub oversold: bool,
}

impl FlaggedRow for StochasticRow {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn overbought(&self) -> bool {
        self.overbought
    }

    fn oversold(&self) -> bool {
        self.oversold
    }
}

pub fn calculate_stochastic(bars: &[PriceBar], params: &StochasticParams) -> Vec<StochasticRow> {
    let closes = defined(bars.iter().map(|b| b.close));
    let lowest = rolling_min(&closes, params.period);
    let highest = rolling_max(&closes, params.period);

    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            let k = match (lowest[i], highest[i]) {
                (Some(lo), Some(hi)) if hi != lo => Some(100.0 * (bar.close - lo) / (hi - lo)),
                _ => None,
            };
            StochasticRow {
                date: bar.date,
                close: bar.close,
                lowest: lowest[i],
                highest: highest[i],
                k,
                overbought: k.is_some_and(|v| v > params.upper),
                oversold: k.is_some_and(|v| v < params.lower),
            }
        })
        .collect()
}
