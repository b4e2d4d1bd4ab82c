//! Exponential Moving Average crossover.
//!
//! k = 2/(span+1), seeded with the first adjusted close and no bias
//! adjustment: EMA[0] = P[0], EMA[i] = P[i]*k + EMA[i-1]*(1-k).
//! Every row is defined, so only row 0 is signal-free by construction.

use crate::domain::indicator::crossover::crossover_signals;
use crate::domain::indicator::window::ewm;
use crate::domain::indicator::{adjusted_closes, CrossoverRow};
use crate::domain::ohlcv::PriceBar;
use crate::domain::strategy::Parameterization;

pub fn calculate_ema(bars: &[PriceBar], params: &Parameterization) -> Vec<CrossoverRow> {
    let prices = adjusted_closes(bars);
    let short = ewm(&prices, params.short());
    let long = ewm(&prices, params.long());
    let signals = crossover_signals(&short, &long);

    bars.iter()
        .enumerate()
        .map(|(i, bar)| CrossoverRow {
            date: bar.date,
            price: bar.adj_close,
            short: short[i],
            long: long[i],
            signal: signals[i],
        })
        .collect()
}
