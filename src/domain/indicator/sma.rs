//! Simple Moving Average crossover.
//!
//! short = mean(adjclose, short_lag), long = mean(adjclose, long_lag), both
//! trailing and inclusive. Buy on an upward cross of short over long, sell
//! on the downward cross. The first (long_lag - 1) rows are undefined.

use crate::domain::indicator::crossover::crossover_signals;
use crate::domain::indicator::window::rolling_mean;
use crate::domain::indicator::{adjusted_closes, CrossoverRow};
use crate::domain::ohlcv::PriceBar;
use crate::domain::strategy::Parameterization;

pub fn calculate_sma(bars: &[PriceBar], params: &Parameterization) -> Vec<CrossoverRow> {
    let prices = adjusted_closes(bars);
    let short = rolling_mean(&prices, params.short());
    let long = rolling_mean(&prices, params.long());
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
