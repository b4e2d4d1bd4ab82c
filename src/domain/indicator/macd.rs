//! MACD (Moving Average Convergence Divergence).
//!
//! MACD Line = EMA(short) - EMA(long) of adjusted close
//! Signal Line = EMA(signal) of MACD Line
//! Histogram = MACD Line - Signal Line
//!
//! EMAs are seeded with the first value (no warmup). Buy/sell fire on
//! crosses of the MACD line over the signal line; the zero-line crossing
//! of the MACD line is reported separately as a bull/bear regime marker.
//!
//! Default parameters: short=12, long=26, signal=9

use crate::domain::indicator::adjusted_closes;
use crate::domain::indicator::crossover::{crossover_signals, zero_line_regimes};
use crate::domain::indicator::window::ewm;
use crate::domain::ohlcv::PriceBar;
use crate::domain::signal::{Regime, Signal, SignalRow};
use crate::domain::strategy::Parameterization;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct MacdRow {
    pub date: NaiveDate,
    pub price: f64,
    pub short_ema: Option<f64>,
    pub long_ema: Option<f64>,
    pub macd: Option<f64>,
    pub signal_line: Option<f64>,
    pub histogram: Option<f64>,
    pub signal: Signal,
    pub regime: Option<Regime>,
}

impl SignalRow for MacdRow {
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

pub fn calculate_macd(bars: &[PriceBar], params: &Parameterization) -> Vec<MacdRow> {
    let prices = adjusted_closes(bars);
    let short_ema = ewm(&prices, params.short());
    let long_ema = ewm(&prices, params.long());

    let macd: Vec<Option<f64>> = short_ema
        .iter()
        .zip(&long_ema)
        .map(|(s, l)| Some((*s)? - (*l)?))
        .collect();
    let signal_line = ewm(&macd, params.signal_or_default());

    let signals = crossover_signals(&macd, &signal_line);
    let regimes = zero_line_regimes(&macd);

    bars.iter()
        .enumerate()
        .map(|(i, bar)| MacdRow {
            date: bar.date,
            price: bar.adj_close,
            short_ema: short_ema[i],
            long_ema: long_ema[i],
            macd: macd[i],
            signal_line: signal_line[i],
            histogram: macd[i].zip(signal_line[i]).map(|(m, s)| m - s),
            signal: signals[i],
            regime: regimes[i],
        })
        .collect()
}

/// (regime, date) for every row carrying a zero-line marker, in order.
pub fn regime_markers(rows: &[MacdRow]) -> Vec<(Regime, NaiveDate)> {
    rows.iter()
        .filter_map(|r| r.regime.map(|regime| (regime, r.date)))
        .collect()
}
