//! Bollinger Bands indicator.
//!
//! - Middle: SMA of adjusted close over n periods
//! - Upper: Middle + (k × StdDev)
//! - Lower: Middle - (k × StdDev)
//! - Delta: Upper - Lower
//!
//! StdDev is the sample standard deviation (divides by N-1).
//!
//! Default parameters: period=20, k=2.0
//! Warmup: first (period-1) bars are undefined. Informational only, no signal.

use crate::domain::indicator::adjusted_closes;
use crate::domain::indicator::window::{rolling_mean, rolling_std};
use crate::domain::ohlcv::PriceBar;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerParams {
    pub period: usize,
    pub k: f64,
}

impl Default for BollingerParams {
    fn default() -> Self {
        BollingerParams {
            period: 20,
            k: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BollingerRow {
    pub date: NaiveDate,
    pub price: f64,
    pub middle: Option<f64>,
    pub std_dev: Option<f64>,
    pub upper: Option<f64>,
    pub lower: Option<f64>,
    pub delta: Option<f64>,
}

pub fn calculate_bollinger(bars: &[PriceBar], params: &BollingerParams) -> Vec<BollingerRow> {
    let prices = adjusted_closes(bars);
    let middle = rolling_mean(&prices, params.period);
    let std_dev = rolling_std(&prices, params.period);

    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            let bands = middle[i]
                .zip(std_dev[i])
                .map(|(m, sd)| (m + params.k * sd, m - params.k * sd));
            BollingerRow {
                date: bar.date,
                price: bar.adj_close,
                middle: middle[i],
                std_dev: std_dev[i],
                upper: bands.map(|(u, _)| u),
                lower: bands.map(|(_, l)| l),
                delta: bands.map(|(u, l)| u - l),
            }
        })
        .collect()
}
