//! Money Flow Index oscillator.
//!
//! typical = (high + low + close) / 3, raw flow = typical * volume.
//! A row's flow is positive when typical price rose versus the previous row
//! and negative otherwise (including unchanged). The first row has nothing
//! to compare against and contributes no flow either way.
//!
//! ratio = sum(positive, n) / sum(negative, n), undefined when the negative
//! sum is zero. MFI = 100 - 100 / (1 + ratio).
//!
//! Default parameters: period=14, upper=80, lower=20

use crate::domain::indicator::window::{defined, rolling_sum};
use crate::domain::ohlcv::PriceBar;
use crate::domain::signal::FlaggedRow;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MfiParams {
    pub period: usize,
    pub upper: f64,
    pub lower: f64,
}

impl Default for MfiParams {
    fn default() -> Self {
        MfiParams {
            period: 14,
            upper: 80.0,
            lower: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MfiRow {
    pub date: NaiveDate,
    pub typical_price: f64,
    pub raw_money_flow: f64,
    /// +1 rising, -1 falling or unchanged, 0 for the first row.
    pub flow_sign: i8,
    pub positive_flow: f64,
    pub negative_flow: f64,
    pub sum_positive_flow: Option<f64>,
    pub sum_negative_flow: Option<f64>,
    pub money_flow_ratio: Option<f64>,
    pub mfi: Option<f64>,
    pub overbought: bool,
    pub oversold: bool,
}

impl FlaggedRow for MfiRow {
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

pub fn calculate_mfi(bars: &[PriceBar], params: &MfiParams) -> Vec<MfiRow> {
    let typical: Vec<f64> = bars.iter().map(PriceBar::typical_price).collect();
    let raw: Vec<f64> = bars
        .iter()
        .zip(&typical)
        .map(|(bar, tp)| tp * bar.volume)
        .collect();

    let signs: Vec<i8> = (0..bars.len())
        .map(|i| match i {
            0 => 0,
            _ if typical[i] > typical[i - 1] => 1,
            _ => -1,
        })
        .collect();

    let positive: Vec<f64> = raw
        .iter()
        .zip(&signs)
        .map(|(flow, &sign)| if sign > 0 { *flow } else { 0.0 })
        .collect();
    let negative: Vec<f64> = raw
        .iter()
        .zip(&signs)
        .map(|(flow, &sign)| if sign < 0 { *flow } else { 0.0 })
        .collect();

    let sum_positive = rolling_sum(&defined(positive.iter().copied()), params.period);
    let sum_negative = rolling_sum(&defined(negative.iter().copied()), params.period);

    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            let ratio = match (sum_positive[i], sum_negative[i]) {
                (Some(p), Some(n)) if n != 0.0 => Some(p / n),
                _ => None,
            };
            let mfi = ratio.map(|r| 100.0 - 100.0 / (1.0 + r));
            MfiRow {
                date: bar.date,
                typical_price: typical[i],
                raw_money_flow: raw[i],
                flow_sign: signs[i],
                positive_flow: positive[i],
                negative_flow: negative[i],
                sum_positive_flow: sum_positive[i],
                sum_negative_flow: sum_negative[i],
                money_flow_ratio: ratio,
                mfi,
                overbought: mfi.is_some_and(|v| v > params.upper),
                oversold: mfi.is_some_and(|v| v < params.lower),
            }
        })
        .collect()
}
