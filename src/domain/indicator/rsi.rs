//! RSI (Relative Strength Index) oscillator.
//!
//! delta = P[i] - P[i-1] on adjusted close (row 0 undefined)
//! gain = max(delta, 0), loss = max(-delta, 0)
//!
//! The average gain/loss is the simple trailing mean over `period` deltas
//! wherever that window is complete. Rows before that are filled from an
//! exponential average (span = period) of the same deltas, seeded with the
//! first defined delta.
//!
//! RS = avg_gain / avg_loss (undefined when avg_loss == 0)
//! RSI = 100 - 100 / (1 + RS)
//!
//! Default parameters: period=14, upper=70, lower=30

use crate::domain::indicator::adjusted_closes;
use crate::domain::indicator::window::{ewm, rolling_mean};
use crate::domain::ohlcv::PriceBar;
use crate::domain::signal::FlaggedRow;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RsiParams {
    pub period: usize,
    pub upper: f64,
    pub lower: f64,
}

impl Default for RsiParams {
    fn default() -> Self {
        RsiParams {
            period: 14,
            upper: 70.0,
            lower: 30.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RsiRow {
    pub date: NaiveDate,
    pub price: f64,
    pub delta: Option<f64>,
    pub gain: Option<f64>,
    pub loss: Option<f64>,
    pub avg_gain: Option<f64>,
    pub avg_loss: Option<f64>,
    pub rs: Option<f64>,
    pub rsi: Option<f64>,
    pub overbought: bool,
    pub oversold: bool,
}

impl FlaggedRow for RsiRow {
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

pub fn calculate_rsi(bars: &[PriceBar], params: &RsiParams) -> Vec<RsiRow> {
    let prices = adjusted_closes(bars);
    let delta: Vec<Option<f64>> = (0..prices.len())
        .map(|i| {
            if i == 0 {
                None
            } else {
                Some(prices[i]? - prices[i - 1]?)
            }
        })
        .collect();
    let gain: Vec<Option<f64>> = delta.iter().map(|d| d.map(|d| d.max(0.0))).collect();
    let loss: Vec<Option<f64>> = delta.iter().map(|d| d.map(|d| (-d).max(0.0))).collect();

    let (avg_gain, avg_loss) = if params.period == 0 {
        (vec![None; bars.len()], vec![None; bars.len()])
    } else {
        (
            smoothed_average(&gain, params.period),
            smoothed_average(&loss, params.period),
        )
    };

    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            let rs = match (avg_gain[i], avg_loss[i]) {
                (Some(g), Some(l)) if l != 0.0 => Some(g / l),
                _ => None,
            };
            let rsi = rs.map(|rs| 100.0 - 100.0 / (1.0 + rs));
            RsiRow {
                date: bar.date,
                price: bar.adj_close,
                delta: delta[i],
                gain: gain[i],
                loss: loss[i],
                avg_gain: avg_gain[i],
                avg_loss: avg_loss[i],
                rs,
                rsi,
                overbought: rsi.is_some_and(|v| v > params.upper),
                oversold: rsi.is_some_and(|v| v < params.lower),
            }
        })
        .collect()
}

/// Simple trailing mean where the window is full, exponential average elsewhere.
fn smoothed_average(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let simple = rolling_mean(values, period);
    let exponential = ewm(values, period);
    simple
        .into_iter()
        .zip(exponential)
        .map(|(s, e)| s.or(e))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::test_support::make_bars;
    use approx::assert_relative_eq;

    #[test]
    fn rsi_first_row_undefined() {
        let rows = calculate_rsi(&make_bars(&[10.0, 11.0, 10.5]), &RsiParams::default());
        assert!(rows[0].delta.is_none());
        assert!(rows[0].rsi.is_none());
        assert!(!rows[0].overbought && !rows[0].oversold);
    }

    #[test]
    fn rsi_gains_and_losses_split() {
        let rows = calculate_rsi(&make_bars(&[10.0, 12.0, 11.0]), &RsiParams::default());
        assert_eq!(rows[1].gain, Some(2.0));
        assert_eq!(rows[1].loss, Some(0.0));
        assert_eq!(rows[2].gain, Some(0.0));
        assert_eq!(rows[2].loss, Some(1.0));
    }

    #[test]
    fn rsi_uses_exponential_fill_before_window() {
        let params = RsiParams {
            period: 3,
            ..RsiParams::default()
        };
        let rows = calculate_rsi(&make_bars(&[10.0, 12.0, 11.0, 13.0, 12.0]), &params);

        // span 3 => alpha 0.5; seeded with the first delta
        assert_relative_eq!(rows[1].avg_gain.unwrap(), 2.0);
        assert_relative_eq!(rows[1].avg_loss.unwrap(), 0.0);
        assert_relative_eq!(rows[2].avg_gain.unwrap(), 1.0);
        assert_relative_eq!(rows[2].avg_loss.unwrap(), 0.5);
    }

    #[test]
    fn rsi_uses_simple_mean_once_window_full() {
        let params = RsiParams {
            period: 3,
            ..RsiParams::default()
        };
        let rows = calculate_rsi(&make_bars(&[10.0, 12.0, 11.0, 13.0, 12.0]), &params);

        // deltas: +2, -1, +2, -1
        assert_relative_eq!(rows[3].avg_gain.unwrap(), 4.0 / 3.0);
        assert_relative_eq!(rows[3].avg_loss.unwrap(), 1.0 / 3.0);
        assert_relative_eq!(rows[3].rs.unwrap(), 4.0, epsilon = 1e-12);
        assert_relative_eq!(rows[3].rsi.unwrap(), 80.0, epsilon = 1e-9);
        assert!(rows[3].overbought);

        assert_relative_eq!(rows[4].avg_gain.unwrap(), 2.0 / 3.0);
        assert_relative_eq!(rows[4].avg_loss.unwrap(), 2.0 / 3.0);
        assert_relative_eq!(rows[4].rsi.unwrap(), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn rsi_undefined_without_losses() {
        let prices: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let rows = calculate_rsi(&make_bars(&prices), &RsiParams::default());
        assert!(rows.iter().all(|r| r.rsi.is_none()));
        assert!(rows.iter().all(|r| !r.overbought));
    }

    #[test]
    fn rsi_zero_without_gains() {
        let prices: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
        let rows = calculate_rsi(&make_bars(&prices), &RsiParams::default());
        assert_relative_eq!(rows[15].rsi.unwrap(), 0.0);
        assert!(rows[15].oversold);
    }

    #[test]
    fn rsi_in_range() {
        let prices: Vec<f64> = (1..=40)
            .map(|i| 100.0 + (i as f64 % 7.0 - 3.0) * 2.0)
            .collect();
        let rows = calculate_rsi(&make_bars(&prices), &RsiParams::default());
        for rsi in rows.iter().filter_map(|r| r.rsi) {
            assert!((0.0..=100.0).contains(&rsi), "RSI {} out of range", rsi);
        }
    }

    #[test]
    fn rsi_zero_period_is_undefined() {
        let params = RsiParams {
            period: 0,
            ..RsiParams::default()
        };
        let rows = calculate_rsi(&make_bars(&[1.0, 2.0, 1.0]), &params);
        assert!(rows.iter().all(|r| r.rsi.is_none()));
    }
}
