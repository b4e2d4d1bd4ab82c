//! Price bar representation and ingestion-time validation.

use crate::domain::error::SignalbenchError;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adj_close: f64,
    pub volume: f64,
}

impl PriceBar {
    /// (high + low + close) / 3
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }
}

/// Checks the ordering and value preconditions every indicator assumes.
///
/// Dates must be strictly increasing; open/high/low/close must be positive;
/// adjusted close and volume must be non-negative.
pub fn validate_series(bars: &[PriceBar]) -> Result<(), SignalbenchError> {
    for (row, bar) in bars.iter().enumerate() {
        if row > 0 && bar.date <= bars[row - 1].date {
            return Err(SignalbenchError::InvalidSeries {
                row,
                reason: format!(
                    "date {} does not follow {}",
                    bar.date,
                    bars[row - 1].date
                ),
            });
        }

        for (name, value) in [
            ("open", bar.open),
            ("high", bar.high),
            ("low", bar.low),
            ("close", bar.close),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(SignalbenchError::InvalidSeries {
                    row,
                    reason: format!("{} must be positive, got {}", name, value),
                });
            }
        }

        if bar.adj_close.is_nan() || bar.adj_close < 0.0 {
            return Err(SignalbenchError::InvalidSeries {
                row,
                reason: format!("adjclose must be non-negative, got {}", bar.adj_close),
            });
        }
        if !(bar.volume >= 0.0) {
            return Err(SignalbenchError::InvalidSeries {
                row,
                reason: format!("volume must be non-negative, got {}", bar.volume),
            });
        }
    }
    Ok(())
}
