//! Price data access port.

use crate::domain::error::SignalbenchError;
use crate::domain::ohlcv::PriceBar;
use chrono::NaiveDate;

pub trait DataPort {
    /// Daily (or `interval`) bars for `ticker` within `[start, end]`,
    /// ascending by date.
    fn fetch_prices(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
        interval: &str,
    ) -> Result<Vec<PriceBar>, SignalbenchError>;
}
