#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use signalbench::domain::error::SignalbenchError;
pub use signalbench::domain::ohlcv::PriceBar;
use signalbench::ports::data_port::DataPort;
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<PriceBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, ticker: &str, bars: Vec<PriceBar>) -> Self {
        self.data.insert(ticker.to_string(), bars);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_prices(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
        interval: &str,
    ) -> Result<Vec<PriceBar>, SignalbenchError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(SignalbenchError::Data {
                reason: reason.clone(),
            });
        }
        let bars: Vec<PriceBar> = self
            .data
            .get(ticker)
            .map(|bars| {
                bars.iter()
                    .filter(|b| b.date >= start && b.date <= end)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        if bars.is_empty() {
            return Err(SignalbenchError::NoData {
                ticker: ticker.to_string(),
                interval: interval.to_string(),
            });
        }
        Ok(bars)
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A bar whose open/high/low/close/adjclose all equal `price`.
pub fn make_bar(day: NaiveDate, price: f64) -> PriceBar {
    PriceBar {
        date: day,
        open: price,
        high: price,
        low: price,
        close: price,
        adj_close: price,
        volume: 1_000.0,
    }
}

/// One bar per consecutive day starting 2024-01-01.
pub fn bars_from_prices(prices: &[f64]) -> Vec<PriceBar> {
    let start = date(2024, 1, 1);
    prices
        .iter()
        .enumerate()
        .map(|(i, &p)| make_bar(start + Duration::days(i as i64), p))
        .collect()
}

/// Deterministic oscillating series with a real high/low spread.
pub fn generate_bars(count: usize) -> Vec<PriceBar> {
    let start = date(2023, 1, 2);
    (0..count)
        .map(|i| {
            let x = i as f64;
            let close = 100.0 + (x * 0.35).sin() * 12.0 + x * 0.05;
            PriceBar {
                date: start + Duration::days(i as i64),
                open: close - 0.5,
                high: close + 1.5,
                low: close - 1.5,
                close,
                adj_close: close * 0.98,
                volume: 10_000.0 + (i % 7) as f64 * 500.0,
            }
        })
        .collect()
}

pub fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub fn write_price_csv(dir: &Path, ticker: &str, interval: &str, bars: &[PriceBar]) {
    let mut wtr = csv::Writer::from_path(dir.join(format!("{ticker}_{interval}.csv"))).unwrap();
    wtr.write_record(["date", "open", "high", "low", "close", "adjclose", "volume"])
        .unwrap();
    for b in bars {
        wtr.write_record([
            b.date.format("%Y-%m-%d").to_string(),
            b.open.to_string(),
            b.high.to_string(),
            b.low.to_string(),
            b.close.to_string(),
            b.adj_close.to_string(),
            b.volume.to_string(),
        ])
        .unwrap();
    }
    wtr.flush().unwrap();
}
