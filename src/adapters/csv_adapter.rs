//! CSV file price adapter.
//!
//! Reads `<dir>/<TICKER>_<interval>.csv` with a header row naming the
//! columns `date,open,high,low,close,adjclose,volume` (any order).

use crate::domain::error::SignalbenchError;
use crate::domain::ohlcv::{validate_series, PriceBar};
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use csv::StringRecord;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

const COLUMNS: [&str; 7] = ["date", "open", "high", "low", "close", "adjclose", "volume"];

pub struct CsvAdapter {
    base_path: PathBuf,
}

/// Column positions resolved from the header row.
struct Layout([usize; 7]);

impl Layout {
    fn from_headers(headers: &StringRecord) -> Result<Self, SignalbenchError> {
        let mut positions = [0usize; 7];
        for (slot, name) in positions.iter_mut().zip(COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| normalize(h) == name)
                .ok_or_else(|| SignalbenchError::Data {
                    reason: format!("missing {name} column"),
                })?;
        }
        Ok(Layout(positions))
    }

    fn field<'r>(&self, record: &'r StringRecord, column: usize) -> Result<&'r str, SignalbenchError> {
        record
            .get(self.0[column])
            .map(str::trim)
            .ok_or_else(|| SignalbenchError::Data {
                reason: format!("missing {} value", COLUMNS[column]),
            })
    }

    fn number(&self, record: &StringRecord, column: usize) -> Result<f64, SignalbenchError> {
        let raw = self.field(record, column)?;
        raw.parse().map_err(|_| SignalbenchError::Data {
            reason: format!("invalid {} value '{}'", COLUMNS[column], raw),
        })
    }
}

/// Lowercase with spaces and underscores removed, so "Adj Close" matches.
fn normalize(header: &str) -> String {
    header
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str, interval: &str) -> PathBuf {
        self.base_path.join(format!("{}_{}.csv", ticker, interval))
    }
}

impl DataPort for CsvAdapter {
    fn fetch_prices(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
        interval: &str,
    ) -> Result<Vec<PriceBar>, SignalbenchError> {
        let no_data = || SignalbenchError::NoData {
            ticker: ticker.to_string(),
            interval: interval.to_string(),
        };

        let path = self.csv_path(ticker, interval);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "price file not found");
                return Err(no_data());
            }
            Err(e) => {
                return Err(SignalbenchError::Data {
                    reason: format!("failed to read {}: {}", path.display(), e),
                })
            }
        };

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr.headers().map_err(|e| SignalbenchError::Data {
            reason: format!("CSV header error: {}", e),
        })?;
        let layout = Layout::from_headers(headers)?;

        let mut bars = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| SignalbenchError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = layout.field(&record, 0)?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                SignalbenchError::Data {
                    reason: format!("invalid date '{}': {}", date_str, e),
                }
            })?;
            if date < start || date > end {
                continue;
            }

            bars.push(PriceBar {
                date,
                open: layout.number(&record, 1)?,
                high: layout.number(&record, 2)?,
                low: layout.number(&record, 3)?,
                close: layout.number(&record, 4)?,
                adj_close: layout.number(&record, 5)?,
                volume: layout.number(&record, 6)?,
            });
        }

        if bars.is_empty() {
            return Err(no_data());
        }

        bars.sort_by_key(|b| b.date);
        validate_series(&bars)?;
        debug!(ticker, interval, rows = bars.len(), "loaded price series");
        Ok(bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HEADER: &str = "date,open,high,low,close,adjclose,volume\n";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        dir
    }

    fn sample() -> TempDir {
        setup(&[(
            "AAPL_1d.csv",
            "date,open,high,low,close,adjclose,volume\n\
             2024-01-17,110.0,120.0,105.0,115.0,114.0,55000\n\
             2024-01-15,100.0,110.0,90.0,105.0,104.0,50000\n\
             2024-01-16,105.0,115.0,100.0,110.0,109.0,60000\n",
        )])
    }

    #[test]
    fn fetch_prices_reads_and_sorts() {
        let dir = sample();
        let adapter = CsvAdapter::new(dir.path().to_path_buf());
        let bars = adapter
            .fetch_prices("AAPL", date(2024, 1, 1), date(2024, 1, 31), "1d")
            .unwrap();

        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].date, date(2024, 1, 15));
        assert_eq!(bars[0].open, 100.0);
        assert_eq!(bars[0].high, 110.0);
        assert_eq!(bars[0].low, 90.0);
        assert_eq!(bars[0].close, 105.0);
        assert_eq!(bars[0].adj_close, 104.0);
        assert_eq!(bars[0].volume, 50000.0);
        assert_eq!(bars[2].date, date(2024, 1, 17));
    }

    #[test]
    fn fetch_prices_filters_inclusive_range() {
        let dir = sample();
        let adapter = CsvAdapter::new(dir.path().to_path_buf());
        let bars = adapter
            .fetch_prices("AAPL", date(2024, 1, 16), date(2024, 1, 16), "1d")
            .unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].date, date(2024, 1, 16));
    }

    #[test]
    fn header_order_and_spelling_are_flexible() {
        let dir = setup(&[(
            "SPY_1wk.csv",
            "Date,Adj Close,Open,High,Low,Close,Volume\n2024-02-01,50.5,50,52,49,51,10\n",
        )]);
        let adapter = CsvAdapter::new(dir.path().to_path_buf());
        let bars = adapter
            .fetch_prices("SPY", date(2024, 1, 1), date(2024, 12, 31), "1wk")
            .unwrap();
        assert_eq!(bars[0].adj_close, 50.5);
        assert_eq!(bars[0].close, 51.0);
    }

    #[test]
    fn missing_file_is_no_data() {
        let dir = sample();
        let adapter = CsvAdapter::new(dir.path().to_path_buf());
        let err = adapter
            .fetch_prices("AAPL", date(2024, 1, 1), date(2024, 1, 31), "1h")
            .unwrap_err();
        assert!(matches!(err, SignalbenchError::NoData { interval, .. } if interval == "1h"));
    }

    #[test]
    fn empty_range_is_no_data() {
        let dir = sample();
        let adapter = CsvAdapter::new(dir.path().to_path_buf());
        let err = adapter
            .fetch_prices("AAPL", date(2023, 1, 1), date(2023, 12, 31), "1d")
            .unwrap_err();
        assert!(matches!(err, SignalbenchError::NoData { .. }));
    }

    #[test]
    fn missing_column_is_data_error() {
        let dir = setup(&[("X_1d.csv", "date,open,high,low,close,volume\n")]);
        let adapter = CsvAdapter::new(dir.path().to_path_buf());
        let err = adapter
            .fetch_prices("X", date(2024, 1, 1), date(2024, 1, 31), "1d")
            .unwrap_err();
        assert!(matches!(err, SignalbenchError::Data { reason } if reason.contains("adjclose")));
    }

    #[test]
    fn malformed_number_is_data_error() {
        let content = format!("{HEADER}2024-01-02,1,2,0.5,1.5,abc,100\n");
        let dir = setup(&[("X_1d.csv", content.as_str())]);
        let adapter = CsvAdapter::new(dir.path().to_path_buf());
        let err = adapter
            .fetch_prices("X", date(2024, 1, 1), date(2024, 1, 31), "1d")
            .unwrap_err();
        assert!(matches!(err, SignalbenchError::Data { .. }));
    }

    #[test]
    fn duplicate_dates_rejected() {
        let content = format!(
            "{HEADER}2024-01-02,1,2,0.5,1.5,1.5,100\n2024-01-02,1,2,0.5,1.5,1.5,100\n"
        );
        let dir = setup(&[("X_1d.csv", content.as_str())]);
        let adapter = CsvAdapter::new(dir.path().to_path_buf());
        let err = adapter
            .fetch_prices("X", date(2024, 1, 1), date(2024, 1, 31), "1d")
            .unwrap_err();
        assert!(matches!(err, SignalbenchError::InvalidSeries { row: 1, .. }));
    }

    #[test]
    fn non_positive_price_rejected() {
        let content = format!("{HEADER}2024-01-02,0,2,0.5,1.5,1.5,100\n");
        let dir = setup(&[("X_1d.csv", content.as_str())]);
        let adapter = CsvAdapter::new(dir.path().to_path_buf());
        let err = adapter
            .fetch_prices("X", date(2024, 1, 1), date(2024, 1, 31), "1d")
            .unwrap_err();
        assert!(matches!(err, SignalbenchError::InvalidSeries { row: 0, .. }));
    }
}
