//! Signal reporter: human-readable summaries of annotated series.
//!
//! Discrete mode lists buy/sell events of a crossover series. Regime mode
//! turns oscillator flags into completed overbought/oversold intervals.

use crate::domain::error::SignalbenchError;
use crate::domain::signal::{FlaggedRow, OscillatorFlag, Signal, SignalRow};
use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalEvent {
    pub signal: Signal,
    pub date: NaiveDate,
}

impl fmt::Display for SignalEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Signal on {}", self.signal, self.date)
    }
}

/// Every buy/sell row as (signal, date), ascending by date.
pub fn discrete_signals<R: SignalRow>(rows: &[R]) -> Vec<SignalEvent> {
    let mut events: Vec<SignalEvent> = rows
        .iter()
        .filter(|r| r.signal().is_actionable())
        .map(|r| SignalEvent {
            signal: r.signal(),
            date: r.date(),
        })
        .collect();
    events.sort_by_key(|e| e.date);
    events
}

/// The most recent buy/sell event, formatted as "Buy Signal on <date>".
pub fn latest_signal<R: SignalRow>(rows: &[R]) -> Result<String, SignalbenchError> {
    discrete_signals(rows)
        .last()
        .map(SignalEvent::to_string)
        .ok_or(SignalbenchError::EmptySignalSet)
}

/// A completed oscillator regime: opened by `flag`, closed by its opposite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegimeInterval {
    pub flag: OscillatorFlag,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl fmt::Display for RegimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} between {} and {}", self.flag, self.start, self.end)
    }
}

/// Latest completed regime, or the explicit no-data sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatestRegime {
    Completed(RegimeInterval),
    NoData,
}

impl fmt::Display for LatestRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LatestRegime::Completed(interval) => interval.fmt(f),
            LatestRegime::NoData => write!(f, "No Data"),
        }
    }
}

/// Completed regimes in chronological order.
///
/// A regime opens at the first flagged row and closes at the first later row
/// carrying the opposite flag; that closing row opens the next regime. A
/// regime still open at the end of the series is dropped.
pub fn regimes<R: FlaggedRow>(rows: &[R]) -> Vec<RegimeInterval> {
    let mut intervals = Vec::new();
    let mut open: Option<(OscillatorFlag, NaiveDate)> = None;

    for (flag, date) in rows.iter().filter_map(|r| r.flag().map(|f| (f, r.date()))) {
        match open {
            None => open = Some((flag, date)),
            Some((current, start)) if flag == current.opposite() => {
                intervals.push(RegimeInterval {
                    flag: current,
                    start,
                    end: date,
                });
                open = Some((flag, date));
            }
            Some(_) => {}
        }
    }
    intervals
}

pub fn latest_regime<R: FlaggedRow>(rows: &[R]) -> LatestRegime {
    regimes(rows)
        .last()
        .copied()
        .map_or(LatestRegime::NoData, LatestRegime::Completed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    struct Sig(NaiveDate, Signal);

    impl SignalRow for Sig {
        fn date(&self) -> NaiveDate {
            self.0
        }
        fn price(&self) -> f64 {
            1.0
        }
        fn signal(&self) -> Signal {
            self.1
        }
    }

    struct Osc {
        date: NaiveDate,
        overbought: bool,
        oversold: bool,
    }

    impl FlaggedRow for Osc {
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

    /// 'o' overbought, 'u' oversold, '.' neither; one row per day from the 1st.
    fn osc(pattern: &str) -> Vec<Osc> {
        pattern
            .chars()
            .enumerate()
            .map(|(i, c)| Osc {
                date: day(i as u32 + 1),
                overbought: c == 'o',
                oversold: c == 'u',
            })
            .collect()
    }

    #[test]
    fn discrete_filters_and_sorts() {
        let rows = vec![
            Sig(day(5), Signal::Sell),
            Sig(day(1), Signal::Hold),
            Sig(day(2), Signal::Buy),
        ];
        let events = discrete_signals(&rows);
        assert_eq!(
            events,
            vec![
                SignalEvent {
                    signal: Signal::Buy,
                    date: day(2)
                },
                SignalEvent {
                    signal: Signal::Sell,
                    date: day(5)
                },
            ]
        );
    }

    #[test]
    fn latest_signal_formats() {
        let rows = vec![Sig(day(2), Signal::Buy), Sig(day(9), Signal::Sell)];
        assert_eq!(latest_signal(&rows).unwrap(), "Sell Signal on 2024-03-09");

        let rows = vec![Sig(day(4), Signal::Buy), Sig(day(6), Signal::Hold)];
        assert_eq!(latest_signal(&rows).unwrap(), "Buy Signal on 2024-03-04");
    }

    #[test]
    fn latest_signal_empty_is_error() {
        let rows = vec![Sig(day(1), Signal::Hold)];
        assert!(matches!(
            latest_signal(&rows),
            Err(SignalbenchError::EmptySignalSet)
        ));
    }

    #[test]
    fn single_completed_regime_and_open_tail_dropped() {
        // overbought rows 3-5, oversold row 9, nothing after
        let rows = osc("..ooo...u...");
        assert_eq!(
            regimes(&rows),
            vec![RegimeInterval {
                flag: OscillatorFlag::Overbought,
                start: day(3),
                end: day(9),
            }]
        );
    }

    #[test]
    fn closing_flag_opens_next_regime() {
        let rows = osc("o.u..o.u");
        let r = regimes(&rows);
        assert_eq!(r.len(), 3);
        assert_eq!(r[1].flag, OscillatorFlag::Oversold);
        assert_eq!((r[1].start, r[1].end), (day(3), day(6)));
        assert_eq!((r[2].start, r[2].end), (day(6), day(8)));
    }

    #[test]
    fn no_opposite_flag_means_no_regime() {
        assert!(regimes(&osc("oo.o")).is_empty());
        assert_eq!(latest_regime(&osc("oo.o")), LatestRegime::NoData);
        assert_eq!(latest_regime(&osc("")), LatestRegime::NoData);
    }

    #[test]
    fn latest_regime_is_last_completed() {
        let latest = latest_regime(&osc("u..o..u.o"));
        assert_eq!(
            latest,
            LatestRegime::Completed(RegimeInterval {
                flag: OscillatorFlag::Oversold,
                start: day(7),
                end: day(9),
            })
        );
        assert_eq!(
            latest.to_string(),
            "Oversold between 2024-03-07 and 2024-03-09"
        );
    }

    #[test]
    fn no_data_display() {
        assert_eq!(LatestRegime::NoData.to_string(), "No Data");
    }
}
