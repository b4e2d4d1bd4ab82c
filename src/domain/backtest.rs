//! Single-position, long-only backtest simulator.
//!
//! FLAT --buy--> LONG --sell--> FLAT, evaluated row by row at the row's
//! adjusted close. Buys take the floor of cash / price in whole shares.
//! A position still open after the last row is liquidated at that row's
//! price. The reported fund is rounded to cents.

use crate::domain::position::{ClosedTrade, PositionState};
use crate::domain::signal::{Signal, SignalRow};
use chrono::NaiveDate;
use tracing::trace;

pub const DEFAULT_FUND: f64 = 10_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Backtest {
    pub starting_fund: f64,
}

impl Default for Backtest {
    fn default() -> Self {
        Backtest {
            starting_fund: DEFAULT_FUND,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    /// Cash after the terminal liquidation, rounded to 2 decimal places.
    pub final_fund: f64,
    pub trades: Vec<ClosedTrade>,
    /// State after the last row, before the terminal liquidation.
    pub end_state: PositionState,
}

struct OpenTrade {
    shares: u64,
    entry_price: f64,
    entry_date: NaiveDate,
}

impl OpenTrade {
    fn close(self, exit_price: f64, exit_date: NaiveDate, forced_exit: bool) -> ClosedTrade {
        ClosedTrade {
            shares: self.shares,
            entry_price: self.entry_price,
            exit_price,
            entry_date: self.entry_date,
            exit_date,
            pnl: self.shares as f64 * (exit_price - self.entry_price),
            forced_exit,
        }
    }
}

impl Backtest {
    pub fn new(starting_fund: f64) -> Self {
        Backtest { starting_fund }
    }

    /// Final fund only.
    pub fn test<R: SignalRow>(&self, rows: &[R]) -> f64 {
        self.simulate(rows).final_fund
    }

    pub fn simulate<R: SignalRow>(&self, rows: &[R]) -> SimulationOutcome {
        let mut state = PositionState::flat(self.starting_fund);
        let mut open: Option<OpenTrade> = None;
        let mut trades = Vec::new();

        for row in rows {
            let price = row.price();
            match (state.in_position, row.signal()) {
                (false, Signal::Buy) => {
                    let shares = state.buy(price);
                    trace!(date = %row.date(), price, shares, "buy");
                    open = Some(OpenTrade {
                        shares,
                        entry_price: price,
                        entry_date: row.date(),
                    });
                }
                (true, Signal::Sell) => {
                    let shares = state.sell(price);
                    trace!(date = %row.date(), price, shares, "sell");
                    if let Some(trade) = open.take() {
                        trades.push(trade.close(price, row.date(), false));
                    }
                }
                _ => {}
            }
        }

        let end_state = state.clone();
        if state.in_position {
            if let Some(last) = rows.last() {
                state.sell(last.price());
                if let Some(trade) = open.take() {
                    trades.push(trade.close(last.price(), last.date(), true));
                }
            }
        }

        SimulationOutcome {
            final_fund: round_cents(state.cash),
            trades,
            end_state,
        }
    }
}

/// Rounds to whole cents, sending exact half-cent ties to the even cent.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
