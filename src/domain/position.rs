//! Single-instrument position state and the closed-trade record.

use chrono::NaiveDate;

/// Cash plus a whole number of shares of one instrument, long only.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionState {
    pub in_position: bool,
    pub shares: u64,
    pub cash: f64,
}

impl PositionState {
    pub fn flat(cash: f64) -> Self {
        PositionState {
            in_position: false,
            shares: 0,
            cash,
        }
    }

    /// Buys as many whole shares as cash allows. Returns the share count.
    ///
    /// The state becomes long even when cash covers zero shares.
    pub fn buy(&mut self, price: f64) -> u64 {
        let shares = if price > 0.0 {
            (self.cash / price).floor().max(0.0) as u64
        } else {
            0
        };
        self.cash -= shares as f64 * price;
        self.shares = shares;
        self.in_position = true;
        shares
    }

    /// Sells every held share. Returns the share count sold.
    pub fn sell(&mut self, price: f64) -> u64 {
        let shares = self.shares;
        self.cash += shares as f64 * price;
        self.shares = 0;
        self.in_position = false;
        shares
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClosedTrade {
    pub shares: u64,
    pub entry_price: f64,
    pub exit_price: f64,
    pub entry_date: NaiveDate,
    pub exit_date: NaiveDate,
    pub pnl: f64,
    /// Closed by the end-of-series liquidation rather than a sell signal.
    pub forced_exit: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_state() {
        let s = PositionState::flat(100.0);
        assert!(!s.in_position);
        assert_eq!(s.shares, 0);
        assert!((s.cash - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn buy_floors_share_count() {
        let mut s = PositionState::flat(100.0);
        let shares = s.buy(12.0);
        assert_eq!(shares, 8);
        assert!(s.in_position);
        assert!((s.cash - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn buy_with_insufficient_cash_still_long() {
        let mut s = PositionState::flat(5.0);
        assert_eq!(s.buy(12.0), 0);
        assert!(s.in_position);
        assert!((s.cash - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn sell_returns_cash() {
        let mut s = PositionState::flat(100.0);
        s.buy(12.0);
        let sold = s.sell(9.0);
        assert_eq!(sold, 8);
        assert!(!s.in_position);
        assert_eq!(s.shares, 0);
        assert!((s.cash - 76.0).abs() < f64::EPSILON);
    }
}
