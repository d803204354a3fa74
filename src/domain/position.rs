//! Position state and completed round-trip trades.

use std::fmt;

/// The agent's holding state. Entry data only exists while holding.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Position {
    #[default]
    Flat,
    Holding { entry_price: f64, entry_time: String },
}

impl Position {
    pub fn is_flat(&self) -> bool {
        matches!(self, Position::Flat)
    }

    pub fn is_holding(&self) -> bool {
        matches!(self, Position::Holding { .. })
    }

    pub fn entry_price(&self) -> Option<f64> {
        match self {
            Position::Flat => None,
            Position::Holding { entry_price, .. } => Some(*entry_price),
        }
    }

    /// Mark-to-market PnL of the open position at `price`; zero when flat.
    pub fn unrealized_pnl(&self, price: f64, amount: f64) -> f64 {
        match self {
            Position::Flat => 0.0,
            Position::Holding { entry_price, .. } => (price - entry_price) * amount,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Flat => write!(f, "flat"),
            Position::Holding {
                entry_price,
                entry_time,
            } => write!(f, "holding since {entry_time} at {entry_price}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub buy_price: f64,
    pub sell_price: f64,
    pub amount: f64,
    pub buy_time: String,
    pub sell_time: String,
}

impl Transaction {
    pub fn pnl(&self) -> f64 {
        (self.sell_price - self.buy_price) * self.amount
    }

    /// `sell / buy - 1`, or `None` when the entry price is not positive.
    pub fn return_pct(&self) -> Option<f64> {
        (self.buy_price > 0.0).then(|| self.sell_price / self.buy_price - 1.0)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(buy_price={}, sell_price={}, amount={}, buy_time={:?}, sell_time={:?})",
            self.buy_price, self.sell_price, self.amount, self.buy_time, self.sell_time
        )
    }
}
