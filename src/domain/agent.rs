//! Rolling-average trading agent.
//!
//! Buys at a bar's high when it is below the mean of the buy window and sells
//! at a bar's low when it is above both the sell-window mean and the entry
//! price. Both windows are updated with the current bar before the rule is
//! evaluated, so once a window has filled its mean includes the current price.

use tracing::trace;

use crate::domain::error::BarsimError;
use crate::domain::ohlcv::Bar;
use crate::domain::position::{Position, Transaction};
use crate::domain::rolling_window::RollingWindow;

#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    pub buy_len: usize,
    pub sell_len: usize,
    pub amount: f64,
}

impl AgentConfig {
    pub fn validate(&self) -> Result<(), BarsimError> {
        if self.buy_len == 0 {
            return Err(BarsimError::invalid("agent", "buy_len", "buy_len must be positive"));
        }
        if self.sell_len == 0 {
            return Err(BarsimError::invalid("agent", "sell_len", "sell_len must be positive"));
        }
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(BarsimError::invalid(
                "agent",
                "amount",
                "amount must be a positive number",
            ));
        }
        Ok(())
    }
}

/// What a single step did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Hold,
    Buy { price: f64 },
    Sell { price: f64 },
}

#[derive(Debug, Clone)]
pub struct TradingAgent {
    config: AgentConfig,
    buy_window: RollingWindow,
    sell_window: RollingWindow,
    position: Position,
    ledger: Vec<Transaction>,
    realized_pnl: f64,
    step_count: u64,
}

impl TradingAgent {
    pub fn new(config: AgentConfig) -> Result<Self, BarsimError> {
        config.validate()?;
        Ok(TradingAgent {
            buy_window: RollingWindow::new(config.buy_len),
            sell_window: RollingWindow::new(config.sell_len),
            config,
            position: Position::Flat,
            ledger: Vec::new(),
            realized_pnl: 0.0,
            step_count: 0,
        })
    }

    /// Feed one bar. Bars must arrive in replay order.
    pub fn step(&mut self, bar: &Bar) -> Action {
        self.buy_window.record(self.step_count, bar.high);
        self.sell_window.record(self.step_count, bar.low);

        let action = if self.position.is_holding() {
            self.maybe_sell(bar)
        } else {
            self.maybe_buy(bar)
        };

        self.step_count += 1;
        action
    }

    fn maybe_buy(&mut self, bar: &Bar) -> Action {
        let buy_price = bar.high;
        let avg = self.buy_window.mean();
        if buy_price >= avg {
            return Action::Hold;
        }

        trace!(step = self.step_count, price = buy_price, avg, "open position");
        self.position = Position::Holding {
            entry_price: buy_price,
            entry_time: bar.date.clone(),
        };
        Action::Buy { price: buy_price }
    }

    fn maybe_sell(&mut self, bar: &Bar) -> Action {
        let sell_price = bar.low;
        let avg = self.sell_window.mean();

        match std::mem::take(&mut self.position) {
            Position::Holding {
                entry_price,
                entry_time,
            } if sell_price > avg && sell_price > entry_price => {
                let tx = Transaction {
                    buy_price: entry_price,
                    sell_price,
                    amount: self.config.amount,
                    buy_time: entry_time,
                    sell_time: bar.date.clone(),
                };
                trace!(step = self.step_count, price = sell_price, avg, pnl = tx.pnl(), "close position");
                self.realized_pnl += tx.pnl();
                self.ledger.push(tx);
                Action::Sell { price: sell_price }
            }
            held => {
                self.position = held;
                Action::Hold
            }
        }
    }

    /// Realized PnL recomputed from the ledger.
    pub fn pnl(&self) -> f64 {
        self.ledger.iter().map(Transaction::pnl).sum()
    }

    /// Realized PnL accumulated as trades close. Matches [`pnl`](Self::pnl)
    /// up to float rounding.
    pub fn realized_pnl(&self) -> f64 {
        self.realized_pnl
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.ledger
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }
}
