//! Replay driver: pulls bars from a source and pushes them into the agent.

use tracing::{debug, info, warn};

use crate::domain::agent::{Action, AgentConfig, TradingAgent};
use crate::domain::error::BarsimError;
use crate::domain::metrics::TradeStats;
use crate::domain::position::{Position, Transaction};
use crate::ports::data_port::BarSource;

pub const DEFAULT_MAX_ITERATIONS: usize = 50_000;

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub steps: u64,
    pub config: AgentConfig,
    pub pnl: f64,
    pub transactions: Vec<Transaction>,
    pub final_position: Position,
    pub last_close: Option<f64>,
    /// The iteration cap ended the run; the source may still hold bars.
    pub truncated: bool,
}

impl SimulationResult {
    pub fn stats(&self) -> TradeStats {
        TradeStats::compute(&self.transactions)
    }

    /// Mark-to-market value of a still-open position at the last close.
    pub fn unrealized_pnl(&self) -> f64 {
        self.last_close
            .map(|close| self.final_position.unrealized_pnl(close, self.config.amount))
            .unwrap_or(0.0)
    }
}

/// Replay `source` into `agent` until the source runs dry or
/// `max_iterations` bars have been stepped.
///
/// A malformed record aborts the run; the agent is not stepped for it.
pub fn run_simulation(
    source: &mut dyn BarSource,
    agent: &mut TradingAgent,
    max_iterations: Option<usize>,
) -> Result<SimulationResult, BarsimError> {
    let config = agent.config();
    info!(
        buy_len = config.buy_len,
        sell_len = config.sell_len,
        amount = config.amount,
        max_iterations = ?max_iterations,
        "starting replay"
    );

    let mut steps: u64 = 0;
    let mut last_close = None;
    let mut truncated = false;

    loop {
        if max_iterations.is_some_and(|cap| steps >= cap as u64) {
            truncated = true;
            break;
        }

        let bar = match source.next_bar() {
            Ok(Some(bar)) => bar,
            Ok(None) => break,
            Err(err) => {
                if let BarsimError::MalformedRecord(record) = &err {
                    warn!(line = record.line(), steps, "malformed record, aborting replay");
                }
                return Err(err);
            }
        };

        match agent.step(&bar) {
            Action::Hold => {}
            Action::Buy { price } => debug!(step = steps, date = %bar.date, price, "buy"),
            Action::Sell { price } => debug!(step = steps, date = %bar.date, price, "sell"),
        }
        last_close = Some(bar.close);
        steps += 1;
    }

    if truncated {
        warn!(steps, "iteration cap reached before end of data");
    }

    let result = SimulationResult {
        steps,
        config: agent.config().clone(),
        pnl: agent.pnl(),
        transactions: agent.transactions().to_vec(),
        final_position: agent.position().clone(),
        last_close,
        truncated,
    };
    info!(
        steps,
        trades = result.transactions.len(),
        pnl = result.pnl,
        "replay finished"
    );
    Ok(result)
}
