//! Plain-text run summary.

use std::io::Write;

use crate::domain::error::BarsimError;
use crate::domain::position::Position;
use crate::domain::simulation::SimulationResult;
use crate::ports::report_port::ReportPort;

pub const DEFAULT_SHOWN_TRANSACTIONS: usize = 3;

pub struct ConsoleReport<W: Write> {
    out: W,
}

impl<W: Write> ConsoleReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> ReportPort for ConsoleReport<W> {
    fn write(&mut self, result: &SimulationResult, show: usize) -> Result<(), BarsimError> {
        let out = &mut self.out;
        let config = &result.config;
        let stats = result.stats();

        writeln!(out, "Done simulating {} steps", result.steps)?;
        if result.truncated {
            writeln!(out, "(stopped at the iteration cap)")?;
        }
        writeln!(
            out,
            "Agent params: buy len {}, sell len {}, trade amount {}",
            config.buy_len, config.sell_len, config.amount
        )?;
        writeln!(out, "PnL: {:.3}", result.pnl)?;
        writeln!(
            out,
            "Trades: {} ({} winning), avg PnL {:.3}, best {:.3}, worst {:.3}, avg return {:.2}%",
            stats.total_trades,
            stats.winning_trades,
            stats.average_pnl,
            stats.best_trade,
            stats.worst_trade,
            stats.average_return * 100.0
        )?;
        match &result.final_position {
            Position::Flat => writeln!(out, "Open position: flat")?,
            pos @ Position::Holding { .. } => writeln!(
                out,
                "Open position: {} (unrealized {:.3})",
                pos,
                result.unrealized_pnl()
            )?,
        }

        let shown = show.min(result.transactions.len());
        writeln!(out, "First {} transactions:", shown)?;
        for tx in result.transactions.iter().take(shown) {
            writeln!(out, "{tx}")?;
        }
        out.flush()?;
        Ok(())
    }
}
