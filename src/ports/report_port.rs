//! Report generation port trait.

use crate::domain::error::BarsimError;
use crate::domain::simulation::SimulationResult;

/// Port for rendering a finished simulation.
pub trait ReportPort {
    /// `show` caps how many ledger entries are listed.
    fn write(&mut self, result: &SimulationResult, show: usize) -> Result<(), BarsimError>;
}
