//! Bar source port trait.

use crate::domain::error::BarsimError;
use crate::domain::ohlcv::Bar;

/// A finite, forward-only sequence of bars in replay order.
pub trait BarSource {
    /// `Ok(None)` once the data is exhausted, and on every call after that.
    fn next_bar(&mut self) -> Result<Option<Bar>, BarsimError>;
}
