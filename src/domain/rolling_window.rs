//! Fixed-capacity circular price buffer.
//!
//! Slots start at zero and are overwritten at `step mod len`, so before `len`
//! observations the mean still averages over the zero padding.

#[derive(Debug, Clone, PartialEq)]
pub struct RollingWindow {
    slots: Vec<f64>,
}

impl RollingWindow {
    /// A window of `len` zeroed slots.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero. `TradingAgent::new` rejects zero lengths
    /// before any window is built.
    pub fn new(len: usize) -> Self {
        assert!(len > 0, "rolling window length must be positive");
        RollingWindow {
            slots: vec![0.0; len],
        }
    }

    /// Write `value` into the slot owned by `step`.
    pub fn record(&mut self, step: u64, value: f64) {
        let idx = (step % self.slots.len() as u64) as usize;
        self.slots[idx] = value;
    }

    /// Mean over every slot, padding included.
    pub fn mean(&self) -> f64 {
        self.slots.iter().sum::<f64>() / self.slots.len() as f64
    }

    pub fn values(&self) -> &[f64] {
        &self.slots
    }
}
