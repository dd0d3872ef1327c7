//! Clock providers consumed by drivers.

use core::sync::atomic::{AtomicBool, Ordering};

/// An upstream clock a driver can enable and query.
pub trait ClockProvider {
    fn name(&self) -> &str;

    /// Ungates the clock. Errors carry the provider's error code.
    fn enable(&self) -> Result<(), i32>;

    /// Current rate in Hz. Zero or negative means the rate is unknown.
    fn get_rate(&self) -> i64;
}

/// A clock running at a rate fixed by the board.
#[derive(Debug)]
pub struct FixedClock {
    name: &'static str,
    rate: i64,
    enabled: AtomicBool,
}

impl FixedClock {
    pub const fn new(name: &'static str, rate: i64) -> Self {
        FixedClock {
            name,
            rate,
            enabled: AtomicBool::new(false),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }
}

impl ClockProvider for FixedClock {
    fn name(&self) -> &str {
        self.name
    }

    fn enable(&self) -> Result<(), i32> {
        if !self.enabled.swap(true, Ordering::AcqRel) {
            debug!("clock {} enabled at {} Hz", self.name, self.rate);
        }
        Ok(())
    }

    fn get_rate(&self) -> i64 {
        self.rate
    }
}
