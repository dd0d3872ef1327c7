//! Timer configuration.

use crate::drivers::gpt::ClockSource;

/// Tick rate the prescaler aims for, in Hz.
pub const TARGET_TICK_RATE: u32 = 1_000_000;

/// Rate assumed when the clock tree reports no usable rate, in Hz.
pub const FALLBACK_CLOCK_RATE: u32 = 1_056_000_000;

/// Control register reads allowed while waiting for software reset to finish.
pub const RESET_POLL_LIMIT: u32 = 100_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GptConfig {
    pub target_rate: u32,
    pub fallback_rate: u32,
    pub clock_source: ClockSource,
    pub reset_poll_limit: u32,
}

impl Default for GptConfig {
    fn default() -> Self {
        GptConfig {
            target_rate: TARGET_TICK_RATE,
            fallback_rate: FALLBACK_CLOCK_RATE,
            clock_source: ClockSource::PeripheralClock,
            reset_poll_limit: RESET_POLL_LIMIT,
        }
    }
}

impl GptConfig {
    pub fn with_target_rate(mut self, rate: u32) -> Self {
        self.target_rate = rate;
        self
    }

    pub fn with_fallback_rate(mut self, rate: u32) -> Self {
        self.fallback_rate = rate;
        self
    }

    pub fn with_clock_source(mut self, source: ClockSource) -> Self {
        self.clock_source = source;
        self
    }

    pub fn with_reset_poll_limit(mut self, limit: u32) -> Self {
        self.reset_poll_limit = limit;
        self
    }
}
