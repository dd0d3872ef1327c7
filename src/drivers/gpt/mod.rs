//! General Purpose Timer driver.
//!
//! Brings the free-running counter up at a fixed tick rate and exposes it
//! as the boot tick source.

pub mod regs;

#[cfg(test)]
pub(crate) mod mock;

use crate::config::GptConfig;
use crate::drivers::clock::ClockProvider;
use crate::drivers::error::DriverError;

use self::regs::{field_bits, GptReg, RegisterIo, CR, PR};

/// Counter clock input, as encoded in `CR.CLKSRC`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockSource {
    NoClock,
    PeripheralClock,
    HighFrequencyClock,
    ExternalClock,
    LowFrequencyClock,
    Crystal24M,
}

impl ClockSource {
    /// Raw `CR` bits selecting this source.
    pub fn bits(self) -> u32 {
        let value = match self {
            ClockSource::NoClock => CR::CLKSRC::NoClock,
            ClockSource::PeripheralClock => CR::CLKSRC::PeripheralClock,
            ClockSource::HighFrequencyClock => CR::CLKSRC::HighFrequencyClock,
            ClockSource::ExternalClock => CR::CLKSRC::ExternalClock,
            ClockSource::LowFrequencyClock => CR::CLKSRC::LowFrequencyClock,
            ClockSource::Crystal24M => CR::CLKSRC::Crystal24M,
        };
        value.value
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerState {
    Uninitialized,
    Running,
}

/// Picks the rate the prescaler is derived from.
///
/// A zero, negative or out of range report from the clock tree is replaced
/// by `fallback`.
pub fn usable_rate(raw: i64, fallback: u32) -> u32 {
    u32::try_from(raw)
        .ok()
        .filter(|rate| *rate > 0)
        .unwrap_or(fallback)
}

/// Divider taking `rate` down to `target`.
///
/// A rate below the target divides by one.
pub fn prescaler_for(rate: u32, target: u32) -> u32 {
    (rate / target.max(1)).max(1)
}

/// `PR` bits for `prescaler`, truncated to the field width.
pub fn prescaler_field(prescaler: u32) -> u32 {
    prescaler & field_bits(PR::PRESCALER)
}

/// Tick rate reported for `rate` divided by `prescaler`.
pub fn effective_rate(rate: u32, prescaler: u32) -> u32 {
    rate / prescaler.max(1)
}

pub struct GptTimer<R: RegisterIo> {
    regs: R,
    config: GptConfig,
    state: TimerState,
    clock_rate: u32,
}

impl<R: RegisterIo> GptTimer<R> {
    pub fn new(regs: R, config: GptConfig) -> Self {
        GptTimer {
            regs,
            config,
            state: TimerState::Uninitialized,
            clock_rate: 0,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Effective tick rate, known once the timer runs.
    pub fn clock_rate(&self) -> Option<u32> {
        match self.state {
            TimerState::Running => Some(self.clock_rate),
            TimerState::Uninitialized => None,
        }
    }

    /// Resets the timer and starts the counter from `clk`.
    ///
    /// Returns the effective tick rate. Calling it again repeats the whole
    /// sequence.
    pub fn init<C: ClockProvider + ?Sized>(&mut self, clk: &C) -> Result<u32, DriverError> {
        self.state = TimerState::Uninitialized;

        if let Err(code) = clk.enable() {
            error!("gpt: failed to enable clock {} ({})", clk.name(), code);
            return Err(DriverError::ClockEnableFailure(code));
        }

        self.reset()?;

        let raw = clk.get_rate();
        let rate = usable_rate(raw, self.config.fallback_rate);
        if i64::from(rate) != raw {
            warn!(
                "gpt: clock {} reports rate {}, assuming {} Hz",
                clk.name(),
                raw,
                rate
            );
        }

        let prescaler = prescaler_for(rate, self.config.target_rate);
        let field = prescaler_field(prescaler);
        if field != prescaler {
            warn!("gpt: prescaler {} truncated to {:#x}", prescaler, field);
        }
        self.regs.write32(GptReg::Pr, field);
        let clock_rate = effective_rate(rate, prescaler);

        self.regs.clearbits32(GptReg::Cr, field_bits(CR::CLKSRC));
        let mut source = self.config.clock_source.bits();
        if self.config.clock_source == ClockSource::Crystal24M {
            source |= field_bits(CR::EN_24M);
        }
        self.regs.setbits32(GptReg::Cr, source);

        self.regs.setbits32(GptReg::Cr, field_bits(CR::EN));

        self.clock_rate = clock_rate;
        self.state = TimerState::Running;
        info!(
            "gpt: running at {} Hz (input {} Hz, prescaler {})",
            clock_rate, rate, prescaler
        );
        Ok(clock_rate)
    }

    /// Raw counter value. The hardware counter wraps at 32 bits.
    pub fn get_count(&self) -> u64 {
        u64::from(self.regs.read32(GptReg::Cnt))
    }

    fn reset(&self) -> Result<(), DriverError> {
        let swr = field_bits(CR::SWR);
        self.regs.setbits32(GptReg::Cr, swr);
        for _ in 0..self.config.reset_poll_limit {
            if self.regs.read32(GptReg::Cr) & swr == 0 {
                return Ok(());
            }
            core::hint::spin_loop();
        }
        error!(
            "gpt: reset bit still set after {} polls",
            self.config.reset_poll_limit
        );
        Err(DriverError::ResetTimeout)
    }
}
