use core::fmt;
use core::ops::Range;

use crate::config::GptConfig;
use crate::drivers::clock::ClockProvider;
use crate::drivers::error::DriverError;
use crate::drivers::gpt::regs::{GptMmio, RegisterIo};
use crate::drivers::gpt::GptTimer;
use crate::libs::traits::TimerOps;

/// A clock as referenced from a device table.
pub type ClockRef<'a> = &'a (dyn ClockProvider + Sync);

/// Compatible strings claimed by the GPT driver.
pub const GPT_COMPATIBLE: &[&str] = &["fsl,imxrt-gpt"];

/// A device node from the board's hardware description.
pub struct Device<'a> {
    pub name: &'static str,
    pub compatible: &'static str,
    pub registers: Option<Range<usize>>,
    pub clocks: &'a [ClockRef<'a>],
}

impl<'a> Device<'a> {
    pub fn new(
        name: &'static str,
        compatible: &'static str,
        registers: Option<Range<usize>>,
        clocks: &'a [ClockRef<'a>],
    ) -> Self {
        Self {
            name,
            compatible,
            registers,
            clocks,
        }
    }

    /// Base of the register range, if the node has one.
    pub fn addr(&self) -> Option<usize> {
        self.registers.as_ref().map(|r| r.start)
    }

    pub fn clock(&self, index: usize) -> Option<ClockRef<'a>> {
        self.clocks.get(index).copied()
    }

    pub fn is_compatible(&self, ids: &[&str]) -> bool {
        ids.contains(&self.compatible)
    }
}

impl fmt::Debug for Device<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Device")
            .field("name", &self.name)
            .field("compatible", &self.compatible)
            .field("registers", &self.registers)
            .field("clocks", &self.clocks.len())
            .finish()
    }
}

/// A probed timer with the tick rate it reported.
pub struct TimerDevice<R: RegisterIo> {
    name: &'static str,
    clock_rate: u32,
    timer: GptTimer<R>,
}

impl<R: RegisterIo> TimerDevice<R> {
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<R: RegisterIo> TimerOps for TimerDevice<R> {
    fn get_count(&self) -> u64 {
        self.timer.get_count()
    }

    fn clock_rate(&self) -> u32 {
        self.clock_rate
    }
}

/// Probes a memory-mapped GPT described by `dev`.
///
/// # Safety
///
/// The register range of `dev` must map a GPT that nothing else drives.
pub unsafe fn probe(dev: &Device<'_>, config: GptConfig) -> Result<TimerDevice<GptMmio>, DriverError> {
    if !dev.is_compatible(GPT_COMPATIBLE) {
        return Err(DriverError::NoMatchingDriver);
    }
    let regs = GptMmio::from_addr(dev.addr())?;
    probe_with(dev, regs, config)
}

/// Probes `dev` using an already resolved register backend.
pub fn probe_with<R: RegisterIo>(
    dev: &Device<'_>,
    regs: R,
    config: GptConfig,
) -> Result<TimerDevice<R>, DriverError> {
    let clk = dev.clock(0).ok_or_else(|| {
        error!("{}: no clock", dev.name);
        DriverError::ClockLookupFailure
    })?;

    let mut timer = GptTimer::new(regs, config);
    let clock_rate = timer.init(clk)?;
    debug!("{}: probed, clock {} at {} Hz", dev.name, clk.name(), clock_rate);

    Ok(TimerDevice {
        name: dev.name,
        clock_rate,
        timer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::clock::FixedClock;
    use crate::drivers::gpt::mock::MockRegisters;
    use crate::drivers::gpt::regs::GptReg;

    static IPG_CLK: FixedClock = FixedClock::new("ipg_clk", 24_000_000);

    #[test]
    fn unresolved_address_fails_before_clock() {
        let clk = FixedClock::new("ipg_clk", 24_000_000);
        let clocks: [ClockRef; 1] = [&clk];
        let dev = Device::new("gpt1", "fsl,imxrt-gpt", None, &clocks);

        assert_eq!(
            unsafe { probe(&dev, GptConfig::default()) }.err(),
            Some(DriverError::InvalidAddress)
        );
        assert!(!clk.is_enabled());
    }

    #[test]
    fn foreign_compatible_is_not_claimed() {
        let dev = Device::new("uart1", "fsl,imxrt-lpuart", Some(0x4018_4000..0x4018_4040), &[]);
        assert_eq!(
            unsafe { probe(&dev, GptConfig::default()) }.err(),
            Some(DriverError::NoMatchingDriver)
        );
    }

    #[test]
    fn missing_clock_is_a_lookup_failure() {
        let regs = MockRegisters::new();
        let dev = Device::new("gpt1", "fsl,imxrt-gpt", Some(0x401e_c000..0x401e_c028), &[]);
        assert_eq!(
            probe_with(&dev, &regs, GptConfig::default()).err(),
            Some(DriverError::ClockLookupFailure)
        );
        assert!(regs.writes().is_empty());
    }

    #[test]
    fn probed_device_caches_rate() {
        let regs = MockRegisters::new();
        let clocks: [ClockRef; 1] = [&IPG_CLK];
        let dev = Device::new("gpt1", "fsl,imxrt-gpt", Some(0x401e_c000..0x401e_c028), &clocks);

        let timer = probe_with(&dev, &regs, GptConfig::default()).unwrap();
        assert!(IPG_CLK.is_enabled());
        assert_eq!(timer.name(), "gpt1");
        assert_eq!(timer.clock_rate(), 1_000_000);
        regs.poke(GptReg::Cnt, 42);
        assert_eq!(timer.get_count(), 42);
        assert_eq!(timer.counter_bits(), 32);
    }
}
