use spin::Once;

use crate::config::GptConfig;
use crate::drivers::error::DriverError;
use crate::drivers::gpt::regs::GptMmio;
use crate::libs::device::{probe, TimerDevice, GPT_COMPATIBLE};
use crate::libs::traits::TimerOps;

cfg_if::cfg_if! {
    if #[cfg(feature = "imxrt1050")] {
        mod imxrt1050;
        pub use imxrt1050::*;
    } else if #[cfg(feature = "imxrt1020")] {
        mod imxrt1020;
        pub use imxrt1020::*;
    }
}

static SYSTEM_TIMER: Once<TimerDevice<GptMmio>> = Once::new();

/// The timer published by [`init`], if it succeeded.
pub fn system_timer() -> Option<&'static TimerDevice<GptMmio>> {
    SYSTEM_TIMER.get()
}

/// Probes the first GPT of the board and makes it the boot tick source.
pub fn init() -> Result<&'static TimerDevice<GptMmio>, DriverError> {
    if let Some(timer) = SYSTEM_TIMER.get() {
        return Ok(timer);
    }

    let devices = devices();
    let dev = devices
        .iter()
        .find(|dev| dev.is_compatible(GPT_COMPATIBLE))
        .ok_or(DriverError::NoMatchingDriver)?;
    // The board table describes GPT blocks nothing else drives.
    let timer = unsafe { probe(dev, GptConfig::default()) }.map_err(|err| {
        error!("{}: probe failed: {}", dev.name, err);
        err
    })?;

    let timer = SYSTEM_TIMER.call_once(|| timer);
    crate::logger::set_time_source(timer);
    info!(
        "{}: system timer at {} Hz on {}",
        timer.name(),
        timer.clock_rate(),
        BOARD_NAME
    );
    Ok(timer)
}
