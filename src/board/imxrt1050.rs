use core::ops::Range;

use crate::drivers::clock::FixedClock;
use crate::libs::device::{ClockRef, Device};

pub const BOARD_NAME: &str = "i.MX RT1050";

pub const BOARD_DEVICE_MEMORY_RANGE: Range<usize> = 0x4000_0000..0x4100_0000;

pub const GPT1_BASE: usize = 0x401e_c000;
pub const GPT2_BASE: usize = 0x401f_0000;
pub const GPT_REGION_SIZE: usize = 0x4000;

/// IPG_CLK_ROOT with the ARM core at 600 MHz.
pub const IPG_CLK_RATE: i64 = 150_000_000;

static IPG_CLK: FixedClock = FixedClock::new("ipg_clk", IPG_CLK_RATE);
static GPT_CLOCKS: [ClockRef<'static>; 1] = [&IPG_CLK];

pub fn devices() -> [Device<'static>; 2] {
    [
        Device::new(
            "gpt1",
            "fsl,imxrt-gpt",
            Some(GPT1_BASE..GPT1_BASE + GPT_REGION_SIZE),
            &GPT_CLOCKS,
        ),
        Device::new(
            "gpt2",
            "fsl,imxrt-gpt",
            Some(GPT2_BASE..GPT2_BASE + GPT_REGION_SIZE),
            &GPT_CLOCKS,
        ),
    ]
}
