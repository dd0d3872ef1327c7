/// Operations a timer device offers to the rest of the firmware.
pub trait TimerOps {
    /// Raw counter value. Wraps at the width of the hardware counter.
    fn get_count(&self) -> u64;
    /// Tick rate of the counter in Hz.
    fn clock_rate(&self) -> u32;
    /// Width of the hardware counter in bits.
    fn counter_bits(&self) -> u32 {
        32
    }
}
