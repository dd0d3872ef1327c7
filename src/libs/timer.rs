//! Tick arithmetic over a [`TimerOps`] source: uptime, timeouts and delays.

use crate::libs::traits::TimerOps;

pub const TIMER_SEC_TO_MS: u64 = 1000;
pub const TIMER_SEC_TO_US: u64 = 1000_000;

/// Ticks from `start` to `now` on a counter `bits` wide.
pub fn elapsed_ticks(start: u64, now: u64, bits: u32) -> u64 {
    let mask = if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    };
    now.wrapping_sub(start) & mask
}

/// Converts ticks at `rate` Hz to microseconds, rounding down.
pub fn ticks_to_us(ticks: u64, rate: u32) -> u64 {
    if rate == 0 {
        return 0;
    }
    let us = u128::from(ticks) * u128::from(TIMER_SEC_TO_US) / u128::from(rate);
    u64::try_from(us).unwrap_or(u64::MAX)
}

/// Converts ticks at `rate` Hz to milliseconds, rounding down.
pub fn ticks_to_ms(ticks: u64, rate: u32) -> u64 {
    ticks_to_us(ticks, rate) / (TIMER_SEC_TO_US / TIMER_SEC_TO_MS)
}

/// Converts microseconds to ticks at `rate` Hz, rounding up.
pub fn us_to_ticks(us: u64, rate: u32) -> u64 {
    let ticks = (u128::from(us) * u128::from(rate) + u128::from(TIMER_SEC_TO_US) - 1)
        / u128::from(TIMER_SEC_TO_US);
    u64::try_from(ticks).unwrap_or(u64::MAX)
}

/// Extends a wrapping hardware counter into a monotonic 64-bit tick count.
///
/// The counter must be sampled at least once per wrap period, otherwise
/// whole periods are lost.
#[derive(Clone, Copy, Debug, Default)]
pub struct Uptime {
    last: u64,
    ticks: u64,
}

impl Uptime {
    pub const fn new() -> Self {
        Uptime { last: 0, ticks: 0 }
    }

    /// Starts counting from the timer's current value.
    pub fn start<T: TimerOps + ?Sized>(timer: &T) -> Self {
        Uptime {
            last: timer.get_count(),
            ticks: 0,
        }
    }

    /// Samples the timer and returns the accumulated ticks.
    pub fn update<T: TimerOps + ?Sized>(&mut self, timer: &T) -> u64 {
        let now = timer.get_count();
        self.ticks += elapsed_ticks(self.last, now, timer.counter_bits());
        self.last = now;
        self.ticks
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// A deadline measured on a timer.
pub struct Timeout<'a, T: TimerOps + ?Sized> {
    timer: &'a T,
    uptime: Uptime,
    deadline: u64,
}

impl<'a, T: TimerOps + ?Sized> Timeout<'a, T> {
    pub fn from_us(timer: &'a T, us: u64) -> Self {
        Timeout {
            timer,
            uptime: Uptime::start(timer),
            deadline: us_to_ticks(us, timer.clock_rate()),
        }
    }

    pub fn from_ms(timer: &'a T, ms: u64) -> Self {
        Self::from_us(timer, ms.saturating_mul(TIMER_SEC_TO_US / TIMER_SEC_TO_MS))
    }

    pub fn expired(&mut self) -> bool {
        self.uptime.update(self.timer) >= self.deadline
    }

    /// Microseconds since the timeout was armed.
    pub fn elapsed_us(&self) -> u64 {
        ticks_to_us(self.uptime.ticks(), self.timer.clock_rate())
    }
}

/// Busy-waits for at least `us` microseconds.
pub fn delay_us<T: TimerOps + ?Sized>(timer: &T, us: u64) {
    let mut timeout = Timeout::from_us(timer, us);
    while !timeout.expired() {
        core::hint::spin_loop();
    }
}

pub fn delay_ms<T: TimerOps + ?Sized>(timer: &T, ms: u64) {
    delay_us(timer, ms.saturating_mul(1000));
}

/// Microseconds represented by the timer's raw counter value.
pub fn current_us<T: TimerOps + ?Sized>(timer: &T) -> u64 {
    ticks_to_us(timer.get_count(), timer.clock_rate())
}

/// Milliseconds represented by the timer's raw counter value.
pub fn current_ms<T: TimerOps + ?Sized>(timer: &T) -> u64 {
    ticks_to_ms(timer.get_count(), timer.clock_rate())
}
