//! Driver for the i.MX RT General Purpose Timer, used by boot firmware as
//! its tick source for delays, timeouts and uptime.
#![cfg_attr(not(test), no_std)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate derive_more;
#[macro_use]
extern crate static_assertions;

#[macro_use]
mod macros;

pub mod config;
pub mod drivers;
pub mod libs;
pub mod logger;

#[cfg(any(feature = "imxrt1050", feature = "imxrt1020"))]
pub mod board;

pub use config::GptConfig;
pub use drivers::{ClockProvider, ClockSource, DriverError, FixedClock, GptTimer, TimerState};
pub use libs::device::{probe, probe_with, Device, TimerDevice};
pub use libs::traits::TimerOps;
