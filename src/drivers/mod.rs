pub mod clock;
pub mod error;
pub mod gpt;

pub use clock::{ClockProvider, FixedClock};
pub use error::DriverError;
pub use gpt::{ClockSource, GptTimer, TimerState};
