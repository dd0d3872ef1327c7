use log::{Level, Metadata, Record};
use log::{LevelFilter, SetLoggerError};
use spin::{Mutex, Once};

use crate::libs::timer::{ticks_to_ms, Uptime};
use crate::libs::traits::TimerOps;

struct SimpleLogger;

static LOCK: Mutex<()> = Mutex::new(());

static TIME_SOURCE: Once<&'static (dyn TimerOps + Sync)> = Once::new();
static UPTIME: Mutex<Uptime> = Mutex::new(Uptime::new());

/// Timestamps log records with `timer`. Only the first registration sticks.
pub fn set_time_source(timer: &'static (dyn TimerOps + Sync)) {
    let mut registered = false;
    let timer = TIME_SOURCE.call_once(|| {
        registered = true;
        timer
    });
    if registered {
        *UPTIME.lock() = Uptime::start(*timer);
    }
}

fn current_ms() -> u64 {
    match TIME_SOURCE.get() {
        Some(timer) => {
            let ticks = UPTIME.lock().update(*timer);
            ticks_to_ms(ticks, timer.clock_rate())
        }
        None => 0,
    }
}

impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        let lock = LOCK.lock();
        if self.enabled(record.metadata()) {
            let ms = current_ms();
            let s = ms / 1000;
            let ms = ms % 1000;
            print!("[{:04}.{:03}]", s, ms);

            match record.level() {
                Level::Error => print!("[E]"),
                Level::Warn => print!("[W]"),
                Level::Info => print!("[I]"),
                Level::Debug => print!("[D]"),
                Level::Trace => print!("[T]"),
            }
            if let Some(m) = record.module_path() {
                print!("[{}]", m);
            }
            print!(" {}", record.args());
            println!();
        }
        drop(lock);
    }

    fn flush(&self) {}
}

static LOGGER: SimpleLogger = SimpleLogger;

pub fn init() -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER).map(|()| log::set_max_level(LevelFilter::Trace))
}

#[cfg(test)]
mod tests {
    use core::sync::atomic::{AtomicU64, Ordering};
    use std::string::String;
    use std::vec::Vec;

    use super::*;

    static CAPTURED: Mutex<Vec<u8>> = Mutex::new(Vec::new());

    fn capture(b: u8) {
        CAPTURED.lock().push(b);
    }

    struct FakeTimer(AtomicU64);

    impl TimerOps for FakeTimer {
        fn get_count(&self) -> u64 {
            self.0.load(Ordering::SeqCst)
        }

        fn clock_rate(&self) -> u32 {
            1_000_000
        }
    }

    static FAKE: FakeTimer = FakeTimer(AtomicU64::new(1_500_000));

    #[test]
    fn records_carry_uptime_level_and_module() {
        crate::libs::print::set_console(capture);
        init().unwrap();
        set_time_source(&FAKE);
        FAKE.0.store(1_500_000 + 2_345_000, Ordering::SeqCst);

        info!("gpt ready");

        let out = String::from_utf8(CAPTURED.lock().clone()).unwrap();
        assert!(out.contains("[0002.345][I][imxrt_gpt::logger::tests] gpt ready\r\n"));
    }
}
