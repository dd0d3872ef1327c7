use core::fmt;
use core::fmt::Write;

use spin::Mutex;

/// Byte sink the firmware console writes through.
pub type PutcFn = fn(u8);

pub struct Writer {
    putc: Option<PutcFn>,
}

static LOCK: Mutex<Writer> = Mutex::new(Writer { putc: None });

impl fmt::Write for Writer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if let Some(putc) = self.putc {
            for b in s.bytes() {
                if b == b'\n' {
                    putc(b'\r');
                }
                putc(b);
            }
        }
        Ok(())
    }
}

/// Routes console output to `putc`. Output before this is discarded.
pub fn set_console(putc: PutcFn) {
    LOCK.lock().putc = Some(putc);
}

pub fn print_arg(args: fmt::Arguments) {
    let mut lock = LOCK.lock();
    let _ = lock.write_fmt(args);
}
