//! Serial logger
//!
//! `log` backend writing one `[LEVEL] target: message` line per record to a
//! 16550 UART. Installed once by the bare-metal entry.

use core::fmt::Write;

use bios_api::RegisterPort;
use log::{LevelFilter, Log, Metadata, Record};
use spin::Mutex;

use crate::drivers::uart::Uart;

pub struct SerialLogger<P> {
    uart: Mutex<Uart<P>>,
    level: LevelFilter,
}

impl<P: RegisterPort> SerialLogger<P> {
    pub const fn new(port: P, base: u16, level: LevelFilter) -> Self {
        Self {
            uart: Mutex::new(Uart::new(port, base)),
            level,
        }
    }

    /// Program the UART. Safe to call before the logger is installed.
    pub fn init(&self) {
        self.uart.lock().init();
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    pub fn into_port(self) -> P {
        self.uart.into_inner().into_inner()
    }
}

impl<P: RegisterPort + Send> Log for SerialLogger<P> {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut uart = self.uart.lock();
        // Newlines become CRLF in the UART writer
        let _ = writeln!(uart, "[{}] {}: {}", record.level(), record.target(), record.args());
    }

    fn flush(&self) {}
}
