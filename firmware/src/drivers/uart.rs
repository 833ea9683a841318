//! 16550 UART transmit path used by the serial logger

use core::fmt;

use bios_api::RegisterPort;
use bios_api::status::LineStatus;

use crate::utils::poll_until;

pub const COM1_BASE: u16 = 0x3F8;

const UART_DATA: u16 = 0;
const UART_IER: u16 = 1;
const UART_FCR: u16 = 2;
const UART_LCR: u16 = 3;
const UART_MCR: u16 = 4;
const UART_LSR: u16 = 5;
const UART_DLAB: u8 = 0x80;

/// Transmit-empty polls before a byte is dropped
const TX_BUDGET: u32 = 100;

/// Polled 16550 UART.
pub struct Uart<P> {
    port: P,
    base: u16,
}

impl<P: RegisterPort> Uart<P> {
    pub const fn new(port: P, base: u16) -> Self {
        Self { port, base }
    }

    /// 38400 baud, 8N1, FIFOs enabled, interrupts off.
    pub fn init(&mut self) {
        self.port.write8(self.base + UART_IER, 0x00);
        self.port.write8(self.base + UART_LCR, UART_DLAB);
        self.port.write8(self.base + UART_DATA, 0x03);
        self.port.write8(self.base + UART_IER, 0x00);
        self.port.write8(self.base + UART_LCR, 0x03);
        self.port.write8(self.base + UART_FCR, 0xC7);
        self.port.write8(self.base + UART_MCR, 0x0B);
    }

    /// Send one byte; dropped if the transmitter never drains.
    pub fn write_byte(&mut self, byte: u8) -> bool {
        let lsr = self.base + UART_LSR;
        let port = &mut self.port;
        let ready = poll_until(TX_BUDGET, || {
            LineStatus::from_bits_retain(port.read8(lsr)).contains(LineStatus::TRANSMIT_EMPTY)
        });
        if ready.is_ready() {
            self.port.write8(self.base + UART_DATA, byte);
        }
        ready.is_ready()
    }

    pub fn into_inner(self) -> P {
        self.port
    }
}

impl<P: RegisterPort> fmt::Write for Uart<P> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            if byte == b'\n' {
                self.write_byte(b'\r');
            }
            self.write_byte(byte);
        }
        Ok(())
    }
}
