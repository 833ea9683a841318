//! Status register bit sets

use bitflags::bitflags;

bitflags! {
    /// ATA command block status register (`0x1F7`)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AtaStatus: u8 {
        const ERROR = 0x01;
        const DATA_REQUEST = 0x08;
        const DEVICE_FAULT = 0x20;
        const READY = 0x40;
        const BUSY = 0x80;
    }
}

bitflags! {
    /// 8042 keyboard controller status register (`0x64`)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct KbcStatus: u8 {
        const OUTPUT_FULL = 0x01;
        const INPUT_FULL = 0x02;
        const SYSTEM = 0x04;
        const COMMAND = 0x08;
        /// Transmit timeout on AT controllers; treated as a transfer error
        const TRANSFER_ERROR = 0x20;
        const RECEIVE_TIMEOUT = 0x40;
        const PARITY_ERROR = 0x80;
    }
}

bitflags! {
    /// RTC status register A (`0x0A`)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RtcStatusA: u8 {
        const UPDATE_IN_PROGRESS = 0x80;
    }
}

bitflags! {
    /// RTC status register B (`0x0B`)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RtcStatusB: u8 {
        const DAYLIGHT_SAVING = 0x01;
        const HOUR_24 = 0x02;
        const BINARY = 0x04;
    }
}

bitflags! {
    /// 16550 UART line status register
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LineStatus: u8 {
        const DATA_READY = 0x01;
        const TRANSMIT_EMPTY = 0x20;
    }
}
