//! Clock Reader - tear-free real-time clock sampling
//!
//! A sample is retried from the update-in-progress wait whenever the seconds
//! register changed while the other fields were being read, so a returned
//! reading never straddles a clock tick. The retry itself is unbounded.

use core::fmt::Write;

use arrayvec::ArrayString;
use bios_api::status::{RtcStatusA, RtcStatusB};
use bios_api::{ClockReading, RegisterPort};

use crate::config::FirmwareConfig;
use crate::drivers::cmos::Cmos;
use crate::utils::bcd::bcd_to_binary;
use crate::utils::poll_until;

/// RTC registers in the CMOS bank
pub mod regs {
    pub const SECONDS: u8 = 0x00;
    pub const MINUTES: u8 = 0x02;
    pub const HOURS: u8 = 0x04;
    pub const WEEKDAY: u8 = 0x06;
    pub const DAY: u8 = 0x07;
    pub const MONTH: u8 = 0x08;
    pub const YEAR: u8 = 0x09;
    pub const STATUS_A: u8 = 0x0A;
    pub const STATUS_B: u8 = 0x0B;
}

/// PM flag in the hour register in 12-hour mode
const HOUR_PM: u8 = 0x80;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, Default)]
struct RawClock {
    second: u8,
    minute: u8,
    hour: u8,
    day: u8,
    month: u8,
    year: u8,
    weekday: u8,
    century: u8,
}

pub struct ClockReader<P> {
    cmos: Cmos<P>,
    update_budget: u32,
    century_register: Option<u8>,
}

impl<P: RegisterPort> ClockReader<P> {
    pub fn new(port: P, config: &FirmwareConfig) -> Self {
        Self {
            cmos: Cmos::new(port),
            update_budget: config.rtc_update_budget,
            century_register: config.rtc_century_register,
        }
    }

    /// Sample the clock, retrying until no tick landed inside the sample.
    pub fn read(&mut self) -> ClockReading {
        let format = RtcStatusB::from_bits_retain(self.cmos.read(regs::STATUS_B));
        let mut retries = 0u32;
        loop {
            self.wait_for_update();
            let raw = self.read_raw();
            let reading = normalize(&raw, format);
            if self.cmos.read(regs::SECONDS) == raw.second {
                if retries > 0 {
                    log::trace!("rtc: stable after {} retries", retries);
                }
                return reading;
            }
            retries += 1;
            log::trace!("rtc: torn read, retrying");
        }
    }

    /// Bounded wait for the update-in-progress flag to clear.
    fn wait_for_update(&mut self) {
        let cmos = &mut self.cmos;
        let outcome = poll_until(self.update_budget, || {
            !RtcStatusA::from_bits_retain(cmos.read(regs::STATUS_A))
                .contains(RtcStatusA::UPDATE_IN_PROGRESS)
        });
        if !outcome.is_ready() {
            log::warn!("rtc: update still in progress after {} polls", self.update_budget);
        }
    }

    fn read_raw(&mut self) -> RawClock {
        RawClock {
            second: self.cmos.read(regs::SECONDS),
            minute: self.cmos.read(regs::MINUTES),
            hour: self.cmos.read(regs::HOURS),
            day: self.cmos.read(regs::DAY),
            month: self.cmos.read(regs::MONTH),
            year: self.cmos.read(regs::YEAR),
            weekday: self.cmos.read(regs::WEEKDAY),
            century: match self.century_register {
                Some(reg) => self.cmos.read(reg),
                None => 0,
            },
        }
    }
}

fn normalize(raw: &RawClock, format: RtcStatusB) -> ClockReading {
    let binary = format.contains(RtcStatusB::BINARY);
    let field = |value: u8| if binary { value } else { bcd_to_binary(value) };

    let hour = if format.contains(RtcStatusB::HOUR_24) {
        field(raw.hour)
    } else {
        let hour = field(raw.hour & !HOUR_PM) % 12;
        if raw.hour & HOUR_PM != 0 { hour + 12 } else { hour }
    };

    let year = field(raw.year) as u16;
    let year = if raw.century != 0 {
        field(raw.century) as u16 * 100 + year
    } else if year < 80 {
        2000 + year
    } else {
        1900 + year
    };

    ClockReading {
        second: field(raw.second),
        minute: field(raw.minute),
        hour,
        day: field(raw.day),
        month: field(raw.month),
        year,
        weekday: field(raw.weekday),
    }
}

/// `HH:MM:SS`
pub fn format_time(reading: &ClockReading) -> ArrayString<8> {
    let mut text = ArrayString::new();
    let _ = write!(
        text,
        "{:02}:{:02}:{:02}",
        reading.hour % 100,
        reading.minute % 100,
        reading.second % 100
    );
    text
}

/// `Www DD-Mmm-YYYY`; an out-of-range month renders as `???`.
pub fn format_date(reading: &ClockReading) -> ArrayString<15> {
    let weekday = WEEKDAYS[reading.weekday as usize % WEEKDAYS.len()];
    let month = (reading.month as usize)
        .checked_sub(1)
        .and_then(|index| MONTHS.get(index))
        .copied()
        .unwrap_or("???");
    let mut text = ArrayString::new();
    let _ = write!(
        text,
        "{} {:02}-{}-{:04}",
        weekday,
        reading.day % 100,
        month,
        reading.year % 10000
    );
    text
}
