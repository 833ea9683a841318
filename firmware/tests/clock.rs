//! Clock reader against scripted RTC registers

use bios_api::ClockReading;
use bios_api::sim::SimPort;
use bios_firmware::clock::{ClockReader, format_date, format_time, regs};
use bios_firmware::FirmwareConfig;

const HOUR_24: u8 = 0x02;
const UIP: u8 = 0x80;

fn rtc() -> SimPort {
    let mut port = SimPort::new();
    port.set_cmos(regs::STATUS_B, HOUR_24)
        .set_cmos(regs::HOURS, 0x23)
        .set_cmos(regs::MINUTES, 0x11)
        .set_cmos(regs::DAY, 0x31)
        .set_cmos(regs::MONTH, 0x12)
        .set_cmos(regs::YEAR, 0x24)
        .set_cmos(regs::WEEKDAY, 0x03)
        .set_cmos(0x32, 0x20);
    port
}

#[test]
fn test_torn_read_is_retried() {
    let mut port = rtc();
    port.script_cmos(regs::SECONDS, &[0x59, 0x00])
        .script_cmos(regs::MINUTES, &[0x10]);

    let reading = ClockReader::new(&mut port, &FirmwareConfig::new()).read();
    assert_eq!(
        reading,
        ClockReading {
            second: 0,
            minute: 11,
            hour: 23,
            day: 31,
            month: 12,
            year: 2024,
            weekday: 3,
        }
    );
    assert_eq!(port.cmos_read_count(regs::SECONDS), 4);
}

#[test]
fn test_waits_out_update_in_progress() {
    let mut port = rtc();
    port.script_cmos(regs::STATUS_A, &[UIP, UIP, 0x26]);

    let reading = ClockReader::new(&mut port, &FirmwareConfig::new()).read();
    assert_eq!(reading.hour, 23);
    assert_eq!(port.cmos_read_count(regs::STATUS_A), 3);
}

#[test]
fn test_stuck_update_flag_still_reads() {
    let mut port = rtc();
    port.set_cmos(regs::STATUS_A, UIP);
    let config = FirmwareConfig::new().with_rtc_update_budget(4);

    let reading = ClockReader::new(&mut port, &config).read();
    assert_eq!(reading.minute, 11);
}

#[test]
fn test_formatting() {
    let mut port = rtc();
    let reading = ClockReader::new(&mut port, &FirmwareConfig::new()).read();
    assert_eq!(format_time(&reading).as_str(), "23:11:00");
    assert_eq!(format_date(&reading).as_str(), "Wed 31-Dec-2024");
}
