//! WexIB bare-metal entry
//!
//! Reached from the reset stub once the CPU runs with a flat identity map.
//! Wires the real drivers into [`Firmware`] and carries out its [`Exit`].

#![no_std]
#![no_main]

use core::panic::PanicInfo;

use bios_firmware::arch::{PhysMemory, PortIo, halt, jump_to_boot_sector, warm_restart};
use bios_firmware::drivers::uart::COM1_BASE;
use bios_firmware::drivers::{NoUsbStorage, PitSpeaker, Ps2Keyboard, VgaText};
use bios_firmware::logger::SerialLogger;
use bios_firmware::{Exit, Firmware, FirmwareConfig};
use log::LevelFilter;

static LOGGER: SerialLogger<PortIo> =
    SerialLogger::new(unsafe { PortIo::new() }, COM1_BASE, LevelFilter::Trace);

#[unsafe(no_mangle)]
pub extern "C" fn wexib_main() -> ! {
    let config = FirmwareConfig::new();

    LOGGER.init();
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(config.log_level);
    }

    // SAFETY: single-threaded firmware; the seams never overlap a transaction
    let port = unsafe { PortIo::new() };
    let (memory, video) = unsafe { (PhysMemory::new(), PhysMemory::new()) };

    let mut firmware = Firmware::new(
        port,
        memory,
        VgaText::new(video, config.text_buffer),
        Ps2Keyboard::new(port),
        PitSpeaker::new(port),
        NoUsbStorage,
        config,
    );

    match firmware.run() {
        Exit::Handoff(handoff) => {
            log::info!("jumping to {:#x}", handoff.entry());
            unsafe { jump_to_boot_sector(handoff.entry()) }
        }
        Exit::Halt(err) => {
            log::error!("halted: {}", err);
            halt()
        }
        Exit::Restart => warm_restart(),
    }
}

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    log::error!("PANIC: {}", info);
    halt()
}
