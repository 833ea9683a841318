//! x86 port I/O, identity-mapped physical memory and control transfer

use core::arch::asm;
use core::ptr;

use bios_api::{MemoryBus, RegisterPort};

use crate::drivers::ps2;

/// Port-instruction implementation of [`RegisterPort`].
#[derive(Debug, Clone, Copy)]
pub struct PortIo {
    _private: (),
}

impl PortIo {
    /// # Safety
    ///
    /// Instances alias the whole I/O space. The caller must run on bare metal
    /// with I/O privilege and keep accesses from different instances from
    /// interleaving within one register transaction.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl RegisterPort for PortIo {
    fn read8(&mut self, port: u16) -> u8 {
        unsafe { ::x86::io::inb(port) }
    }

    fn write8(&mut self, port: u16, value: u8) {
        unsafe { ::x86::io::outb(port, value) }
    }

    fn read16(&mut self, port: u16) -> u16 {
        unsafe { ::x86::io::inw(port) }
    }

    fn write16(&mut self, port: u16, value: u16) {
        unsafe { ::x86::io::outw(port, value) }
    }
}

/// Volatile access to identity-mapped physical memory.
#[derive(Debug)]
pub struct PhysMemory {
    _private: (),
}

impl PhysMemory {
    /// # Safety
    ///
    /// Physical memory must be identity mapped and every address passed in
    /// must be valid for the access width.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl MemoryBus for PhysMemory {
    fn read_u8(&mut self, addr: usize) -> u8 {
        unsafe { ptr::read_volatile(addr as *const u8) }
    }

    fn write_u8(&mut self, addr: usize, value: u8) {
        unsafe { ptr::write_volatile(addr as *mut u8, value) }
    }

    fn read_u16(&mut self, addr: usize) -> u16 {
        unsafe { ptr::read_volatile(addr as *const u16) }
    }

    fn write_u16(&mut self, addr: usize, value: u16) {
        unsafe { ptr::write_volatile(addr as *mut u16, value) }
    }

    fn read_u32(&mut self, addr: usize) -> u32 {
        unsafe { ptr::read_volatile(addr as *const u32) }
    }

    fn write_u32(&mut self, addr: usize, value: u32) {
        unsafe { ptr::write_volatile(addr as *mut u32, value) }
    }
}

/// Idle forever with interrupts off.
pub fn halt() -> ! {
    loop {
        unsafe {
            asm!("cli", options(nomem, nostack));
            ::x86::halt();
        }
    }
}

/// Pulse the reset line through the keyboard controller, halting if the
/// machine does not go down.
pub fn warm_restart() -> ! {
    let mut port = unsafe { PortIo::new() };
    ps2::request_reset(&mut port);
    halt()
}

/// Continue execution at a relocated boot sector, boot drive 0x80 in DL.
///
/// # Safety
///
/// `entry` must hold a validated boot sector; nothing of the firmware's
/// state survives the jump.
pub unsafe fn jump_to_boot_sector(entry: usize) -> ! {
    unsafe {
        asm!(
            "cli",
            "jmp {entry}",
            entry = in(reg) entry,
            in("dl") 0x80u8,
            options(noreturn),
        )
    }
}
