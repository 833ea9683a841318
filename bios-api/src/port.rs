//! Register and memory access seams
//!
//! Every hardware touch in the firmware goes through one of these two traits.
//! The real implementations issue port instructions and volatile accesses; the
//! simulated ones in [`crate::sim`] record and script them.

/// 8/16-bit access to hardware registers by I/O address.
///
/// Accesses are synchronous and unbuffered: one call is one bus transaction.
/// No locking is implied, callers run in a single context.
pub trait RegisterPort {
    fn read8(&mut self, port: u16) -> u8;
    fn write8(&mut self, port: u16, value: u8);
    fn read16(&mut self, port: u16) -> u16;
    fn write16(&mut self, port: u16, value: u16);
}

impl<T: RegisterPort + ?Sized> RegisterPort for &mut T {
    fn read8(&mut self, port: u16) -> u8 {
        (**self).read8(port)
    }

    fn write8(&mut self, port: u16, value: u8) {
        (**self).write8(port, value)
    }

    fn read16(&mut self, port: u16) -> u16 {
        (**self).read16(port)
    }

    fn write16(&mut self, port: u16, value: u16) {
        (**self).write16(port, value)
    }
}

/// Physical memory access used by the POST probes, the text display and the
/// boot-sector relocation.
///
/// Multi-byte accesses are little-endian and must be issued at their natural
/// width so that probes of memory-mapped buffers behave like the hardware.
pub trait MemoryBus {
    fn read_u8(&mut self, addr: usize) -> u8;
    fn write_u8(&mut self, addr: usize, value: u8);
    fn read_u16(&mut self, addr: usize) -> u16;
    fn write_u16(&mut self, addr: usize, value: u16);
    fn read_u32(&mut self, addr: usize) -> u32;
    fn write_u32(&mut self, addr: usize, value: u32);

    /// Copy `bytes` verbatim to `addr`.
    fn write_bytes(&mut self, addr: usize, bytes: &[u8]) {
        for (offset, &byte) in bytes.iter().enumerate() {
            self.write_u8(addr + offset, byte);
        }
    }

    /// Fill `buf` from memory starting at `addr`.
    fn read_bytes(&mut self, addr: usize, buf: &mut [u8]) {
        for (offset, byte) in buf.iter_mut().enumerate() {
            *byte = self.read_u8(addr + offset);
        }
    }
}

impl<T: MemoryBus + ?Sized> MemoryBus for &mut T {
    fn read_u8(&mut self, addr: usize) -> u8 {
        (**self).read_u8(addr)
    }

    fn write_u8(&mut self, addr: usize, value: u8) {
        (**self).write_u8(addr, value)
    }

    fn read_u16(&mut self, addr: usize) -> u16 {
        (**self).read_u16(addr)
    }

    fn write_u16(&mut self, addr: usize, value: u16) {
        (**self).write_u16(addr, value)
    }

    fn read_u32(&mut self, addr: usize) -> u32 {
        (**self).read_u32(addr)
    }

    fn write_u32(&mut self, addr: usize, value: u32) {
        (**self).write_u32(addr, value)
    }

    fn write_bytes(&mut self, addr: usize, bytes: &[u8]) {
        (**self).write_bytes(addr, bytes)
    }

    fn read_bytes(&mut self, addr: usize, buf: &mut [u8]) {
        (**self).read_bytes(addr, buf)
    }
}
