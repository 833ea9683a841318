//! CMOS / RTC register bank behind the index and data ports

use bios_api::RegisterPort;

pub const CMOS_INDEX: u16 = 0x70;
pub const CMOS_DATA: u16 = 0x71;

/// Battery-backed register bank.
///
/// Every access is one index write followed by one data transaction. Nothing
/// is cached.
pub struct Cmos<P> {
    port: P,
}

impl<P: RegisterPort> Cmos<P> {
    pub const fn new(port: P) -> Self {
        Self { port }
    }

    pub fn read(&mut self, reg: u8) -> u8 {
        self.port.write8(CMOS_INDEX, reg);
        self.port.read8(CMOS_DATA)
    }

    pub fn write(&mut self, reg: u8, value: u8) {
        self.port.write8(CMOS_INDEX, reg);
        self.port.write8(CMOS_DATA, value);
    }

    pub fn into_inner(self) -> P {
        self.port
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bios_api::sim::SimPort;

    #[test]
    fn test_read_write_through_index() {
        let mut port = SimPort::new();
        port.set_cmos(0x23, 7);
        let mut cmos = Cmos::new(&mut port);
        assert_eq!(cmos.read(0x23), 7);
        cmos.write(0x30, 2);
        assert_eq!(port.cmos(0x30), 2);
        assert_eq!(port.writes(), &[(0x70, 0x23), (0x70, 0x30), (0x71, 2)]);
    }
}
