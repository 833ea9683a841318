//! Binary-coded decimal conversion

/// Convert a packed BCD byte (`0x59`) to binary (`59`).
pub const fn bcd_to_binary(bcd: u8) -> u8 {
    (bcd >> 4) * 10 + (bcd & 0x0F)
}

/// Convert a binary value below 100 to packed BCD.
pub const fn binary_to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bcd_to_binary() {
        assert_eq!(bcd_to_binary(0x00), 0);
        assert_eq!(bcd_to_binary(0x09), 9);
        assert_eq!(bcd_to_binary(0x10), 10);
        assert_eq!(bcd_to_binary(0x59), 59);
        assert_eq!(bcd_to_binary(0x99), 99);
    }

    #[test]
    fn test_binary_to_bcd() {
        assert_eq!(binary_to_bcd(0), 0x00);
        assert_eq!(binary_to_bcd(23), 0x23);
        assert_eq!(binary_to_bcd(99), 0x99);
    }
}
