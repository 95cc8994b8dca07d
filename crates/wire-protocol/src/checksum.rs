//! Fletcher-16 checksum
//!
//! Lightweight additive checksum with position sensitivity, computed over
//! the header byte and operand bytes of a frame. Both running sums reduce
//! modulo 255, so a checksum never equals 0xFF in either byte.

/// Fletcher-16 over `data`; low byte is the simple sum, high byte the
/// position-weighted sum
pub fn fletcher16(data: &[u8]) -> u16 {
    let mut sum1: u16 = 0;
    let mut sum2: u16 = 0;
    for &byte in data {
        sum1 = (sum1 + byte as u16) % 255;
        sum2 = (sum2 + sum1) % 255;
    }
    (sum2 << 8) | sum1
}

/// The two check bytes appended to a frame, low byte first
pub fn check_bytes(data: &[u8]) -> [u8; 2] {
    let sum = fletcher16(data);
    [(sum & 0xFF) as u8, (sum >> 8) as u8]
}
