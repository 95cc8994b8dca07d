//! Occupancy bitboard
//!
//! One bit per board square, 1 = occupied by any piece. Bit 0 is a1, bit 7
//! is h1, bit 56 is a8, bit 63 is h8, so `rank * 8 + file` addresses a
//! square. Most queries compile down to single instructions (POPCNT for
//! counting, shifts and masks for membership), which is why every sensor
//! reading travels through the system in this form rather than as a grid.

use crate::square::Square;

/// 64-bit occupancy set, one bit per square
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub fn new() -> Self {
        Bitboard(0)
    }

    pub fn insert(&mut self, square: Square) {
        self.0 |= 1u64 << square.index();
    }

    pub fn remove(&mut self, square: Square) {
        self.0 &= !(1u64 << square.index());
    }

    pub fn contains(&self, square: Square) -> bool {
        (self.0 & (1u64 << square.index())) != 0
    }

    #[inline]
    pub fn count_ones(&self) -> u32 {
        self.0.count_ones()
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Squares present in exactly one of the two boards
    pub fn diff(&self, other: Bitboard) -> Bitboard {
        Bitboard(self.0 ^ other.0)
    }
}

impl From<u64> for Bitboard {
    fn from(raw: u64) -> Self {
        Bitboard(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::Square;

    #[test]
    fn test_insert_remove_contains() {
        let e2 = Square::from_index(12).unwrap();
        let mut board = Bitboard::new();

        board.insert(e2);
        assert!(board.contains(e2));
        assert_eq!(board.count_ones(), 1);

        board.remove(e2);
        assert!(!board.contains(e2));
        assert_eq!(board.count_ones(), 0);
    }

    #[test]
    fn test_diff_is_symmetric_difference() {
        let a = Bitboard(0b1100);
        let b = Bitboard(0b1010);
        assert_eq!(a.diff(b), Bitboard(0b0110));
        assert_eq!(b.diff(a), Bitboard(0b0110));
    }
}
