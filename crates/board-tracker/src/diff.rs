//! Occupancy diffs
//!
//! XOR of two occupancy bitboards, with the changed squares collected for
//! inference. One chess move can change at most four squares (castling), so
//! collection stops there; the total count is still reported so callers can
//! reject noisy readings.

use smallvec::SmallVec;

use crate::bitboard::Bitboard;
use crate::square::Square;

/// The most squares a single legal move can touch
pub const MAX_MOVE_CHANGES: usize = 4;

/// Result of diffing two occupancy readings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardChange {
    /// The raw XOR mask
    pub diff: Bitboard,
    /// Population count of the mask, which may exceed `squares.len()`
    pub num_changes: u32,
    /// Up to four changed square indices, lowest index first
    pub squares: SmallVec<[Square; MAX_MOVE_CHANGES]>,
}

impl BoardChange {
    /// Diff two occupancy readings, collecting at most four changed squares
    pub fn between(before: Bitboard, after: Bitboard) -> BoardChange {
        let diff = before.diff(after);
        let num_changes = diff.count_ones();

        let mut squares = SmallVec::new();
        let mut remaining = diff.0;
        while remaining != 0 && squares.len() < MAX_MOVE_CHANGES {
            let index = remaining.trailing_zeros() as u8;
            squares.push(Square::from_index(index).expect("trailing_zeros of u64 is < 64"));
            remaining &= remaining - 1;
        }

        BoardChange {
            diff,
            num_changes,
            squares,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_bit_diff() {
        let before = Bitboard(1 << 12 | 1 << 8);
        let after = Bitboard(1 << 28 | 1 << 8);
        let change = BoardChange::between(before, after);

        assert_eq!(change.num_changes, 2);
        assert_eq!(change.squares[0].index(), 12);
        assert_eq!(change.squares[1].index(), 28);
    }

    #[test]
    fn test_collection_caps_at_four() {
        let before = Bitboard(0);
        let after = Bitboard(0b11_1111);
        let change = BoardChange::between(before, after);

        assert_eq!(change.num_changes, 6);
        assert_eq!(change.squares.len(), MAX_MOVE_CHANGES);
    }

    #[test]
    fn test_identical_boards_have_no_changes() {
        let board = Bitboard(0xFFFF_0000_0000_FFFF);
        let change = BoardChange::between(board, board);
        assert_eq!(change.num_changes, 0);
        assert!(change.squares.is_empty());
    }
}
