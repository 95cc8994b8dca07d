//! # Move Inference - Reconstructing a Move from an Occupancy Diff
//!
//! The sensors report which squares are occupied, never which piece sits
//! where or what the human actually did. This module reconstructs the move
//! from a before/after occupancy pair:
//!
//! - **2 changed squares**: the square that was occupied *before* is the
//!   source (the piece vacated it); the other is the destination. The moving
//!   piece is read from the before-snapshot's grid. If it is a pawn crossing
//!   into its last rank the move is a promotion, and the robot always queens
//!   because no underpromotion hardware exists.
//! - **4 changed squares**: only castling moves four squares at once, and
//!   each of the four castles flips a fixed, unique bit pattern. Anything
//!   else is rejected.
//! - **any other count**: rejected.
//!
//! Rejection here means *structurally* illegal. Whether the move obeys chess
//! rules is decided by the external engine; this check only guarantees the
//! diff is shaped like a move at all ("gentle legality").

use crate::bitboard::Bitboard;
use crate::diff::BoardChange;
use crate::error::{BoardError, BoardResult};
use crate::moves::{ChessMove, MoveKind};
use crate::piece::{Piece, PieceColor};
use crate::snapshot::BoardSnapshot;
use crate::square::{Rank, Square};

/// White castles king-side: e1, f1, g1, h1 toggle
pub const CASTLE_WHITE_KINGSIDE: u64 = 0x0000_0000_0000_00F0;
/// White castles queen-side: a1, c1, d1, e1 toggle
pub const CASTLE_WHITE_QUEENSIDE: u64 = 0x0000_0000_0000_001D;
/// Black castles king-side: e8, f8, g8, h8 toggle
pub const CASTLE_BLACK_KINGSIDE: u64 = 0xF000_0000_0000_0000;
/// Black castles queen-side: a8, c8, d8, e8 toggle
pub const CASTLE_BLACK_QUEENSIDE: u64 = 0x1D00_0000_0000_0000;

/// The king move carried by a castling diff, if the diff is one of the four
/// canonical signatures
fn castle_king_move(diff: u64) -> Option<ChessMove> {
    let (source, dest) = match diff {
        CASTLE_WHITE_KINGSIDE => ("e1", "g1"),
        CASTLE_WHITE_QUEENSIDE => ("e1", "c1"),
        CASTLE_BLACK_KINGSIDE => ("e8", "g8"),
        CASTLE_BLACK_QUEENSIDE => ("e8", "c8"),
        _ => return None,
    };
    let parse = |s: &str| {
        let mut chars = s.chars();
        let file = chars.next().expect("two-char square literal");
        let rank = chars.next().expect("two-char square literal");
        Square::from_symbols(file, rank).expect("castle squares are valid")
    };
    Some(ChessMove::new(parse(source), parse(dest), MoveKind::Castle))
}

/// Promotion iff a pawn crosses from its second-to-last rank to its last one
fn is_promotion(piece: Piece, source: Square, dest: Square) -> bool {
    if !piece.is_pawn() {
        return false;
    }
    match piece.color {
        PieceColor::White => source.rank() == Rank::Seventh && dest.rank() == Rank::Eighth,
        PieceColor::Black => source.rank() == Rank::Second && dest.rank() == Rank::First,
    }
}

/// Reconstruct the move that turned `before` into the `after` occupancy
pub fn infer_move(before: &BoardSnapshot, after: Bitboard) -> BoardResult<ChessMove> {
    let change = BoardChange::between(before.presence, after);

    match change.num_changes {
        2 => {
            let (first, second) = (change.squares[0], change.squares[1]);
            // The square that was set before is the one the piece vacated
            let (source, dest) = if before.presence.contains(first) {
                (first, second)
            } else {
                (second, first)
            };
            let piece = before
                .piece_at(source)
                .ok_or(BoardError::MissingPiece { square: source })?;

            let kind = if is_promotion(piece, source, dest) {
                MoveKind::Promotion
            } else {
                MoveKind::Normal
            };
            Ok(ChessMove::new(source, dest, kind))
        }
        4 => castle_king_move(change.diff.0).ok_or(BoardError::CastlingSignatureMismatch {
            diff: change.diff.0,
        }),
        count => Err(BoardError::ChangeCountInvalid { count }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::INITIAL_PRESENCE;

    fn initial() -> BoardSnapshot {
        BoardSnapshot::initial()
    }

    #[test]
    fn test_pawn_push_from_initial_position() {
        // e2 (bit 12) vacated, e4 (bit 28) occupied
        let after = Bitboard(INITIAL_PRESENCE ^ (1 << 12) ^ (1 << 28));
        let mv = infer_move(&initial(), after).unwrap();
        assert_eq!(mv.to_string(), "e2e4_");
    }

    #[test]
    fn test_source_resolution_is_order_independent() {
        // Knight g1 (bit 6) to f3 (bit 21): destination index above source
        let after = Bitboard(INITIAL_PRESENCE ^ (1 << 6) ^ (1 << 21));
        let mv = infer_move(&initial(), after).unwrap();
        assert_eq!(mv.to_string(), "g1f3_");
    }

    #[test]
    fn test_white_kingside_castle_signature() {
        let after = Bitboard(INITIAL_PRESENCE ^ CASTLE_WHITE_KINGSIDE);
        let mv = infer_move(&initial(), after).unwrap();
        assert_eq!(mv.to_string(), "e1g1c");
    }

    #[test]
    fn test_all_four_castle_signatures_accepted() {
        for (signature, expected) in [
            (CASTLE_WHITE_KINGSIDE, "e1g1c"),
            (CASTLE_WHITE_QUEENSIDE, "e1c1c"),
            (CASTLE_BLACK_KINGSIDE, "e8g8c"),
            (CASTLE_BLACK_QUEENSIDE, "e8c8c"),
        ] {
            let after = Bitboard(INITIAL_PRESENCE ^ signature);
            let mv = infer_move(&initial(), after).unwrap();
            assert_eq!(mv.to_string(), expected);
        }
    }

    #[test]
    fn test_non_castle_four_bit_diffs_rejected() {
        // Four changed squares that are not any castle signature
        for bogus in [
            0x0000_0000_0000_000Fu64,       // a1..d1
            0x0000_0000_0000_0F00,          // a2..d2
            0x8100_0000_0000_0081,          // corners
            CASTLE_WHITE_KINGSIDE << 8,     // right shape, wrong rank
            0xD000_0000_0000_0010,          // castle-adjacent scatter
        ] {
            assert_eq!(bogus.count_ones(), 4, "test pattern must have 4 bits");
            let after = Bitboard(INITIAL_PRESENCE ^ bogus);
            let err = infer_move(&initial(), after).unwrap_err();
            assert!(matches!(err, BoardError::CastlingSignatureMismatch { .. }));
        }
    }

    #[test]
    fn test_change_counts_other_than_two_or_four_rejected() {
        for bits in [1usize, 3, 5, 6] {
            let mut mask = 0u64;
            for i in 0..bits {
                mask |= 1 << (16 + i); // empty middle squares becoming occupied
            }
            let after = Bitboard(INITIAL_PRESENCE ^ mask);
            let err = infer_move(&initial(), after).unwrap_err();
            assert_eq!(
                err,
                BoardError::ChangeCountInvalid {
                    count: bits as u32
                }
            );
        }
    }

    #[test]
    fn test_white_pawn_promotion_gated_to_seventh_to_eighth() {
        // Lone white pawn on a7 moving to a8
        let mut board = BoardSnapshot::empty();
        let a7 = Square::from_symbols('a', '7').unwrap();
        let a8 = Square::from_symbols('a', '8').unwrap();
        board.set_piece(a7, Piece::from_symbol('P').unwrap());

        let mut after = board.presence;
        after.remove(a7);
        after.insert(a8);

        let mv = infer_move(&board, after).unwrap();
        assert_eq!(mv.kind, MoveKind::Promotion);
        assert_eq!(mv.to_string(), "a7a8Q");
    }

    #[test]
    fn test_black_pawn_promotion_gated_to_second_to_first() {
        let mut board = BoardSnapshot::empty();
        let h2 = Square::from_symbols('h', '2').unwrap();
        let h1 = Square::from_symbols('h', '1').unwrap();
        board.set_piece(h2, Piece::from_symbol('p').unwrap());

        let mut after = board.presence;
        after.remove(h2);
        after.insert(h1);

        let mv = infer_move(&board, after).unwrap();
        assert_eq!(mv.kind, MoveKind::Promotion);
    }

    #[test]
    fn test_rook_on_promotion_ranks_does_not_promote() {
        let mut board = BoardSnapshot::empty();
        let a7 = Square::from_symbols('a', '7').unwrap();
        let a8 = Square::from_symbols('a', '8').unwrap();
        board.set_piece(a7, Piece::from_symbol('R').unwrap());

        let mut after = board.presence;
        after.remove(a7);
        after.insert(a8);

        let mv = infer_move(&board, after).unwrap();
        assert_eq!(mv.kind, MoveKind::Normal);
    }

    #[test]
    fn test_wrong_color_promotion_rank_does_not_promote() {
        // A black pawn moving 7th to 8th is moving backwards; not a promotion
        let mut board = BoardSnapshot::empty();
        let a7 = Square::from_symbols('a', '7').unwrap();
        let a8 = Square::from_symbols('a', '8').unwrap();
        board.set_piece(a7, Piece::from_symbol('p').unwrap());

        let mut after = board.presence;
        after.remove(a7);
        after.insert(a8);

        let mv = infer_move(&board, after).unwrap();
        assert_eq!(mv.kind, MoveKind::Normal);
    }

    #[test]
    fn test_vacated_square_with_no_piece_is_reported() {
        // Presence claims e4 was occupied but the grid disagrees
        let mut board = BoardSnapshot::empty();
        let e4 = Square::from_symbols('e', '4').unwrap();
        board.presence.insert(e4);

        let mut after = board.presence;
        after.remove(e4);
        after.insert(Square::from_symbols('e', '5').unwrap());

        let err = infer_move(&board, after).unwrap_err();
        assert_eq!(err, BoardError::MissingPiece { square: e4 });
    }
}
