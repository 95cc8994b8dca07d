//! Move application
//!
//! The inverse of inference: robot moves arrive over the wire as symbols and
//! must be applied to a snapshot. Each tag carries its compound update:
//! capture overwrites the destination (the grid write discards the victim),
//! castling relocates the matching rook, en-passant clears the pawn at
//! (dest file, source rank), and promotion places the queen of the mover's
//! color.

use crate::error::{BoardError, BoardResult};
use crate::moves::{ChessMove, MoveKind};
use crate::snapshot::BoardSnapshot;
use crate::square::{File, Rank, Square};

/// The rook relocation implied by a castling king move, keyed by the king's
/// destination. e1c1 pairs with a1d1, e1g1 with h1f1, and the same files on
/// rank 8 for black.
pub fn castle_rook_move(king_dest: Square) -> Option<ChessMove> {
    let rank = king_dest.rank();
    if rank != Rank::First && rank != Rank::Eighth {
        return None;
    }
    let (rook_from, rook_to) = match king_dest.file() {
        File::C => (File::A, File::D),
        File::G => (File::H, File::F),
        _ => return None,
    };
    Some(ChessMove::new(
        Square::new(rook_from, rank),
        Square::new(rook_to, rank),
        MoveKind::Normal,
    ))
}

/// Apply a move to a snapshot, updating bitboard and grid together
pub fn apply_move(board: &mut BoardSnapshot, mv: &ChessMove) -> BoardResult<()> {
    if mv.kind == MoveKind::Idle {
        return Ok(());
    }

    let piece = board
        .piece_at(mv.source)
        .ok_or(BoardError::MissingPiece { square: mv.source })?;

    if mv.kind == MoveKind::EnPassant {
        // The captured pawn sits beside the destination, not on it
        let victim = Square::new(mv.dest.file(), mv.source.rank());
        board.clear_square(victim);
    }

    board.clear_square(mv.source);
    let placed = if mv.kind == MoveKind::Promotion {
        piece.promoted()
    } else {
        piece
    };
    board.set_piece(mv.dest, placed);

    if mv.kind == MoveKind::Castle {
        let rook_mv =
            castle_rook_move(mv.dest).ok_or(BoardError::CastlingSignatureMismatch {
                diff: 1u64 << mv.dest.index(),
            })?;
        let rook = board
            .piece_at(rook_mv.source)
            .ok_or(BoardError::MissingPiece {
                square: rook_mv.source,
            })?;
        board.clear_square(rook_mv.source);
        board.set_piece(rook_mv.dest, rook);
    }

    debug_assert!(board.is_consistent());
    Ok(())
}
