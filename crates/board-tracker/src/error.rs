//! Error types for board tracking
//!
//! Provides custom error types for square parsing, move decoding, and the
//! structural ("gently legal") checks performed during move inference.

use thiserror::Error;

use crate::square::Square;

/// Errors that can occur while tracking the board
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Square index outside 0..=63
    #[error("square index out of range: {index}")]
    SquareOutOfRange { index: u8 },

    /// Unrecognized file/rank symbol pair
    #[error("unrecognized square symbols: {file}{rank}")]
    BadSquareSymbols { file: char, rank: char },

    /// Unrecognized move tag byte on the wire
    #[error("unrecognized move tag byte: {tag:#04x}")]
    BadMoveTag { tag: u8 },

    /// Inference found no piece on the square a move claims to vacate
    #[error("no piece on source square {square}")]
    MissingPiece { square: Square },

    /// Occupancy diff with a changed-square count no single move can produce
    #[error("{count} squares changed; only 2 or 4 can describe a move")]
    ChangeCountInvalid { count: u32 },

    /// Four squares changed but the pattern is not one of the four castles
    #[error("4-square diff {diff:#018x} matches no castling signature")]
    CastlingSignatureMismatch { diff: u64 },

    /// Move inference requested before an end-turn occupancy reading arrived
    #[error("no end-turn board reading to infer a move from")]
    MissingReading,
}

/// Result type alias for board tracking operations
pub type BoardResult<T> = Result<T, BoardError>;
