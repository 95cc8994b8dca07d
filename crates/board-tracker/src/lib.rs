//! # Board Tracker - Occupancy Sensing to Chess Moves and Back
//!
//! This crate owns everything the gantry controller knows about the physical
//! chess board. The reed-switch matrix under the board reports *occupancy
//! only*: a 64-bit snapshot with one bit per square, no piece identity. The
//! controller must therefore carry its own piece bookkeeping and reconstruct
//! each human move from a before/after occupancy diff.
//!
//! The crate is split along the data flow:
//!
//! 1. [`Bitboard`] wraps the raw 64-bit occupancy value with set operations.
//! 2. [`BoardSnapshot`] pairs an occupancy bitboard with an 8x8 grid of piece
//!    symbols. The two fields must always agree (see
//!    [`BoardSnapshot::is_consistent`]).
//! 3. [`BoardChange`] is the XOR diff of two occupancies, capped at four
//!    changed squares (more than four can never be one chess move).
//! 4. [`infer_move`] turns a diff into a [`ChessMove`] or rejects it as
//!    structurally illegal ("gentle legality": full chess-rule legality is
//!    the external engine's job, not ours).
//! 5. [`apply_move`] runs the other direction for moves that arrive over the
//!    wire as symbols, updating bitboard and grid together.
//! 6. [`BoardTracker`] holds the three snapshot generations (Previous,
//!    Intermediate, Current) that make capture sequences and an unreliable
//!    serial link retryable without corrupting game state.

pub mod apply;
pub mod bitboard;
pub mod diff;
pub mod error;
pub mod infer;
pub mod moves;
pub mod piece;
pub mod snapshot;
pub mod square;
pub mod tracker;

pub use apply::{apply_move, castle_rook_move};
pub use bitboard::Bitboard;
pub use diff::BoardChange;
pub use error::{BoardError, BoardResult};
pub use infer::{
    infer_move, CASTLE_BLACK_KINGSIDE, CASTLE_BLACK_QUEENSIDE, CASTLE_WHITE_KINGSIDE,
    CASTLE_WHITE_QUEENSIDE,
};
pub use moves::{ChessMove, MoveKind};
pub use piece::{Piece, PieceColor, PieceKind};
pub use snapshot::{BoardSnapshot, INITIAL_PRESENCE};
pub use square::{File, Rank, Square};
pub use tracker::BoardTracker;
