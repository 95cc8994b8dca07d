//! Board snapshots
//!
//! A snapshot is one moment of board state: the occupancy bitboard the
//! sensors can observe, plus the 8x8 piece grid only the controller knows.
//! The invariant is that the two always describe the same set of squares;
//! every mutation here updates both sides together.

use crate::bitboard::Bitboard;
use crate::piece::Piece;
use crate::square::{File, Rank, Square};

/// Occupancy of the standard chess starting position
pub const INITIAL_PRESENCE: u64 = 0xFFFF_0000_0000_FFFF;

const BACK_RANK: [char; 8] = ['R', 'N', 'B', 'Q', 'K', 'B', 'N', 'R'];

/// One generation of board state: occupancy plus piece identity
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub presence: Bitboard,
    pieces: [[Option<Piece>; 8]; 8],
}

impl BoardSnapshot {
    /// Completely empty board
    pub fn empty() -> BoardSnapshot {
        BoardSnapshot {
            presence: Bitboard::new(),
            pieces: [[None; 8]; 8],
        }
    }

    /// The standard starting position
    pub fn initial() -> BoardSnapshot {
        let mut board = BoardSnapshot::empty();
        for file in File::ALL {
            let back = BACK_RANK[file.index() as usize];

            let white_back = Piece::from_symbol(back).expect("back rank symbols are valid");
            board.set_piece(Square::new(file, Rank::First), white_back);
            board.set_piece(
                Square::new(file, Rank::Second),
                Piece::from_symbol('P').expect("valid"),
            );

            let black_back =
                Piece::from_symbol(back.to_ascii_lowercase()).expect("back rank symbols are valid");
            board.set_piece(Square::new(file, Rank::Eighth), black_back);
            board.set_piece(
                Square::new(file, Rank::Seventh),
                Piece::from_symbol('p').expect("valid"),
            );
        }
        debug_assert_eq!(board.presence.0, INITIAL_PRESENCE);
        board
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.pieces[square.rank().index() as usize][square.file().index() as usize]
    }

    /// Place a piece, overwriting whatever occupied the square
    pub fn set_piece(&mut self, square: Square, piece: Piece) {
        self.pieces[square.rank().index() as usize][square.file().index() as usize] = Some(piece);
        self.presence.insert(square);
    }

    pub fn clear_square(&mut self, square: Square) {
        self.pieces[square.rank().index() as usize][square.file().index() as usize] = None;
        self.presence.remove(square);
    }

    /// Population invariant: grid cells and occupancy bits must match 1:1
    pub fn is_consistent(&self) -> bool {
        let mut derived = Bitboard::new();
        for rank in Rank::ALL {
            for file in File::ALL {
                let square = Square::new(file, rank);
                if self.piece_at(square).is_some() {
                    derived.insert(square);
                }
            }
        }
        derived == self.presence
    }
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        BoardSnapshot::initial()
    }
}
