//! Move representation and the 5-symbol wire encoding
//!
//! A move is source square, destination square, and a tag describing which
//! compound board update it carries. On the wire this is exactly five ASCII
//! bytes: source file, source rank, dest file, dest rank, tag. `e2e4_` is a
//! plain pawn push; `e1g1c` is white castling king-side.

use std::fmt;

use crate::error::{BoardError, BoardResult};
use crate::square::Square;

/// What kind of board update a move carries
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Plain relocation, tag `_`
    Normal,
    /// Pawn reaches its last rank and becomes a queen, tag `Q`
    Promotion,
    /// Destination square held an opposing piece, tag `x`
    Capture,
    /// King two-square move with the matching rook relocation, tag `c`
    Castle,
    /// Pawn capture where the victim sits beside the destination, tag `e`
    EnPassant,
    /// No move at all (e.g. the engine rejected the human's move)
    Idle,
}

impl MoveKind {
    /// Wire tag byte. `Idle` is never transmitted; it encodes as `0`.
    pub fn tag_byte(self) -> u8 {
        match self {
            MoveKind::Normal => b'_',
            MoveKind::Promotion => b'Q',
            MoveKind::Capture => b'x',
            MoveKind::Castle => b'c',
            MoveKind::EnPassant => b'e',
            MoveKind::Idle => b'0',
        }
    }

    pub fn from_tag_byte(tag: u8) -> BoardResult<MoveKind> {
        match tag {
            b'_' => Ok(MoveKind::Normal),
            b'Q' | b'q' => Ok(MoveKind::Promotion),
            b'x' => Ok(MoveKind::Capture),
            b'c' => Ok(MoveKind::Castle),
            b'e' => Ok(MoveKind::EnPassant),
            _ => Err(BoardError::BadMoveTag { tag }),
        }
    }
}

/// A single chess move as the controller understands it
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ChessMove {
    pub source: Square,
    pub dest: Square,
    pub kind: MoveKind,
}

impl ChessMove {
    pub fn new(source: Square, dest: Square, kind: MoveKind) -> ChessMove {
        ChessMove { source, dest, kind }
    }

    /// The 5-byte wire operand: file, rank, file, rank, tag
    pub fn to_wire(&self) -> [u8; 5] {
        [
            self.source.file().symbol() as u8,
            self.source.rank().symbol() as u8,
            self.dest.file().symbol() as u8,
            self.dest.rank().symbol() as u8,
            self.kind.tag_byte(),
        ]
    }

    pub fn from_wire(bytes: [u8; 5]) -> BoardResult<ChessMove> {
        let source = Square::from_symbols(bytes[0] as char, bytes[1] as char)?;
        let dest = Square::from_symbols(bytes[2] as char, bytes[3] as char)?;
        let kind = MoveKind::from_tag_byte(bytes[4])?;
        Ok(ChessMove { source, dest, kind })
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.source,
            self.dest,
            self.kind.tag_byte() as char
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_round_trip() {
        let mv = ChessMove::from_wire(*b"e2e4_").unwrap();
        assert_eq!(mv.source.to_string(), "e2");
        assert_eq!(mv.dest.to_string(), "e4");
        assert_eq!(mv.kind, MoveKind::Normal);
        assert_eq!(&mv.to_wire(), b"e2e4_");
    }

    #[test]
    fn test_castle_tag() {
        let mv = ChessMove::from_wire(*b"e1g1c").unwrap();
        assert_eq!(mv.kind, MoveKind::Castle);
        assert_eq!(mv.to_string(), "e1g1c");
    }

    #[test]
    fn test_bad_wire_bytes_rejected() {
        assert!(ChessMove::from_wire(*b"z2e4_").is_err());
        assert!(ChessMove::from_wire(*b"e2e4?").is_err());
    }
}
