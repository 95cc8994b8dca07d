//! Piece symbols
//!
//! Pieces travel through the system as single chars in the usual FEN
//! convention: uppercase for white, lowercase for black. The physical robot
//! never underpromotes (it has no spare knights to place), so promotion
//! always maps a pawn to the queen of its own color.

use std::fmt;

/// Piece color
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PieceColor {
    White,
    Black,
}

impl PieceColor {
    pub fn opponent(self) -> PieceColor {
        match self {
            PieceColor::White => PieceColor::Black,
            PieceColor::Black => PieceColor::White,
        }
    }
}

/// Piece kind, independent of color
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// A colored piece occupying one square
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: PieceColor,
    pub kind: PieceKind,
}

impl Piece {
    pub fn new(color: PieceColor, kind: PieceKind) -> Piece {
        Piece { color, kind }
    }

    /// FEN-style symbol: uppercase white, lowercase black
    pub fn symbol(self) -> char {
        let white = match self.kind {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        };
        match self.color {
            PieceColor::White => white,
            PieceColor::Black => white.to_ascii_lowercase(),
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Piece> {
        let color = if symbol.is_ascii_uppercase() {
            PieceColor::White
        } else {
            PieceColor::Black
        };
        let kind = match symbol.to_ascii_uppercase() {
            'P' => PieceKind::Pawn,
            'N' => PieceKind::Knight,
            'B' => PieceKind::Bishop,
            'R' => PieceKind::Rook,
            'Q' => PieceKind::Queen,
            'K' => PieceKind::King,
            _ => return None,
        };
        Some(Piece { color, kind })
    }

    /// The piece a pawn becomes on promotion (always the queen of its color)
    pub fn promoted(self) -> Piece {
        Piece {
            color: self.color,
            kind: PieceKind::Queen,
        }
    }

    pub fn is_pawn(self) -> bool {
        self.kind == PieceKind::Pawn
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_round_trip() {
        for symbol in ['P', 'N', 'B', 'R', 'Q', 'K', 'p', 'n', 'b', 'r', 'q', 'k'] {
            let piece = Piece::from_symbol(symbol).unwrap();
            assert_eq!(piece.symbol(), symbol);
        }
        assert!(Piece::from_symbol('x').is_none());
    }

    #[test]
    fn test_promotion_keeps_color() {
        let white_pawn = Piece::from_symbol('P').unwrap();
        assert_eq!(white_pawn.promoted().symbol(), 'Q');

        let black_pawn = Piece::from_symbol('p').unwrap();
        assert_eq!(black_pawn.promoted().symbol(), 'q');
    }
}
