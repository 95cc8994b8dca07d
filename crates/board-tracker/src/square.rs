//! Files, ranks, and squares
//!
//! Squares are stored as indices 0..=63 (`rank * 8 + file`, a1 = 0). The
//! wire protocol and the move log both use the UCI symbols (`'a'..='h'`,
//! `'1'..='8'`), so conversions in both directions live here.

use std::fmt;

use crate::error::{BoardError, BoardResult};

/// Board file (column), a through h
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl File {
    pub const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<File> {
        File::ALL.get(index as usize).copied()
    }

    /// UCI symbol, `'a'` through `'h'`
    pub fn symbol(self) -> char {
        (b'a' + self.index()) as char
    }

    pub fn from_symbol(symbol: char) -> Option<File> {
        match symbol {
            'a'..='h' => File::from_index(symbol as u8 - b'a'),
            _ => None,
        }
    }
}

/// Board rank (row), 1 through 8; rank 1 is white's home rank
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Rank {
    First = 0,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Eighth,
}

impl Rank {
    pub const ALL: [Rank; 8] = [
        Rank::First,
        Rank::Second,
        Rank::Third,
        Rank::Fourth,
        Rank::Fifth,
        Rank::Sixth,
        Rank::Seventh,
        Rank::Eighth,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Rank> {
        Rank::ALL.get(index as usize).copied()
    }

    /// UCI symbol, `'1'` through `'8'`
    pub fn symbol(self) -> char {
        (b'1' + self.index()) as char
    }

    pub fn from_symbol(symbol: char) -> Option<Rank> {
        match symbol {
            '1'..='8' => Rank::from_index(symbol as u8 - b'1'),
            _ => None,
        }
    }
}

/// One of the 64 board squares, stored as an index 0..=63
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    pub fn new(file: File, rank: Rank) -> Square {
        Square(rank.index() * 8 + file.index())
    }

    pub fn from_index(index: u8) -> BoardResult<Square> {
        if index > 63 {
            return Err(BoardError::SquareOutOfRange { index });
        }
        Ok(Square(index))
    }

    /// Parse a UCI symbol pair such as `('e', '2')`
    pub fn from_symbols(file: char, rank: char) -> BoardResult<Square> {
        match (File::from_symbol(file), Rank::from_symbol(rank)) {
            (Some(f), Some(r)) => Ok(Square::new(f, r)),
            _ => Err(BoardError::BadSquareSymbols { file, rank }),
        }
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn file(self) -> File {
        File::from_index(self.0 % 8).expect("file index is always 0..=7")
    }

    pub fn rank(self) -> Rank {
        Rank::from_index(self.0 / 8).expect("rank index is always 0..=7")
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file().symbol(), self.rank().symbol())
    }
}
