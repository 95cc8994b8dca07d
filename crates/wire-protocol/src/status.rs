//! Game status codes
//!
//! The engine is the only party that knows whether the game is over; this
//! controller never evaluates the position. A `GAME_STATUS` frame carries
//! one operand byte holding two nibbles: the status after the human's move
//! (high) and after the robot's reply (low).

use crate::error::{WireError, WireResult};

/// Raw per-move status nibble as the engine reports it
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum StatusCode {
    /// The game continues
    Ongoing = 0x1,
    /// The move just made delivered checkmate
    Checkmate = 0x2,
    /// The move just made caused stalemate
    Stalemate = 0x3,
}

impl StatusCode {
    pub fn nibble(self) -> u8 {
        self as u8
    }

    pub fn from_nibble(value: u8) -> WireResult<StatusCode> {
        match value {
            0x1 => Ok(StatusCode::Ongoing),
            0x2 => Ok(StatusCode::Checkmate),
            0x3 => Ok(StatusCode::Stalemate),
            _ => Err(WireError::BadStatusNibble { value }),
        }
    }
}

/// Both halves of a `GAME_STATUS` operand byte
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StatusReport {
    /// Status after the human's move was applied
    pub after_human: StatusCode,
    /// Status after the robot's reply (equals `after_human` when the game
    /// ended before the robot could move)
    pub after_robot: StatusCode,
}

impl StatusReport {
    pub fn ongoing() -> StatusReport {
        StatusReport {
            after_human: StatusCode::Ongoing,
            after_robot: StatusCode::Ongoing,
        }
    }

    pub fn to_byte(self) -> u8 {
        (self.after_human.nibble() << 4) | self.after_robot.nibble()
    }

    pub fn from_byte(byte: u8) -> WireResult<StatusReport> {
        Ok(StatusReport {
            after_human: StatusCode::from_nibble(byte >> 4)?,
            after_robot: StatusCode::from_nibble(byte & 0x0F)?,
        })
    }

    /// Collapse the two nibbles into the single authoritative game outcome
    pub fn outcome(self) -> GameOutcome {
        if self.after_human == StatusCode::Checkmate {
            GameOutcome::HumanWin
        } else if self.after_robot == StatusCode::Checkmate {
            GameOutcome::RobotWin
        } else if self.after_human == StatusCode::Stalemate
            || self.after_robot == StatusCode::Stalemate
        {
            GameOutcome::Stalemate
        } else {
            GameOutcome::Ongoing
        }
    }
}

/// Authoritative game state, never computed locally
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    Ongoing,
    HumanWin,
    RobotWin,
    Stalemate,
}
