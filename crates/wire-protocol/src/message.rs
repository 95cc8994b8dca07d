//! Typed messages and frame encoding

use crate::checksum::check_bytes;
use crate::error::{WireError, WireResult};
use crate::status::StatusReport;
use crate::START_BYTE;

/// Instruction codes, the high nibble of a frame's header byte
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Instruction {
    Reset = 0x0,
    StartWhite = 0x1,
    StartBlack = 0x2,
    HumanMove = 0x3,
    RobotMove = 0x4,
    GameStatus = 0x5,
    IllegalMove = 0x6,
}

impl Instruction {
    pub fn from_code(code: u8) -> WireResult<Instruction> {
        match code {
            0x0 => Ok(Instruction::Reset),
            0x1 => Ok(Instruction::StartWhite),
            0x2 => Ok(Instruction::StartBlack),
            0x3 => Ok(Instruction::HumanMove),
            0x4 => Ok(Instruction::RobotMove),
            0x5 => Ok(Instruction::GameStatus),
            0x6 => Ok(Instruction::IllegalMove),
            _ => Err(WireError::UnknownInstruction { code }),
        }
    }

    /// Every instruction has a fixed operand length
    pub fn operand_len(self) -> u8 {
        match self {
            Instruction::Reset
            | Instruction::StartWhite
            | Instruction::StartBlack
            | Instruction::IllegalMove => 0,
            Instruction::HumanMove | Instruction::RobotMove => 5,
            Instruction::GameStatus => 1,
        }
    }
}

/// One framed message, either direction
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message {
    /// Controller -> engine: abandon the current game
    Reset,
    /// Controller -> engine: new game, human plays white
    StartWhite,
    /// Controller -> engine: new game, human plays black
    StartBlack,
    /// Controller -> engine: the human's move, 5 UCI-style symbols
    HumanMove([u8; 5]),
    /// Engine -> controller: the robot's reply move
    RobotMove([u8; 5]),
    /// Engine -> controller: game status after both half-moves
    GameStatus(StatusReport),
    /// Engine -> controller: the human's move broke the rules
    IllegalMove,
}

impl Message {
    pub fn instruction(&self) -> Instruction {
        match self {
            Message::Reset => Instruction::Reset,
            Message::StartWhite => Instruction::StartWhite,
            Message::StartBlack => Instruction::StartBlack,
            Message::HumanMove(_) => Instruction::HumanMove,
            Message::RobotMove(_) => Instruction::RobotMove,
            Message::GameStatus(_) => Instruction::GameStatus,
            Message::IllegalMove => Instruction::IllegalMove,
        }
    }

    /// Encode the full frame: start byte, header, operand, check bytes
    pub fn encode(&self) -> Vec<u8> {
        let instruction = self.instruction();
        let len = instruction.operand_len();

        let mut frame = Vec::with_capacity(4 + len as usize);
        frame.push(START_BYTE);
        frame.push(((instruction as u8) << 4) | len);
        match self {
            Message::HumanMove(operand) | Message::RobotMove(operand) => {
                frame.extend_from_slice(operand);
            }
            Message::GameStatus(report) => frame.push(report.to_byte()),
            _ => {}
        }

        let check = check_bytes(&frame[1..]);
        frame.extend_from_slice(&check);
        frame
    }

    /// Build a message from a verified instruction and operand slice
    pub(crate) fn decode(instruction: Instruction, operand: &[u8]) -> WireResult<Message> {
        debug_assert_eq!(operand.len(), instruction.operand_len() as usize);
        Ok(match instruction {
            Instruction::Reset => Message::Reset,
            Instruction::StartWhite => Message::StartWhite,
            Instruction::StartBlack => Message::StartBlack,
            Instruction::HumanMove => {
                let mut bytes = [0u8; 5];
                bytes.copy_from_slice(operand);
                Message::HumanMove(bytes)
            }
            Instruction::RobotMove => {
                let mut bytes = [0u8; 5];
                bytes.copy_from_slice(operand);
                Message::RobotMove(bytes)
            }
            Instruction::GameStatus => Message::GameStatus(StatusReport::from_byte(operand[0])?),
            Instruction::IllegalMove => Message::IllegalMove,
        })
    }
}
