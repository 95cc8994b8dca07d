//! Incremental frame parser
//!
//! [`FrameParser`] is a byte-at-a-time state machine so the receive path
//! can run inside a polling loop without buffering a whole frame first.
//! Bytes outside a frame are ignored until a start byte arrives, which
//! also makes the parser self-synchronizing after line noise. Any decode
//! error resets the parser to hunting for the next start byte; the frame
//! is lost and the sender's retry timer is expected to resend it.

use crate::checksum::fletcher16;
use crate::error::{WireError, WireResult};
use crate::message::{Instruction, Message};
use crate::START_BYTE;

#[derive(Debug)]
enum ParseState {
    /// Hunting for a start byte
    Idle,
    /// Start byte seen, next byte is the header
    Header,
    /// Collecting `remaining` operand bytes
    Operand { instruction: Instruction, remaining: u8 },
    /// Awaiting the low check byte
    CheckLo { instruction: Instruction },
    /// Awaiting the high check byte
    CheckHi { instruction: Instruction, check_lo: u8 },
}

/// Byte-at-a-time decoder for framed messages
#[derive(Debug)]
pub struct FrameParser {
    state: ParseState,
    /// Header and operand bytes of the frame in flight, checksum input
    buffer: Vec<u8>,
}

impl Default for FrameParser {
    fn default() -> Self {
        FrameParser::new()
    }
}

impl FrameParser {
    pub fn new() -> FrameParser {
        FrameParser {
            state: ParseState::Idle,
            buffer: Vec::with_capacity(8),
        }
    }

    /// True when no frame is in flight; a bare acknowledgement byte is
    /// only an acknowledgement in this state
    pub fn is_idle(&self) -> bool {
        matches!(self.state, ParseState::Idle)
    }

    /// Drop any partial frame and return to hunting for a start byte
    pub fn reset(&mut self) {
        self.state = ParseState::Idle;
        self.buffer.clear();
    }

    /// Feed one received byte; returns a complete message when the final
    /// check byte verifies, `None` while the frame is still in flight
    pub fn push_byte(&mut self, byte: u8) -> WireResult<Option<Message>> {
        match self.state {
            ParseState::Idle => {
                if byte == START_BYTE {
                    self.buffer.clear();
                    self.state = ParseState::Header;
                }
                Ok(None)
            }
            ParseState::Header => {
                self.buffer.push(byte);
                let code = byte >> 4;
                let found = byte & 0x0F;
                let instruction = match Instruction::from_code(code) {
                    Ok(instruction) => instruction,
                    Err(err) => {
                        self.reset();
                        return Err(err);
                    }
                };
                let expected = instruction.operand_len();
                if found != expected {
                    self.reset();
                    return Err(WireError::BadOperandLength {
                        code,
                        expected,
                        found,
                    });
                }
                self.state = if expected == 0 {
                    ParseState::CheckLo { instruction }
                } else {
                    ParseState::Operand {
                        instruction,
                        remaining: expected,
                    }
                };
                Ok(None)
            }
            ParseState::Operand {
                instruction,
                remaining,
            } => {
                self.buffer.push(byte);
                self.state = if remaining == 1 {
                    ParseState::CheckLo { instruction }
                } else {
                    ParseState::Operand {
                        instruction,
                        remaining: remaining - 1,
                    }
                };
                Ok(None)
            }
            ParseState::CheckLo { instruction } => {
                self.state = ParseState::CheckHi {
                    instruction,
                    check_lo: byte,
                };
                Ok(None)
            }
            ParseState::CheckHi {
                instruction,
                check_lo,
            } => {
                let received = ((byte as u16) << 8) | check_lo as u16;
                let computed = fletcher16(&self.buffer);
                if computed != received {
                    self.reset();
                    return Err(WireError::ChecksumMismatch { computed, received });
                }
                let message = Message::decode(instruction, &self.buffer[1..]);
                self.reset();
                message.map(Some)
            }
        }
    }
}
