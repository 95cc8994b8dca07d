//! # Wire Protocol - Framed Serial Messages Between Controller and Engine
//!
//! The controller and the external move-legality/opponent engine share a
//! half-duplex serial link. A framed message is:
//!
//! ```text
//! START_BYTE | instruction << 4 | operand_len | operand bytes ... | ck_lo | ck_hi
//! ```
//!
//! The two check bytes are the Fletcher-16 checksum of the header byte and
//! the operand bytes. A bare [`ACK_BYTE`] outside any frame acknowledges
//! receipt; there is no NACK, corrupted frames are silently dropped and the
//! sender's retry timer recovers the exchange.
//!
//! [`Message`] is the typed view of a frame, [`FrameParser`] consumes bytes
//! one at a time (the receive path must never block), and [`checksum`]
//! carries the Fletcher-16 primitive.

pub mod checksum;
pub mod error;
pub mod message;
pub mod parser;
pub mod status;

pub use error::{WireError, WireResult};
pub use message::{Instruction, Message};
pub use parser::FrameParser;
pub use status::{GameOutcome, StatusCode, StatusReport};

/// Every framed message begins with this byte
pub const START_BYTE: u8 = 0x0A;

/// Bare acknowledgement byte, sent outside the framing
pub const ACK_BYTE: u8 = 0x06;
