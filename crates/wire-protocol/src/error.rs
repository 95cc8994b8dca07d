//! Error types for the wire protocol

use thiserror::Error;

/// Errors that can occur while encoding or decoding frames
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireError {
    /// Header carried an instruction code outside the protocol table
    #[error("unknown instruction code: {code:#x}")]
    UnknownInstruction { code: u8 },

    /// Header operand length disagrees with the instruction's fixed length
    #[error("instruction {code:#x} expects {expected} operand bytes, header says {found}")]
    BadOperandLength { code: u8, expected: u8, found: u8 },

    /// Frame checksum did not match the received check bytes
    #[error("checksum mismatch: computed {computed:#06x}, received {received:#06x}")]
    ChecksumMismatch { computed: u16, received: u16 },

    /// Game status nibble outside the defined codes
    #[error("unrecognized game status nibble: {value:#x}")]
    BadStatusNibble { value: u8 },
}

/// Result type alias for wire protocol operations
pub type WireResult<T> = Result<T, WireError>;
