//! Controller-level error types

use thiserror::Error;

/// Errors surfaced by the controller runtime
#[derive(Error, Debug)]
pub enum ControllerError {
    /// Board tracking or move inference failed
    #[error("board tracking error: {0}")]
    Board(#[from] board_tracker::BoardError),

    /// Serial frame could not be encoded or decoded
    #[error("wire protocol error: {0}")]
    Wire(#[from] wire_protocol::WireError),

    /// Configuration file could not be read
    #[error("failed to read config file: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("failed to parse config file: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// Result type alias for controller operations
pub type ControllerResult<T> = Result<T, ControllerError>;
