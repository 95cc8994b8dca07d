//! Game-level coordination: event flags, input scanning, and the
//! translation of game turns into command sequences.

pub mod flags;
pub mod inputs;
pub mod orchestrator;

pub use flags::SystemFlags;
pub use inputs::InputScanner;
