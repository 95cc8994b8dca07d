//! Cooperative command scheduling
//!
//! The controller is a single foreground loop: a bounded FIFO of commands
//! and a scheduler that services exactly one command at a time, advancing
//! it by one short `action` step per tick. Commands never block, so input
//! scanning and the serial link stay responsive between steps.

pub mod queue;
pub mod scheduler;

pub use queue::CommandQueue;
pub use scheduler::Scheduler;
