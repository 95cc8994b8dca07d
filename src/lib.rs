//! # Gantrychess - Controller for a Piece-Moving Chess Gantry
//!
//! The controller that lets a human play chess against an engine on a real
//! board: a hall-effect grid senses where pieces sit, a three-axis gantry
//! with an electromagnet physically plays the engine's replies, and a
//! serial link carries moves to and from the engine, which is the sole
//! authority on legality and game state.
//!
//! Everything runs as one cooperative loop. Work is expressed as commands
//! with an entry/action/is-done/exit lifecycle ([`commands`]), serviced one
//! at a time from a bounded FIFO ([`sched`]). A finished command chains the
//! next ones, which is how a reset unrolls into homing, bring-up, and the
//! first turn, and how turns alternate for the rest of the game.
//!
//! The human's moves are never typed in; they are inferred from occupancy
//! diffs between board snapshots ([`board_tracker`]), with a capture button
//! marking the mid-turn state a single diff cannot explain. Frames on the
//! serial link are checksummed and acknowledged ([`wire_protocol`],
//! [`transport`]), and every unacknowledged send is retried forever.
//!
//! Hardware sits behind the traits in [`hal`]; [`rig`] assembles the whole
//! controller against simulated devices for the demo binary and the
//! integration tests.

pub mod clock;
pub mod commands;
pub mod config;
pub mod error;
pub mod game;
pub mod hal;
pub mod peer;
pub mod rig;
pub mod runtime;
pub mod sched;
pub mod transport;
pub mod world;

pub use config::{Config, HumanColor};
pub use error::{ControllerError, ControllerResult};
pub use rig::SimRig;
pub use runtime::Runtime;
