//! Hardware abstraction
//!
//! Every device the controller touches sits behind a trait here: the three
//! axis steppers as one [`Actuator`], the hall-effect grid under the board
//! as a [`BoardSensor`], the operator buttons and safety switches as a
//! [`SwitchPanel`], the pickup [`Magnet`], the status [`Indicator`], and
//! the serial link to the engine as a [`SerialPort`]. The runtime only ever
//! polls; nothing in this layer blocks.
//!
//! [`sim`] provides in-process implementations for development and tests.

pub mod sim;

use board_tracker::Bitboard;

/// One motion request for the three-axis gantry
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MotionCommand {
    /// Travel to an absolute carriage position in millimeters
    Goto { x_mm: i32, y_mm: i32, z_mm: i32 },
    /// Move relative to the current position, used for the homing back-off
    Relative { dx_mm: i32, dy_mm: i32, dz_mm: i32 },
    /// Drive all axes toward their limit switches
    HomeAll,
}

/// The gantry's motion axes, one in-flight motion at a time
pub trait Actuator {
    /// Begin a motion; any previous motion must already be done or halted
    fn start(&mut self, motion: MotionCommand);
    /// True once the in-flight motion has finished
    fn is_done(&self) -> bool;
    /// Stop immediately, discarding the in-flight motion
    fn halt(&mut self);
}

/// Hall-effect presence grid under the board, one bit per square
pub trait BoardSensor {
    fn read(&mut self) -> Bitboard;
}

/// Instantaneous state of the operator buttons and safety switches
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SwitchState {
    /// Human is holding the capture button
    pub capture: bool,
    /// Human is holding the end-turn button
    pub end_turn: bool,
    /// Operator is holding the reset button
    pub reset: bool,
    /// Emergency stop is engaged
    pub estop: bool,
    /// Any axis limit switch is tripped
    pub limit: bool,
    /// Color rocker is in the white position, giving the human white
    pub color_white: bool,
}

/// Button and switch inputs, sampled once per scheduler tick
pub trait SwitchPanel {
    fn read(&mut self) -> SwitchState;
}

/// Electromagnet on the gantry carriage
pub trait Magnet {
    fn engage(&mut self);
    fn release(&mut self);
}

/// What the status lamp is telling the human
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IndicatorMode {
    Off,
    /// Red, the controller faulted and needs a reset
    Error,
    /// Blue, waiting on the human or the engine
    Waiting,
    /// Green, the gantry is moving
    Moving,
}

/// Status lamp facing the human
pub trait Indicator {
    fn set(&mut self, mode: IndicatorMode);
}

/// Byte-oriented serial link to the engine, non-blocking both ways
pub trait SerialPort {
    /// Queue bytes for transmission; a full or closed link drops them
    fn write(&mut self, bytes: &[u8]);
    /// Take one received byte if any is pending
    fn read_byte(&mut self) -> Option<u8>;
}
