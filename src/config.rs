//! Runtime configuration
//!
//! Everything an operator might tune between games lives here: which color
//! the human plays, the serial retry period, and the gantry motion envelope.
//! Loaded from a JSON file when one is given, otherwise defaults apply.

use std::path::Path;

use serde::{Deserialize, Serialize};

use board_tracker::PieceColor;

use crate::error::ControllerResult;

/// Which side of the board the human occupies
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HumanColor {
    White,
    Black,
}

impl HumanColor {
    pub fn piece_color(self) -> PieceColor {
        match self {
            HumanColor::White => PieceColor::White,
            HumanColor::Black => PieceColor::Black,
        }
    }
}

/// Controller configuration, JSON on disk
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pins the color the human plays, overriding the panel's color
    /// rocker; leave unset to let the rocker decide at each reset
    pub human_color: Option<HumanColor>,
    /// How long to wait for an acknowledgement before retransmitting
    pub retry_period_ms: u64,
    /// Command queue capacity; pushes beyond this are dropped
    pub queue_capacity: usize,
    /// Scheduler tick period when running against real hardware
    pub tick_period_ms: u64,
    /// Milliseconds the gantry settles after a homing run
    pub homing_settle_ms: u64,
    /// Square pitch of the physical board in millimeters
    pub square_pitch_mm: i32,
    /// Carriage height while traveling between squares
    pub travel_height_mm: i32,
    /// Carriage height when picking up or setting down a piece
    pub grip_height_mm: i32,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            human_color: None,
            retry_period_ms: 5_000,
            queue_capacity: 128,
            tick_period_ms: 10,
            homing_settle_ms: 500,
            square_pitch_mm: 50,
            travel_height_mm: 60,
            grip_height_mm: 5,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> ControllerResult<Config> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}
