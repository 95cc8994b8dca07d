//! Start-position gate
//!
//! Blocks until every starting square reads occupied, so a game never
//! begins against a half-set board. The sensed grid cannot tell which
//! piece sits where, so matching the occupancy mask is the strongest
//! check available. A mismatched board shows the error lamp until it is
//! corrected.

use tracing::info;

use board_tracker::INITIAL_PRESENCE;

use super::{CommandStage, Followups};
use crate::hal::IndicatorMode;
use crate::world::World;

pub struct ValidateCommand {
    satisfied: bool,
}

impl ValidateCommand {
    pub fn new() -> ValidateCommand {
        ValidateCommand { satisfied: false }
    }
}

impl Default for ValidateCommand {
    fn default() -> Self {
        ValidateCommand::new()
    }
}

impl CommandStage for ValidateCommand {
    fn entry(&mut self, world: &mut World) {
        world.services.indicator.set(IndicatorMode::Waiting);
        info!("waiting for pieces on their starting squares");
    }

    fn action(&mut self, world: &mut World) {
        let reading = world.services.sensor.read();
        self.satisfied = reading.0 == INITIAL_PRESENCE;
        if !self.satisfied {
            world.services.indicator.set(IndicatorMode::Error);
        }
    }

    fn is_done(&self, _world: &World) -> bool {
        self.satisfied
    }

    fn exit(&mut self, _world: &mut World) -> Followups {
        info!("board set, game on");
        Followups::new()
    }
}
