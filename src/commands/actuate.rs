//! One gantry motion

use super::{CommandStage, Followups};
use crate::hal::{IndicatorMode, MotionCommand};
use crate::world::World;

/// What to do with the pickup magnet once a motion lands
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MagnetAction {
    Engage,
    Release,
}

/// Drives one motion to completion, optionally switching the magnet at
/// the end so pick-ups happen at grip height, never mid-travel
pub struct ActuateCommand {
    motion: MotionCommand,
    magnet_after: Option<MagnetAction>,
}

impl ActuateCommand {
    pub fn new(motion: MotionCommand, magnet_after: Option<MagnetAction>) -> ActuateCommand {
        ActuateCommand {
            motion,
            magnet_after,
        }
    }
}

impl CommandStage for ActuateCommand {
    fn entry(&mut self, world: &mut World) {
        world.services.indicator.set(IndicatorMode::Moving);
        world.services.actuator.start(self.motion);
    }

    fn is_done(&self, world: &World) -> bool {
        world.services.actuator.is_done()
    }

    fn exit(&mut self, world: &mut World) -> Followups {
        match self.magnet_after {
            Some(MagnetAction::Engage) => world.services.magnet.engage(),
            Some(MagnetAction::Release) => world.services.magnet.release(),
            None => {}
        }
        Followups::new()
    }
}
