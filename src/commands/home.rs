//! Homing guard toggle

use super::CommandStage;
use crate::world::World;

/// Marks the start or end of a homing run. While the guard is engaged the
/// axis limit switches are expected to trip and must not fault the system.
pub struct HomeCommand {
    engage: bool,
}

impl HomeCommand {
    pub fn new(engage: bool) -> HomeCommand {
        HomeCommand { engage }
    }
}

impl CommandStage for HomeCommand {
    fn entry(&mut self, world: &mut World) {
        world.flags.set_homing(self.engage);
    }

    fn is_done(&self, _world: &World) -> bool {
        true
    }
}
