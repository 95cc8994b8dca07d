//! Fixed wait between motions

use super::CommandStage;
use crate::world::World;

/// Holds the scheduler's single service slot for a fixed span of time
pub struct DelayCommand {
    duration_ms: u64,
    deadline_ms: Option<u64>,
}

impl DelayCommand {
    pub fn new(duration_ms: u64) -> DelayCommand {
        DelayCommand {
            duration_ms,
            deadline_ms: None,
        }
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }
}

impl CommandStage for DelayCommand {
    fn entry(&mut self, world: &mut World) {
        self.deadline_ms = Some(world.services.clock.now_ms() + self.duration_ms);
    }

    fn is_done(&self, world: &World) -> bool {
        match self.deadline_ms {
            Some(deadline) => world.services.clock.now_ms() >= deadline,
            None => false,
        }
    }
}
