//! Shared controller state
//!
//! Everything a command may touch during its lifecycle steps lives in one
//! [`World`]: configuration, the command queue, the event flags, the board
//! tracker, the device handles, and run counters.

use board_tracker::BoardTracker;

use crate::clock::Clock;
use crate::config::Config;
use crate::game::flags::SystemFlags;
use crate::hal::{Actuator, BoardSensor, Indicator, Magnet, SwitchPanel};
use crate::sched::CommandQueue;
use crate::transport::Transport;

/// Device handles the commands drive
pub struct Services {
    pub clock: Box<dyn Clock>,
    pub actuator: Box<dyn Actuator>,
    pub sensor: Box<dyn BoardSensor>,
    pub switches: Box<dyn SwitchPanel>,
    pub magnet: Box<dyn Magnet>,
    pub indicator: Box<dyn Indicator>,
    pub transport: Transport,
}

/// Run counters, reported when the controller shuts down
#[derive(Debug, Default)]
pub struct Stats {
    pub ticks: u64,
    pub commands_completed: u64,
    pub moves_played: u64,
    pub pieces_captured: u64,
}

pub struct World {
    pub config: Config,
    pub queue: CommandQueue,
    pub flags: SystemFlags,
    pub tracker: BoardTracker,
    pub services: Services,
    pub stats: Stats,
}

impl World {
    pub fn new(config: Config, services: Services) -> World {
        let queue = CommandQueue::with_capacity(config.queue_capacity);
        World {
            config,
            queue,
            flags: SystemFlags::new(),
            tracker: BoardTracker::new(),
            services,
            stats: Stats::default(),
        }
    }
}
