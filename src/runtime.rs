//! The controller's main loop
//!
//! One tick is: scan inputs, handle a fault if one is latched, then give
//! the scheduler one step. Faults freeze scheduling entirely; the queue is
//! emptied, the in-service command is dropped without its exit step, and
//! only an operator reset press starts work again.

use tracing::warn;

use crate::config::Config;
use crate::game::{orchestrator, InputScanner};
use crate::sched::Scheduler;
use crate::world::{Services, World};

pub struct Runtime {
    world: World,
    scheduler: Scheduler,
    scanner: InputScanner,
    fault_torn_down: bool,
}

impl Runtime {
    /// Builds the world and queues the initial reset, so bring-up runs as
    /// soon as ticking starts
    pub fn new(config: Config, services: Services) -> Runtime {
        let mut world = World::new(config, services);
        world.flags.raise_reset_pending();
        world.queue.push(crate::commands::Command::reset());
        Runtime {
            world,
            scheduler: Scheduler::new(),
            scanner: InputScanner::new(),
            fault_torn_down: false,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn in_service_label(&self) -> Option<&'static str> {
        self.scheduler.in_service_label()
    }

    /// Nothing queued and nothing in service
    pub fn is_idle(&self) -> bool {
        self.scheduler.is_idle() && self.world.queue.is_empty()
    }

    pub fn tick(&mut self) {
        self.scanner.scan(&mut self.world);

        // A reset press preempts whatever is running; the command in
        // service is dropped without its exit step, same as a fault
        if self.world.flags.take_reset_requested() {
            if let Some(aborted) = self.scheduler.abort_in_service() {
                warn!(command = aborted.label(), "preempted by reset");
            }
            self.world.queue.clear();
            self.world.queue.push(crate::commands::Command::reset());
        }

        if self.world.flags.faulted() {
            if !self.fault_torn_down {
                orchestrator::halt_motion(&mut self.world);
                self.world.queue.clear();
                if let Some(aborted) = self.scheduler.abort_in_service() {
                    warn!(command = aborted.label(), "aborted without exit");
                }
                // A reset that died in the queue must not block the next press
                self.world.flags.clear_reset_pending();
                self.fault_torn_down = true;
            }
            self.world.stats.ticks += 1;
            return;
        }
        self.fault_torn_down = false;

        self.scheduler.tick(&mut self.world);
        self.world.stats.ticks += 1;
    }

    /// Drive a fixed number of ticks, for simulation and tests
    pub fn run_for(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.tick();
        }
    }
}
