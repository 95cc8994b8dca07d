//! Single-flight command scheduler

use tracing::debug;

use crate::commands::{Command, CommandStage};
use crate::world::World;

/// Services one command at a time from the world's queue
#[derive(Default)]
pub struct Scheduler {
    in_service: Option<Command>,
}

impl Scheduler {
    pub fn new() -> Scheduler {
        Scheduler { in_service: None }
    }

    /// True when nothing is in service
    pub fn is_idle(&self) -> bool {
        self.in_service.is_none()
    }

    /// Label of the command in service, for diagnostics
    pub fn in_service_label(&self) -> Option<&'static str> {
        self.in_service.as_ref().map(Command::label)
    }

    /// Drop the in-service command without running its exit step.
    /// Fault teardown only; exit followups must not be enqueued then.
    pub fn abort_in_service(&mut self) -> Option<Command> {
        self.in_service.take()
    }

    /// One cooperative step: dequeue if idle, run one action, and on
    /// completion run exit and enqueue its followups in order
    pub fn tick(&mut self, world: &mut World) {
        if self.in_service.is_none() {
            if let Some(mut command) = world.queue.pop() {
                debug!(command = command.label(), "entering service");
                command.entry(world);
                self.in_service = Some(command);
            }
        }

        let done = match self.in_service.as_mut() {
            Some(command) => {
                command.action(world);
                command.is_done(world)
            }
            None => return,
        };

        if done {
            let mut command = self.in_service.take().expect("command was in service");
            debug!(command = command.label(), "leaving service");
            let followups = command.exit(world);
            world.stats.commands_completed += 1;
            for followup in followups {
                world.queue.push(followup);
            }
        }
    }
}
