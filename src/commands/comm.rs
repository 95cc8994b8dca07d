//! Reliable frame delivery
//!
//! Sends one frame and waits for the peer's bare acknowledgement byte,
//! retransmitting the identical frame each time a full retry period passes
//! without one. There is no retry limit and no NACK; a dead link shows up
//! as an ever-growing retransmit count, and only an operator reset moves
//! the controller past it.

use tracing::debug;

use wire_protocol::Message;

use super::CommandStage;
use crate::world::World;

pub struct CommCommand {
    message: Message,
    sent_at_ms: Option<u64>,
    acked: bool,
}

impl CommCommand {
    pub fn new(message: Message) -> CommCommand {
        CommCommand {
            message,
            sent_at_ms: None,
            acked: false,
        }
    }

    pub fn message(&self) -> &Message {
        &self.message
    }
}

impl CommandStage for CommCommand {
    fn entry(&mut self, world: &mut World) {
        world.services.transport.send(&self.message);
        self.sent_at_ms = Some(world.services.clock.now_ms());
    }

    fn action(&mut self, world: &mut World) {
        world.services.transport.poll();
        if world.services.transport.take_ack() {
            debug!(message = ?self.message, "frame acknowledged");
            self.acked = true;
            return;
        }

        let now = world.services.clock.now_ms();
        if let Some(sent_at) = self.sent_at_ms {
            if now.saturating_sub(sent_at) >= world.config.retry_period_ms {
                world.services.transport.resend(&self.message);
                self.sent_at_ms = Some(now);
            }
        }
    }

    fn is_done(&self, _world: &World) -> bool {
        self.acked
    }
}
