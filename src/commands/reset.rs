//! Full system reset
//!
//! Entry tears the old game down: motion halted, queue cleared, tracker
//! and serial state back to power-on. Exit chains the bring-up for the
//! next game, so pressing reset mid-anything always lands the system in
//! a fresh, homed, validated state.

use smallvec::smallvec;

use tracing::info;

use wire_protocol::Message;

use super::{Command, CommandStage, Followups};
use crate::game::orchestrator;
use crate::hal::IndicatorMode;
use crate::world::World;

pub struct ResetCommand;

impl ResetCommand {
    pub fn new() -> ResetCommand {
        ResetCommand
    }
}

impl Default for ResetCommand {
    fn default() -> Self {
        ResetCommand::new()
    }
}

impl CommandStage for ResetCommand {
    fn entry(&mut self, world: &mut World) {
        info!("resetting for a new game");
        world.services.actuator.halt();
        world.services.magnet.release();
        world.services.indicator.set(IndicatorMode::Waiting);
        world.queue.clear();
        world.tracker.reset();
        world.services.transport.reset();
        world.flags.clear_fault();
        world.flags.set_homing(false);
        world.flags.set_game_over(false);
        world.flags.clear_human_turn_complete();
        world.flags.set_human_input_enabled(false);
        world.flags.clear_move_rejected();
    }

    fn is_done(&self, _world: &World) -> bool {
        true
    }

    fn exit(&mut self, world: &mut World) -> Followups {
        world.flags.clear_reset_pending();
        // Tell the engine to abandon whatever game it thinks is running
        let mut followups: Followups = smallvec![Command::comm(Message::Reset)];
        followups.extend(orchestrator::homing_sequence(&world.config));
        followups.extend(orchestrator::start_sequence(
            &world.config,
            world.flags.color_white(),
        ));
        followups
    }
}
