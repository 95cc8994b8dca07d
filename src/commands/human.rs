//! The human's turn
//!
//! The command itself is mostly a wait: input scanning notes capture and
//! end-turn presses against the board tracker while this holds the service
//! slot. When the end-turn flag arrives the move is inferred from the
//! sensed occupancy. A reading the tracker cannot explain does not end the
//! turn; the staged state is discarded and the human gets to fix the board
//! and press end-turn again.

use smallvec::smallvec;

use tracing::{info, warn};

use board_tracker::ChessMove;

use super::{Command, CommandStage, Followups};
use crate::hal::IndicatorMode;
use crate::world::World;

pub struct HumanCommand {
    inferred: Option<ChessMove>,
}

impl HumanCommand {
    pub fn new() -> HumanCommand {
        HumanCommand { inferred: None }
    }
}

impl Default for HumanCommand {
    fn default() -> Self {
        HumanCommand::new()
    }
}

impl CommandStage for HumanCommand {
    fn entry(&mut self, world: &mut World) {
        // A redo after a rejected move keeps the error lamp lit
        if !world.flags.take_move_rejected() {
            world.services.indicator.set(IndicatorMode::Waiting);
        }
        // A press from before this turn started must not count
        world.flags.clear_human_turn_complete();
        world.flags.set_human_input_enabled(true);
        info!("waiting on the human's move");
    }

    fn action(&mut self, world: &mut World) {
        if !world.flags.take_human_turn_complete() {
            return;
        }
        match world.tracker.infer_human_move() {
            Ok(mv) => {
                info!(%mv, "inferred human move");
                world.services.indicator.set(IndicatorMode::Waiting);
                self.inferred = Some(mv);
            }
            Err(err) => {
                warn!(%err, "could not infer a move, waiting for a redo");
                world.services.indicator.set(IndicatorMode::Error);
                world.tracker.reject_human_move();
            }
        }
    }

    fn is_done(&self, _world: &World) -> bool {
        self.inferred.is_some()
    }

    fn exit(&mut self, world: &mut World) -> Followups {
        world.flags.set_human_input_enabled(false);
        world.stats.moves_played += 1;
        let mv = self.inferred.as_ref().expect("done implies a move");
        smallvec![Command::send_human_move(mv), Command::robot()]
    }
}
