//! The engine's turn
//!
//! Waits for the engine's verdict on the human's move and its own reply.
//! Three shapes of response exist: an illegal-move frame (the human's move
//! is rolled back and the turn replayed), a reply move followed by a game
//! status, or a bare game status when the human's move ended the game and
//! the engine had no reply to make.
//!
//! The human's staged move is only committed once the engine accepts it;
//! until then the tracker can roll the turn back cleanly.

use smallvec::smallvec;

use tracing::{error, info, warn};

use board_tracker::ChessMove;
use wire_protocol::{GameOutcome, Message};

use super::{Command, CommandStage, Followups};
use crate::game::orchestrator;
use crate::hal::IndicatorMode;
use crate::world::World;

pub struct RobotCommand {
    reply: Option<ChessMove>,
    outcome: Option<GameOutcome>,
    illegal: bool,
    confirmed: bool,
}

impl RobotCommand {
    pub fn new() -> RobotCommand {
        RobotCommand {
            reply: None,
            outcome: None,
            illegal: false,
            confirmed: false,
        }
    }
}

impl Default for RobotCommand {
    fn default() -> Self {
        RobotCommand::new()
    }
}

impl CommandStage for RobotCommand {
    fn entry(&mut self, world: &mut World) {
        world.services.indicator.set(IndicatorMode::Waiting);
        info!("waiting on the engine");
    }

    fn action(&mut self, world: &mut World) {
        world.services.transport.poll();
        while let Some(message) = world.services.transport.take_message() {
            match message {
                Message::RobotMove(bytes) => match ChessMove::from_wire(bytes) {
                    Ok(mv) => {
                        if !self.confirmed {
                            world.tracker.confirm_human_move();
                            self.confirmed = true;
                        }
                        info!(%mv, "engine reply");
                        self.reply = Some(mv);
                    }
                    Err(err) => warn!(%err, "unparseable reply move, ignoring"),
                },
                Message::IllegalMove => {
                    warn!("engine rejected the human's move");
                    world.services.indicator.set(IndicatorMode::Error);
                    world.flags.raise_move_rejected();
                    world.tracker.reject_human_move();
                    self.illegal = true;
                }
                Message::GameStatus(report) => {
                    // A status with no reply move means the human's move
                    // ended the game; it was legal, so commit it
                    if !self.confirmed && !self.illegal {
                        world.tracker.confirm_human_move();
                        self.confirmed = true;
                    }
                    self.outcome = Some(report.outcome());
                }
                other => warn!(message = ?other, "unexpected frame from engine"),
            }
        }
    }

    fn is_done(&self, _world: &World) -> bool {
        self.illegal || self.outcome.is_some()
    }

    fn exit(&mut self, world: &mut World) -> Followups {
        if self.illegal {
            return smallvec![Command::human()];
        }

        let mut followups = Followups::new();
        if let Some(mv) = self.reply.take() {
            followups.extend(orchestrator::plan_move_actuation(
                &world.config,
                world.tracker.current(),
                &mut world.stats,
                &mv,
            ));
            if let Err(err) = world.tracker.apply_robot_move(&mv) {
                // The engine and the tracker disagree about the board;
                // nothing sane can be scheduled past this point
                error!(%err, %mv, "engine reply does not fit the tracked board");
                world.flags.raise_fault();
                return Followups::new();
            }
            // Park the carriage off the playing area once the move is down
            followups.extend(orchestrator::homing_sequence(&world.config));
            world.stats.moves_played += 1;
        }

        match self.outcome.expect("done implies an outcome") {
            GameOutcome::Ongoing => followups.push(Command::human()),
            outcome => {
                info!(?outcome, "game over");
                world.flags.set_game_over(true);
                world.services.indicator.set(IndicatorMode::Waiting);
            }
        }
        followups
    }
}
