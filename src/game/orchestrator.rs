//! Turn planning
//!
//! Turns game events into command sequences: the homing run after a reset,
//! the bring-up for a new game, and the motion plan that physically plays
//! an engine move. Planning only builds commands; all device work happens
//! when the scheduler services them.

use smallvec::smallvec;

use tracing::{info, warn};

use board_tracker::{castle_rook_move, BoardSnapshot, ChessMove, MoveKind, Square};
use wire_protocol::Message;

use crate::commands::{Command, Followups, MagnetAction};
use crate::config::{Config, HumanColor};
use crate::hal::{IndicatorMode, MotionCommand};
use crate::world::{Stats, World};

/// Millimeters each axis backs off its limit switch after homing
const HOMING_BACKOFF_MM: i32 = 6;

/// Carriage position over the center of a square
fn square_position(config: &Config, square: Square) -> (i32, i32) {
    let pitch = config.square_pitch_mm;
    (
        square.file().index() as i32 * pitch + pitch / 2,
        square.rank().index() as i32 * pitch + pitch / 2,
    )
}

/// Off-board drop position for the nth captured piece, one column past
/// the a-file, stacked two per square pitch
fn graveyard_position(config: &Config, captured: u64) -> (i32, i32) {
    let pitch = config.square_pitch_mm;
    (-pitch / 2, captured as i32 * pitch / 2 + pitch / 4)
}

/// Pick a piece up at `from` and set it down at `to`
fn transfer(config: &Config, from: (i32, i32), to: (i32, i32)) -> Followups {
    let travel = config.travel_height_mm;
    let grip = config.grip_height_mm;
    smallvec![
        Command::actuate(MotionCommand::Goto {
            x_mm: from.0,
            y_mm: from.1,
            z_mm: travel,
        }),
        Command::actuate_then(
            MotionCommand::Goto {
                x_mm: from.0,
                y_mm: from.1,
                z_mm: grip,
            },
            MagnetAction::Engage,
        ),
        Command::actuate(MotionCommand::Goto {
            x_mm: from.0,
            y_mm: from.1,
            z_mm: travel,
        }),
        Command::actuate(MotionCommand::Goto {
            x_mm: to.0,
            y_mm: to.1,
            z_mm: travel,
        }),
        Command::actuate_then(
            MotionCommand::Goto {
                x_mm: to.0,
                y_mm: to.1,
                z_mm: grip,
            },
            MagnetAction::Release,
        ),
        Command::actuate(MotionCommand::Goto {
            x_mm: to.0,
            y_mm: to.1,
            z_mm: travel,
        }),
    ]
}

/// Homing run: drive every axis into its limit switch, settle, then back
/// off so the switches release. The guard commands keep the limit trips
/// from reading as faults.
pub fn homing_sequence(config: &Config) -> Followups {
    smallvec![
        Command::home(true),
        Command::actuate(MotionCommand::HomeAll),
        Command::delay(config.homing_settle_ms),
        Command::actuate(MotionCommand::Relative {
            dx_mm: HOMING_BACKOFF_MM,
            dy_mm: HOMING_BACKOFF_MM,
            dz_mm: 0,
        }),
        Command::home(false),
    ]
}

/// New-game bring-up: tell the engine who plays which color, wait for the
/// pieces to be set, then hand the turn to whoever owns white. The panel
/// rocker assigns the human's color unless the config pins one.
pub fn start_sequence(config: &Config, color_white: bool) -> Followups {
    let human_color = config.human_color.unwrap_or(if color_white {
        HumanColor::White
    } else {
        HumanColor::Black
    });
    let (start, first_turn) = match human_color {
        HumanColor::White => (Message::StartWhite, Command::human()),
        HumanColor::Black => (Message::StartBlack, Command::robot()),
    };
    smallvec![Command::comm(start), Command::validate(), first_turn]
}

/// Motion plan for physically playing an engine move on the board the
/// human currently sees. Captured pieces leave the board first so the
/// mover's destination square is clear.
pub fn plan_move_actuation(
    config: &Config,
    board: &BoardSnapshot,
    stats: &mut Stats,
    mv: &ChessMove,
) -> Followups {
    let mut plan = Followups::new();

    let victim = match mv.kind {
        MoveKind::Capture => Some(mv.dest),
        MoveKind::EnPassant => Some(Square::new(mv.dest.file(), mv.source.rank())),
        _ => None,
    };
    if let Some(victim) = victim {
        if board.piece_at(victim).is_none() {
            warn!(square = %victim, "capture planned against an empty square");
        }
        let grave = graveyard_position(config, stats.pieces_captured);
        plan.extend(transfer(config, square_position(config, victim), grave));
        stats.pieces_captured += 1;
    }

    plan.extend(transfer(
        config,
        square_position(config, mv.source),
        square_position(config, mv.dest),
    ));

    if mv.kind == MoveKind::Castle {
        if let Some(rook) = castle_rook_move(mv.dest) {
            plan.extend(transfer(
                config,
                square_position(config, rook.source),
                square_position(config, rook.dest),
            ));
        }
    }

    if mv.kind == MoveKind::Promotion {
        // The magnet cannot swap a pawn for a queen by itself
        info!(%mv, "promotion played; operator must swap in the promoted piece");
    }

    plan
}

/// Immediate fault response: stop moving and show the error lamp. The
/// queue and in-service command are the runtime's to tear down.
pub fn halt_motion(world: &mut World) {
    world.services.actuator.halt();
    world.services.indicator.set(IndicatorMode::Error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_tracker::{File, Rank};

    fn square(file: char, rank: char) -> Square {
        Square::from_symbols(file, rank).unwrap()
    }

    #[test]
    fn test_square_positions_are_center_of_pitch() {
        let config = Config::default();
        let a1 = square_position(&config, Square::new(File::A, Rank::First));
        assert_eq!(a1, (25, 25));
        let h8 = square_position(&config, Square::new(File::H, Rank::Eighth));
        assert_eq!(h8, (375, 375));
    }

    #[test]
    fn test_plain_move_is_one_transfer() {
        let config = Config::default();
        let mut stats = Stats::default();
        let board = BoardSnapshot::initial();
        let mv = ChessMove::new(square('e', '7'), square('e', '5'), MoveKind::Normal);
        let plan = plan_move_actuation(&config, &board, &mut stats, &mv);
        assert_eq!(plan.len(), 6);
        assert_eq!(stats.pieces_captured, 0);
    }

    #[test]
    fn test_capture_clears_the_destination_first() {
        let config = Config::default();
        let mut stats = Stats::default();
        let board = BoardSnapshot::initial();
        // Contrived but structurally a capture onto an occupied square
        let mv = ChessMove::new(square('d', '8'), square('d', '2'), MoveKind::Capture);
        let plan = plan_move_actuation(&config, &board, &mut stats, &mv);
        assert_eq!(plan.len(), 12);
        assert_eq!(stats.pieces_captured, 1);

        // The victim transfer must come before the mover's
        match &plan[0] {
            Command::Actuate(_) => {}
            other => panic!("expected actuate first, got {}", other.label()),
        }
    }

    #[test]
    fn test_castle_moves_both_pieces() {
        let config = Config::default();
        let mut stats = Stats::default();
        let board = BoardSnapshot::initial();
        let mv = ChessMove::new(square('e', '8'), square('g', '8'), MoveKind::Castle);
        let plan = plan_move_actuation(&config, &board, &mut stats, &mv);
        assert_eq!(plan.len(), 12);
    }

    #[test]
    fn test_homing_sequence_shape() {
        let config = Config::default();
        let plan = homing_sequence(&config);
        let labels: Vec<_> = plan.iter().map(Command::label).collect();
        assert_eq!(labels, ["home", "actuate", "delay", "actuate", "home"]);
    }

    #[test]
    fn test_start_sequence_first_mover_follows_the_rocker() {
        let config = Config::default();
        let labels: Vec<_> = start_sequence(&config, true)
            .iter()
            .map(Command::label)
            .collect();
        assert_eq!(labels, ["comm", "validate", "human"]);

        let labels: Vec<_> = start_sequence(&config, false)
            .iter()
            .map(Command::label)
            .collect();
        assert_eq!(labels, ["comm", "validate", "robot"]);
    }

    #[test]
    fn test_configured_color_overrides_the_rocker() {
        let mut config = Config::default();
        config.human_color = Some(HumanColor::Black);
        let labels: Vec<_> = start_sequence(&config, true)
            .iter()
            .map(Command::label)
            .collect();
        assert_eq!(labels, ["comm", "validate", "robot"]);
    }
}
