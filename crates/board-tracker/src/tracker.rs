//! # Three-Generation Board Bookkeeping
//!
//! The tracker owns the three snapshots the turn machine needs:
//!
//! - **Previous**: the last state both this controller and the external
//!   engine agreed was legal. Everything is diffed against it.
//! - **Intermediate**: taken when the human touches the capture tile mid
//!   turn. It is Previous with the captured piece already lifted off, so a
//!   two-step "remove victim, then move capturer" collapses into a single
//!   two-square diff at end of turn.
//! - **Current**: the provisional post-move state built at end of turn. It
//!   only becomes Previous once the engine confirms the move; a rejection
//!   throws it away and the human tries again, with game state intact.
//!
//! Robot moves skip sensing entirely: they arrive as symbols and are applied
//! directly to Previous once the robot has physically made them.

use tracing::debug;

use crate::apply::apply_move;
use crate::bitboard::Bitboard;
use crate::error::{BoardError, BoardResult};
use crate::infer::infer_move;
use crate::moves::{ChessMove, MoveKind};
use crate::snapshot::BoardSnapshot;
use crate::square::Square;

/// Previous / Intermediate / Current snapshot bookkeeping
#[derive(Clone, Debug)]
pub struct BoardTracker {
    previous: BoardSnapshot,
    intermediate: BoardSnapshot,
    current: BoardSnapshot,
    capture_pending: bool,
    end_turn_reading: Option<Bitboard>,
}

impl BoardTracker {
    pub fn new() -> BoardTracker {
        BoardTracker {
            previous: BoardSnapshot::initial(),
            intermediate: BoardSnapshot::initial(),
            current: BoardSnapshot::initial(),
            capture_pending: false,
            end_turn_reading: None,
        }
    }

    /// Back to the starting position; used by the Reset command
    pub fn reset(&mut self) {
        *self = BoardTracker::new();
    }

    pub fn previous(&self) -> &BoardSnapshot {
        &self.previous
    }

    pub fn current(&self) -> &BoardSnapshot {
        &self.current
    }

    pub fn capture_pending(&self) -> bool {
        self.capture_pending
    }

    /// Record the mid-turn occupancy taken when the capture tile was touched.
    /// Only the first touch per turn counts.
    pub fn note_capture(&mut self, reading: Bitboard) {
        if self.capture_pending {
            return;
        }
        // Intermediate is Previous minus whatever the human lifted off
        self.intermediate = self.previous.clone();
        let lifted = self.previous.presence.diff(reading);
        let mut remaining = lifted.0;
        while remaining != 0 {
            let index = remaining.trailing_zeros() as u8;
            let square = Square::from_index(index).expect("trailing_zeros of u64 is < 64");
            if self.previous.presence.contains(square) {
                self.intermediate.clear_square(square);
            }
            remaining &= remaining - 1;
        }
        self.capture_pending = true;
        debug!(reading = format_args!("{:#018x}", reading.0), "capture snapshot taken");
    }

    /// Record the occupancy taken when the end-turn button was pressed
    pub fn note_end_turn(&mut self, reading: Bitboard) {
        self.end_turn_reading = Some(reading);
    }

    /// Infer the human's move from the stored end-turn reading, building the
    /// provisional Current snapshot as a side effect
    pub fn infer_human_move(&mut self) -> BoardResult<ChessMove> {
        let reading = self.end_turn_reading.take().ok_or(BoardError::MissingReading)?;
        let base = if self.capture_pending {
            &self.intermediate
        } else {
            &self.previous
        };

        let mut mv = infer_move(base, reading)?;
        if self.capture_pending && mv.kind == MoveKind::Normal {
            mv.kind = MoveKind::Capture;
        }

        let mut next = base.clone();
        apply_move(&mut next, &mv)?;
        debug_assert_eq!(next.presence, reading, "derived occupancy must match sensors");
        self.current = next;

        debug!(%mv, "human move inferred");
        Ok(mv)
    }

    /// The engine confirmed the human's move; Current becomes Previous
    pub fn confirm_human_move(&mut self) {
        self.previous = self.current.clone();
        self.capture_pending = false;
    }

    /// The move was rejected (locally or by the engine); drop the
    /// provisional state and let the human try again
    pub fn reject_human_move(&mut self) {
        self.current = self.previous.clone();
        self.capture_pending = false;
        self.end_turn_reading = None;
    }

    /// Apply the robot's own move directly; no sensing involved
    pub fn apply_robot_move(&mut self, mv: &ChessMove) -> BoardResult<()> {
        apply_move(&mut self.previous, mv)?;
        self.current = self.previous.clone();
        debug!(%mv, "robot move applied");
        Ok(())
    }
}

impl Default for BoardTracker {
    fn default() -> Self {
        BoardTracker::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::INITIAL_PRESENCE;

    fn bit(square: &str) -> u64 {
        let mut chars = square.chars();
        let sq = Square::from_symbols(chars.next().unwrap(), chars.next().unwrap()).unwrap();
        1u64 << sq.index()
    }

    #[test]
    fn test_plain_move_inferred_against_previous() {
        let mut tracker = BoardTracker::new();
        tracker.note_end_turn(Bitboard(INITIAL_PRESENCE ^ bit("e2") ^ bit("e4")));

        let mv = tracker.infer_human_move().unwrap();
        assert_eq!(mv.to_string(), "e2e4_");

        // Not yet confirmed: Previous unchanged
        assert_eq!(tracker.previous().presence.0, INITIAL_PRESENCE);

        tracker.confirm_human_move();
        assert_eq!(
            tracker.previous().presence.0,
            INITIAL_PRESENCE ^ bit("e2") ^ bit("e4")
        );
    }

    #[test]
    fn test_rejected_move_leaves_previous_intact() {
        let mut tracker = BoardTracker::new();
        // Three squares changed: structurally illegal
        tracker.note_end_turn(Bitboard(INITIAL_PRESENCE ^ bit("e2") ^ bit("e4") ^ bit("d4")));

        assert!(tracker.infer_human_move().is_err());
        tracker.reject_human_move();

        assert_eq!(tracker.previous().presence.0, INITIAL_PRESENCE);
        assert!(!tracker.capture_pending());
    }

    #[test]
    fn test_two_step_capture_collapses_to_one_move() {
        let mut tracker = BoardTracker::new();

        // Set up a position where white queen on d4 takes the d7 pawn.
        // Start from the initial board, robot-apply the setup moves.
        tracker
            .apply_robot_move(&ChessMove::from_wire(*b"d1d4_").unwrap())
            .unwrap();
        let base = tracker.previous().presence.0;

        // Human lifts the d7 pawn and touches the capture tile
        tracker.note_capture(Bitboard(base ^ bit("d7")));
        assert!(tracker.capture_pending());

        // Then moves the queen d4 -> d7 and ends the turn.
        // Net occupancy: d4 empty, d7 occupied by the queen.
        tracker.note_end_turn(Bitboard(base ^ bit("d4")));

        let mv = tracker.infer_human_move().unwrap();
        assert_eq!(mv.to_string(), "d4d7x");

        tracker.confirm_human_move();
        let confirmed = tracker.previous();
        assert_eq!(confirmed.piece_at(Square::from_symbols('d', '7').unwrap()).unwrap().symbol(), 'Q');
        assert!(!tracker.capture_pending());
    }

    #[test]
    fn test_capture_tile_only_counts_once_per_turn() {
        let mut tracker = BoardTracker::new();
        let base = INITIAL_PRESENCE;

        tracker.note_capture(Bitboard(base ^ bit("d7")));
        // A second touch with a different reading must not move Intermediate
        tracker.note_capture(Bitboard(base ^ bit("e7")));

        // End turn consistent with the *first* snapshot: d8 queen onto d7
        tracker.note_end_turn(Bitboard(base ^ bit("d8")));
        let mv = tracker.infer_human_move().unwrap();
        assert_eq!(mv.source.to_string(), "d8");
        assert_eq!(mv.kind, MoveKind::Capture);
    }

    #[test]
    fn test_robot_castle_advances_previous() {
        let mut tracker = BoardTracker::new();
        // Free f1/g1 first so the castle is physically plausible
        tracker
            .apply_robot_move(&ChessMove::from_wire(*b"g1f3_").unwrap())
            .unwrap();
        tracker
            .apply_robot_move(&ChessMove::from_wire(*b"f1c4_").unwrap())
            .unwrap();

        tracker
            .apply_robot_move(&ChessMove::from_wire(*b"e1g1c").unwrap())
            .unwrap();

        let board = tracker.previous();
        assert_eq!(board.piece_at(Square::from_symbols('g', '1').unwrap()).unwrap().symbol(), 'K');
        assert_eq!(board.piece_at(Square::from_symbols('f', '1').unwrap()).unwrap().symbol(), 'R');
        assert!(board.is_consistent());
    }

    #[test]
    fn test_infer_without_reading_is_an_error() {
        let mut tracker = BoardTracker::new();
        assert_eq!(
            tracker.infer_human_move().unwrap_err(),
            BoardError::MissingReading
        );
    }
}
