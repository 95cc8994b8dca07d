//! Cross-cutting event flags
//!
//! Input scanning raises these and commands consume them, mirroring how
//! interrupt service routines hand events to a foreground loop. Atomics
//! with acquire/release ordering keep that handoff sound if the input
//! side ever moves onto its own thread.

use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct SystemFlags {
    /// A reset is queued or in progress; suppresses further reset presses
    reset_pending: AtomicBool,
    /// A reset press the runtime has not acted on yet
    reset_requested: AtomicBool,
    /// The human pressed end-turn and a board reading was captured
    human_turn_complete: AtomicBool,
    /// Emergency stop or an unexpected limit trip; motion must cease
    faulted: AtomicBool,
    /// The gantry is homing, so limit switch trips are expected
    homing: AtomicBool,
    /// The engine declared the game over
    game_over: AtomicBool,
    /// It is the human's turn, so capture and end-turn presses count
    human_input_enabled: AtomicBool,
    /// A rejected move lit the error lamp; the redo turn leaves it lit
    move_rejected: AtomicBool,
    /// Panel rocker position, true when the human takes white
    color_white: AtomicBool,
}

impl SystemFlags {
    pub fn new() -> SystemFlags {
        SystemFlags::default()
    }

    pub fn raise_reset_pending(&self) -> bool {
        !self.reset_pending.swap(true, Ordering::AcqRel)
    }

    pub fn clear_reset_pending(&self) {
        self.reset_pending.store(false, Ordering::Release);
    }

    pub fn reset_pending(&self) -> bool {
        self.reset_pending.load(Ordering::Acquire)
    }

    pub fn raise_reset_requested(&self) {
        self.reset_requested.store(true, Ordering::Release);
    }

    pub fn take_reset_requested(&self) -> bool {
        self.reset_requested.swap(false, Ordering::AcqRel)
    }

    pub fn raise_human_turn_complete(&self) {
        self.human_turn_complete.store(true, Ordering::Release);
    }

    pub fn take_human_turn_complete(&self) -> bool {
        self.human_turn_complete.swap(false, Ordering::AcqRel)
    }

    pub fn human_turn_complete(&self) -> bool {
        self.human_turn_complete.load(Ordering::Acquire)
    }

    pub fn clear_human_turn_complete(&self) {
        self.human_turn_complete.store(false, Ordering::Release);
    }

    pub fn raise_fault(&self) {
        self.faulted.store(true, Ordering::Release);
    }

    pub fn clear_fault(&self) {
        self.faulted.store(false, Ordering::Release);
    }

    pub fn faulted(&self) -> bool {
        self.faulted.load(Ordering::Acquire)
    }

    pub fn set_homing(&self, active: bool) {
        self.homing.store(active, Ordering::Release);
    }

    pub fn homing(&self) -> bool {
        self.homing.load(Ordering::Acquire)
    }

    pub fn set_game_over(&self, over: bool) {
        self.game_over.store(over, Ordering::Release);
    }

    pub fn game_over(&self) -> bool {
        self.game_over.load(Ordering::Acquire)
    }

    pub fn set_human_input_enabled(&self, enabled: bool) {
        self.human_input_enabled.store(enabled, Ordering::Release);
    }

    pub fn human_input_enabled(&self) -> bool {
        self.human_input_enabled.load(Ordering::Acquire)
    }

    pub fn raise_move_rejected(&self) {
        self.move_rejected.store(true, Ordering::Release);
    }

    pub fn take_move_rejected(&self) -> bool {
        self.move_rejected.swap(false, Ordering::AcqRel)
    }

    pub fn clear_move_rejected(&self) {
        self.move_rejected.store(false, Ordering::Release);
    }

    pub fn set_color_white(&self, white: bool) {
        self.color_white.store(white, Ordering::Release);
    }

    pub fn color_white(&self) -> bool {
        self.color_white.load(Ordering::Acquire)
    }
}
