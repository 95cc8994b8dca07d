//! Per-tick input scanning
//!
//! Samples the switch panel once per tick and reacts to transitions, the
//! polled stand-in for edge-triggered interrupts. Capture and end-turn
//! presses only count while the human's turn is in service; a stray press
//! during the robot's turn must not disturb the tracker's bookkeeping.

use tracing::{info, warn};

use crate::hal::SwitchState;
use crate::world::World;

#[derive(Default)]
pub struct InputScanner {
    prev: SwitchState,
}

impl InputScanner {
    pub fn new() -> InputScanner {
        InputScanner {
            prev: SwitchState::default(),
        }
    }

    pub fn scan(&mut self, world: &mut World) {
        let state = world.services.switches.read();
        let pressed = |now: bool, before: bool| now && !before;

        // The rocker is a level, not an edge; the next reset reads it
        world.flags.set_color_white(state.color_white);

        // Safety first: a limit trip outside a homing run means the gantry
        // ran somewhere it should not have
        let unexpected_limit = state.limit && !world.flags.homing();
        if (state.estop || unexpected_limit) && !world.flags.faulted() {
            warn!(
                estop = state.estop,
                limit = state.limit,
                "safety stop, halting everything"
            );
            world.flags.raise_fault();
        }

        if pressed(state.reset, self.prev.reset) {
            // One reset at a time; holding the button is not ten resets
            if world.flags.raise_reset_pending() {
                info!("reset requested");
                world.flags.clear_fault();
                // The runtime preempts whatever is in service
                world.flags.raise_reset_requested();
            }
        }

        if world.flags.human_input_enabled() {
            if pressed(state.capture, self.prev.capture) {
                let reading = world.services.sensor.read();
                world.tracker.note_capture(reading);
            }
            if pressed(state.end_turn, self.prev.end_turn) {
                let reading = world.services.sensor.read();
                world.tracker.note_end_turn(reading);
                world.flags.raise_human_turn_complete();
            }
        }

        self.prev = state;
    }
}
