//! Core Controller Tests
//!
//! Tests for the command scheduler and bring-up flow:
//! - Reset into homing into a validated, started game
//! - Start-position validation gate
//! - Reset button preemption and debouncing

use board_tracker::{Square, INITIAL_PRESENCE};
use wire_protocol::{Message, StatusReport};

use gantrychess::hal::IndicatorMode;
use gantrychess::{Config, HumanColor, SimRig};

fn square(file: char, rank: char) -> Square {
    Square::from_symbols(file, rank).unwrap()
}

/// Step until the named command is in service
fn step_until_in_service(rig: &mut SimRig, label: &str, budget: u64) -> bool {
    for _ in 0..budget {
        rig.step();
        if rig.runtime.in_service_label() == Some(label) {
            return true;
        }
    }
    false
}

// ============================================================================
// Bring-Up Tests
// ============================================================================

#[test]
fn test_bring_up_reaches_the_human_turn() {
    let mut rig = SimRig::new(Config::default(), 1);

    assert!(
        step_until_in_service(&mut rig, "human", 2_000),
        "bring-up should end waiting on the human"
    );

    // The engine was told to reset and start, in that order
    assert_eq!(rig.engine.received[0], Message::Reset);
    assert_eq!(rig.engine.received[1], Message::StartWhite);

    // The gantry homed and backed off its switches
    let motions = rig.motions.motions();
    assert!(
        motions
            .iter()
            .any(|m| matches!(m, gantrychess::hal::MotionCommand::HomeAll)),
        "homing run should have happened"
    );
    assert!(
        !rig.runtime.world().flags.homing(),
        "homing guard should be released after bring-up"
    );
}

#[test]
fn test_human_black_waits_on_the_engine_first() {
    let mut config = Config::default();
    config.human_color = Some(HumanColor::Black);
    let mut rig = SimRig::new(config, 1);

    assert!(
        step_until_in_service(&mut rig, "robot", 2_000),
        "with the human as black, the engine moves first"
    );
    assert_eq!(rig.engine.received[1], Message::StartBlack);

    // The engine opens; the board tracker should pick the move up
    rig.engine.send_now(&[
        Message::RobotMove(*b"e2e4_"),
        Message::GameStatus(StatusReport::ongoing()),
    ]);
    assert!(
        step_until_in_service(&mut rig, "human", 2_000),
        "after the engine's opening it is the human's turn"
    );
    assert!(
        rig.runtime
            .world()
            .tracker
            .current()
            .piece_at(square('e', '4'))
            .is_some(),
        "the engine's pawn should be tracked on e4"
    );
}

// ============================================================================
// Start-Position Validation Tests
// ============================================================================

#[test]
fn test_validation_blocks_until_the_board_is_set() {
    let mut rig = SimRig::new(Config::default(), 1);
    rig.sensor.set_raw(0); // nothing on the board yet

    assert!(
        step_until_in_service(&mut rig, "validate", 2_000),
        "bring-up should reach validation"
    );
    rig.step_n(200);
    assert_eq!(
        rig.runtime.in_service_label(),
        Some("validate"),
        "an empty board must not validate"
    );
    assert_eq!(
        rig.indicator.mode(),
        IndicatorMode::Error,
        "a wrong start position shows the error lamp"
    );

    rig.sensor.set_raw(INITIAL_PRESENCE);
    assert!(
        step_until_in_service(&mut rig, "human", 2_000),
        "setting the pieces should unblock the game"
    );
    assert_eq!(
        rig.indicator.mode(),
        IndicatorMode::Waiting,
        "a correct board clears the error lamp"
    );
}

// ============================================================================
// Color Rocker Tests
// ============================================================================

#[test]
fn test_color_rocker_picks_black_when_config_is_silent() {
    let mut rig = SimRig::new(Config::default(), 1);
    rig.switches.set_color_white(false);

    assert!(
        step_until_in_service(&mut rig, "robot", 2_000),
        "with the rocker on black, the engine moves first"
    );
    assert_eq!(rig.engine.received[1], Message::StartBlack);
}

// ============================================================================
// Reset Button Tests
// ============================================================================

#[test]
fn test_reset_preempts_the_human_turn() {
    let mut rig = SimRig::new(Config::default(), 1);
    assert!(step_until_in_service(&mut rig, "human", 2_000));

    rig.switches.press_reset();
    assert!(
        step_until_in_service(&mut rig, "human", 2_000),
        "reset should run a fresh bring-up back to the human turn"
    );

    let resets = rig
        .engine
        .received
        .iter()
        .filter(|m| **m == Message::Reset)
        .count();
    assert_eq!(resets, 2, "power-on reset plus the button press");
}

#[test]
fn test_held_reset_is_one_reset() {
    let mut rig = SimRig::new(Config::default(), 1);
    assert!(step_until_in_service(&mut rig, "human", 2_000));

    // Hold the button down across many ticks; only the press edge counts
    rig.switches.hold_reset(true);
    assert!(step_until_in_service(&mut rig, "human", 2_000));
    rig.switches.hold_reset(false);
    rig.step_n(10);

    let resets = rig
        .engine
        .received
        .iter()
        .filter(|m| **m == Message::Reset)
        .count();
    assert_eq!(resets, 2, "power-on reset plus one edge from the held button");
}
