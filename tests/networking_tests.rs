//! Serial Link Tests
//!
//! Tests for frame delivery over the controller/engine link:
//! - Retransmission on acknowledgement timeout
//! - Recovery once the peer comes back
//! - Corrupt inbound frames dropped without derailing the turn

use board_tracker::Square;
use wire_protocol::{Message, StatusReport};

use gantrychess::{Config, SimRig};

fn square(file: char, rank: char) -> Square {
    Square::from_symbols(file, rank).unwrap()
}

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
// Retransmission Tests
// ============================================================================

#[test]
fn test_unacked_frame_retransmits_once_per_period() {
    let mut config = Config::default();
    config.retry_period_ms = 100;
    config.tick_period_ms = 10;
    let mut rig = SimRig::new(config, 1);
    rig.engine.mute = true;

    // The first frame out is the reset announcement; with the engine mute
    // the comm command can never finish
    assert!(step_until_in_service(&mut rig, "comm", 100));

    // Three full retry periods with no acknowledgement
    rig.step_n(30);
    let world = rig.runtime.world();
    assert_eq!(
        world.services.transport.retransmits, 3,
        "one retransmission per elapsed retry period"
    );
    assert_eq!(
        rig.runtime.in_service_label(),
        Some("comm"),
        "an unacknowledged send never completes"
    );
    assert_eq!(
        rig.engine.received_count(),
        4,
        "the engine saw the original send plus three retries"
    );
}

#[test]
fn test_delivery_resumes_when_the_peer_returns() {
    let mut config = Config::default();
    config.retry_period_ms = 100;
    config.tick_period_ms = 10;
    let mut rig = SimRig::new(config, 1);
    rig.engine.mute = true;

    assert!(step_until_in_service(&mut rig, "comm", 100));
    rig.step_n(25);
    assert!(rig.runtime.world().services.transport.retransmits >= 2);

    // Peer comes back; the next retry gets through and bring-up continues
    rig.engine.mute = false;
    assert!(
        step_until_in_service(&mut rig, "human", 2_000),
        "bring-up should finish once the engine acknowledges"
    );
}

// ============================================================================
// Corrupt Frame Tests
// ============================================================================

#[test]
fn test_corrupt_reply_is_dropped_and_the_retry_recovers() {
    let mut rig = SimRig::new(Config::default(), 1);
    rig.engine.reply_with(vec![]); // RESET
    rig.engine.reply_with(vec![]); // START
    rig.engine.reply_with(vec![]); // HUMAN_MOVE, reply sent by hand below

    assert!(step_until_in_service(&mut rig, "human", 2_000));
    rig.sensor.lift(square('e', '2'));
    rig.sensor.place(square('e', '4'));
    rig.switches.press_end_turn();
    assert!(step_until_in_service(&mut rig, "robot", 2_000));

    // A reply move with a flipped operand bit fails its checksum
    let mut corrupt = Message::RobotMove(*b"e7e5_").encode();
    corrupt[4] ^= 0x08;
    rig.engine.send_raw(&corrupt);
    rig.step_n(10);

    assert_eq!(rig.runtime.in_service_label(), Some("robot"));
    assert_eq!(
        rig.runtime.world().services.transport.checksum_failures,
        1,
        "the corrupt frame should be counted and dropped"
    );

    // The engine's own retry gets the clean frame through
    rig.engine.send_now(&[
        Message::RobotMove(*b"e7e5_"),
        Message::GameStatus(StatusReport::ongoing()),
    ]);
    assert!(
        step_until_in_service(&mut rig, "human", 2_000),
        "the turn should complete on the clean retransmission"
    );
    assert!(rig
        .runtime
        .world()
        .tracker
        .current()
        .piece_at(square('e', '5'))
        .is_some());
}

// ============================================================================
// Acknowledgement Tests
// ============================================================================

#[test]
fn test_controller_acknowledges_engine_frames() {
    let mut rig = SimRig::new(Config::default(), 1);
    rig.engine.reply_with(vec![]); // RESET
    rig.engine.reply_with(vec![]); // START
    rig.engine.reply_with(vec![
        Message::RobotMove(*b"e7e5_"),
        Message::GameStatus(StatusReport::ongoing()),
    ]);

    assert!(step_until_in_service(&mut rig, "human", 2_000));
    rig.sensor.lift(square('e', '2'));
    rig.sensor.place(square('e', '4'));
    rig.switches.press_end_turn();
    assert!(step_until_in_service(&mut rig, "robot", 2_000));
    rig.step_n(10);

    assert_eq!(
        rig.engine.acks_seen, 2,
        "both engine frames should have been acknowledged"
    );
}
