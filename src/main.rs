//! Demo binary
//!
//! Runs the controller against the simulated bench and scripts a short
//! game: reset, homing, bring-up, then a couple of human moves answered
//! by a scripted engine. Useful for watching the command flow in the
//! logs without any hardware attached.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use board_tracker::Square;
use wire_protocol::{Message, StatusReport};

use gantrychess::{Config, SimRig};

#[derive(Parser, Debug)]
#[command(name = "gantrychess", about = "Chess gantry controller, simulated bench demo")]
struct Args {
    /// JSON config file; defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Give up if a scripted phase takes more than this many ticks
    #[arg(long, default_value_t = 5_000)]
    phase_budget: u64,
}

fn square(file: char, rank: char) -> Square {
    Square::from_symbols(file, rank).expect("demo squares are valid")
}

/// Step until the human's turn is in service
fn step_until_human(rig: &mut SimRig, budget: u64) -> Result<()> {
    for _ in 0..budget {
        rig.step();
        if rig.runtime.in_service_label() == Some("human") {
            return Ok(());
        }
    }
    bail!("controller never reached the human's turn");
}

/// Play one human move on the sensed board and press end-turn
fn play_human_move(rig: &mut SimRig, from: Square, to: Square) {
    rig.sensor.lift(from);
    rig.sensor.place(to);
    rig.switches.press_end_turn();
}

/// The simulated sensor has no idea the gantry moved a piece, so the
/// engine's move has to be mirrored onto it by hand
fn mirror_robot_move(rig: &mut SimRig, from: Square, to: Square) {
    rig.sensor.lift(from);
    rig.sensor.place(to);
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => Config::default(),
    };

    let mut rig = SimRig::new(config, 2);

    // Script the engine: ack-only for the reset and start frames, then a
    // reply per human move
    rig.engine.reply_with(vec![]); // RESET
    rig.engine.reply_with(vec![]); // START
    rig.engine.reply_with(vec![
        Message::RobotMove(*b"e7e5_"),
        Message::GameStatus(StatusReport::ongoing()),
    ]);
    rig.engine.reply_with(vec![
        Message::RobotMove(*b"d7d5_"),
        Message::GameStatus(StatusReport::ongoing()),
    ]);

    step_until_human(&mut rig, args.phase_budget)?;
    info!("board validated, playing 1. e4");
    play_human_move(&mut rig, square('e', '2'), square('e', '4'));

    step_until_human(&mut rig, args.phase_budget)?;
    mirror_robot_move(&mut rig, square('e', '7'), square('e', '5'));
    info!("engine answered, playing 2. d4");
    play_human_move(&mut rig, square('d', '2'), square('d', '4'));

    step_until_human(&mut rig, args.phase_budget)?;
    mirror_robot_move(&mut rig, square('d', '7'), square('d', '5'));

    let world = rig.runtime.world();
    info!(
        ticks = world.stats.ticks,
        moves = world.stats.moves_played,
        captured = world.stats.pieces_captured,
        frames_sent = world.services.transport.frames_sent,
        retransmits = world.services.transport.retransmits,
        queue_drops = world.queue.dropped,
        "demo complete"
    );
    Ok(())
}
