//! Commands and their lifecycle
//!
//! Each unit of work the controller performs is a [`Command`] with a four
//! step lifecycle: `entry` once when it leaves the queue, `action` once per
//! scheduler tick, `is_done` polled after each action, and `exit` once when
//! done. `exit` returns follow-up commands that the scheduler enqueues in
//! order, which is how one game turn chains into the next.
//!
//! An aborted command (fault teardown) is dropped without its exit step, so
//! nothing it would have chained gets queued.

pub mod actuate;
pub mod comm;
pub mod delay;
pub mod home;
pub mod human;
pub mod reset;
pub mod robot;
pub mod validate;

use smallvec::SmallVec;

use board_tracker::ChessMove;
use wire_protocol::Message;

use crate::hal::MotionCommand;
use crate::world::World;

pub use actuate::{ActuateCommand, MagnetAction};
pub use comm::CommCommand;
pub use delay::DelayCommand;
pub use home::HomeCommand;
pub use human::HumanCommand;
pub use reset::ResetCommand;
pub use robot::RobotCommand;
pub use validate::ValidateCommand;

/// Commands a finished command hands back for the scheduler to enqueue
pub type Followups = SmallVec<[Command; 8]>;

/// The four-step command lifecycle the scheduler drives
pub trait CommandStage {
    /// Runs once when the command leaves the queue
    fn entry(&mut self, _world: &mut World) {}
    /// Runs once per tick while in service; must not block
    fn action(&mut self, _world: &mut World) {}
    /// Polled after each action
    fn is_done(&self, world: &World) -> bool;
    /// Runs once on completion; returns commands to enqueue next
    fn exit(&mut self, _world: &mut World) -> Followups {
        Followups::new()
    }
}

/// Every kind of work the scheduler can service
pub enum Command {
    Reset(ResetCommand),
    Home(HomeCommand),
    Validate(ValidateCommand),
    Human(HumanCommand),
    Comm(CommCommand),
    Robot(RobotCommand),
    Actuate(ActuateCommand),
    Delay(DelayCommand),
}

impl Command {
    pub fn reset() -> Command {
        Command::Reset(ResetCommand::new())
    }

    pub fn home(engage: bool) -> Command {
        Command::Home(HomeCommand::new(engage))
    }

    pub fn validate() -> Command {
        Command::Validate(ValidateCommand::new())
    }

    pub fn human() -> Command {
        Command::Human(HumanCommand::new())
    }

    pub fn comm(message: Message) -> Command {
        Command::Comm(CommCommand::new(message))
    }

    pub fn robot() -> Command {
        Command::Robot(RobotCommand::new())
    }

    pub fn actuate(motion: MotionCommand) -> Command {
        Command::Actuate(ActuateCommand::new(motion, None))
    }

    pub fn actuate_then(motion: MotionCommand, magnet: MagnetAction) -> Command {
        Command::Actuate(ActuateCommand::new(motion, Some(magnet)))
    }

    pub fn delay(duration_ms: u64) -> Command {
        Command::Delay(DelayCommand::new(duration_ms))
    }

    /// Human move already inferred, heading out over the wire
    pub fn send_human_move(mv: &ChessMove) -> Command {
        Command::comm(Message::HumanMove(mv.to_wire()))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Command::Reset(_) => "reset",
            Command::Home(_) => "home",
            Command::Validate(_) => "validate",
            Command::Human(_) => "human",
            Command::Comm(_) => "comm",
            Command::Robot(_) => "robot",
            Command::Actuate(_) => "actuate",
            Command::Delay(_) => "delay",
        }
    }
}

impl CommandStage for Command {
    fn entry(&mut self, world: &mut World) {
        match self {
            Command::Reset(c) => c.entry(world),
            Command::Home(c) => c.entry(world),
            Command::Validate(c) => c.entry(world),
            Command::Human(c) => c.entry(world),
            Command::Comm(c) => c.entry(world),
            Command::Robot(c) => c.entry(world),
            Command::Actuate(c) => c.entry(world),
            Command::Delay(c) => c.entry(world),
        }
    }

    fn action(&mut self, world: &mut World) {
        match self {
            Command::Reset(c) => c.action(world),
            Command::Home(c) => c.action(world),
            Command::Validate(c) => c.action(world),
            Command::Human(c) => c.action(world),
            Command::Comm(c) => c.action(world),
            Command::Robot(c) => c.action(world),
            Command::Actuate(c) => c.action(world),
            Command::Delay(c) => c.action(world),
        }
    }

    fn is_done(&self, world: &World) -> bool {
        match self {
            Command::Reset(c) => c.is_done(world),
            Command::Home(c) => c.is_done(world),
            Command::Validate(c) => c.is_done(world),
            Command::Human(c) => c.is_done(world),
            Command::Comm(c) => c.is_done(world),
            Command::Robot(c) => c.is_done(world),
            Command::Actuate(c) => c.is_done(world),
            Command::Delay(c) => c.is_done(world),
        }
    }

    fn exit(&mut self, world: &mut World) -> Followups {
        match self {
            Command::Reset(c) => c.exit(world),
            Command::Home(c) => c.exit(world),
            Command::Validate(c) => c.exit(world),
            Command::Human(c) => c.exit(world),
            Command::Comm(c) => c.exit(world),
            Command::Robot(c) => c.exit(world),
            Command::Actuate(c) => c.exit(world),
            Command::Delay(c) => c.exit(world),
        }
    }
}
