//! Simulated devices
//!
//! In-process stand-ins for the gantry hardware. Each device shares its
//! state with a handle the test or demo harness holds, so a test can press
//! buttons, move pieces on the sensed board, and watch what the gantry and
//! lamp were told to do.
//!
//! The serial link is a pair of cross-connected byte channels; the far end
//! of the pair plays the engine.

use std::cell::Cell;
use std::sync::{Arc, Mutex};

use crossbeam_channel::{unbounded, Receiver, Sender};

use board_tracker::{Bitboard, Square, INITIAL_PRESENCE};

use super::{
    Actuator, BoardSensor, Indicator, IndicatorMode, Magnet, MotionCommand, SerialPort,
    SwitchPanel, SwitchState,
};

/// Actuator that completes a motion after a fixed number of polls
pub struct SimActuator {
    latency_ticks: u32,
    remaining: Cell<u32>,
    log: Arc<Mutex<Vec<MotionCommand>>>,
    halts: Arc<Mutex<u32>>,
}

/// Observer for the motions a [`SimActuator`] was asked to run
#[derive(Clone)]
pub struct MotionLog {
    log: Arc<Mutex<Vec<MotionCommand>>>,
    halts: Arc<Mutex<u32>>,
}

impl SimActuator {
    pub fn new(latency_ticks: u32) -> (SimActuator, MotionLog) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let halts = Arc::new(Mutex::new(0));
        (
            SimActuator {
                latency_ticks,
                remaining: Cell::new(0),
                log: Arc::clone(&log),
                halts: Arc::clone(&halts),
            },
            MotionLog { log, halts },
        )
    }
}

impl Actuator for SimActuator {
    fn start(&mut self, motion: MotionCommand) {
        self.log.lock().unwrap().push(motion);
        self.remaining.set(self.latency_ticks);
    }

    fn is_done(&self) -> bool {
        let remaining = self.remaining.get();
        if remaining > 0 {
            self.remaining.set(remaining - 1);
            false
        } else {
            true
        }
    }

    fn halt(&mut self) {
        self.remaining.set(0);
        *self.halts.lock().unwrap() += 1;
    }
}

impl MotionLog {
    pub fn motions(&self) -> Vec<MotionCommand> {
        self.log.lock().unwrap().clone()
    }

    pub fn halt_count(&self) -> u32 {
        *self.halts.lock().unwrap()
    }
}

/// Presence grid backed by a shared bit set
pub struct SimBoardSensor {
    bits: Arc<Mutex<u64>>,
}

/// Handle for moving pieces on the sensed board
#[derive(Clone)]
pub struct SensorHandle {
    bits: Arc<Mutex<u64>>,
}

impl SimBoardSensor {
    /// Starts with all thirty-two starting squares occupied
    pub fn new() -> (SimBoardSensor, SensorHandle) {
        let bits = Arc::new(Mutex::new(INITIAL_PRESENCE));
        (
            SimBoardSensor {
                bits: Arc::clone(&bits),
            },
            SensorHandle { bits },
        )
    }
}

impl BoardSensor for SimBoardSensor {
    fn read(&mut self) -> Bitboard {
        Bitboard(*self.bits.lock().unwrap())
    }
}

impl SensorHandle {
    pub fn set_raw(&self, bits: u64) {
        *self.bits.lock().unwrap() = bits;
    }

    pub fn lift(&self, square: Square) {
        *self.bits.lock().unwrap() &= !(1u64 << square.index());
    }

    pub fn place(&self, square: Square) {
        *self.bits.lock().unwrap() |= 1u64 << square.index();
    }

    pub fn read(&self) -> Bitboard {
        Bitboard(*self.bits.lock().unwrap())
    }
}

struct SwitchShared {
    /// One-shot button pulses, consumed by the next panel read
    capture: bool,
    end_turn: bool,
    reset: bool,
    /// Reset held down across reads, for exercising edge detection
    reset_held: bool,
    /// Latched safety levels
    estop: bool,
    limit: bool,
    /// Color rocker position, latched like a real toggle
    color_white: bool,
}

impl Default for SwitchShared {
    fn default() -> SwitchShared {
        SwitchShared {
            capture: false,
            end_turn: false,
            reset: false,
            reset_held: false,
            estop: false,
            limit: false,
            // Rocker rests on white, matching how the panel ships
            color_white: true,
        }
    }
}

/// Switch panel driven by a [`SwitchHandle`]
pub struct SimSwitchPanel {
    shared: Arc<Mutex<SwitchShared>>,
}

/// Handle for pressing buttons and tripping safety switches
#[derive(Clone)]
pub struct SwitchHandle {
    shared: Arc<Mutex<SwitchShared>>,
}

impl SimSwitchPanel {
    pub fn new() -> (SimSwitchPanel, SwitchHandle) {
        let shared = Arc::new(Mutex::new(SwitchShared::default()));
        (
            SimSwitchPanel {
                shared: Arc::clone(&shared),
            },
            SwitchHandle { shared },
        )
    }
}

impl SwitchPanel for SimSwitchPanel {
    fn read(&mut self) -> SwitchState {
        let mut shared = self.shared.lock().unwrap();
        let state = SwitchState {
            capture: shared.capture,
            end_turn: shared.end_turn,
            reset: shared.reset || shared.reset_held,
            estop: shared.estop,
            limit: shared.limit,
            color_white: shared.color_white,
        };
        // Button presses are momentary; safety levels stay until cleared
        shared.capture = false;
        shared.end_turn = false;
        shared.reset = false;
        state
    }
}

impl SwitchHandle {
    pub fn press_capture(&self) {
        self.shared.lock().unwrap().capture = true;
    }

    pub fn press_end_turn(&self) {
        self.shared.lock().unwrap().end_turn = true;
    }

    pub fn press_reset(&self) {
        self.shared.lock().unwrap().reset = true;
    }

    pub fn hold_reset(&self, held: bool) {
        self.shared.lock().unwrap().reset_held = held;
    }

    pub fn set_estop(&self, engaged: bool) {
        self.shared.lock().unwrap().estop = engaged;
    }

    pub fn set_limit(&self, tripped: bool) {
        self.shared.lock().unwrap().limit = tripped;
    }

    pub fn set_color_white(&self, white: bool) {
        self.shared.lock().unwrap().color_white = white;
    }
}

/// Magnet that remembers its state for inspection
pub struct SimMagnet {
    engaged: Arc<Mutex<bool>>,
}

#[derive(Clone)]
pub struct MagnetProbe {
    engaged: Arc<Mutex<bool>>,
}

impl SimMagnet {
    pub fn new() -> (SimMagnet, MagnetProbe) {
        let engaged = Arc::new(Mutex::new(false));
        (
            SimMagnet {
                engaged: Arc::clone(&engaged),
            },
            MagnetProbe { engaged },
        )
    }
}

impl Magnet for SimMagnet {
    fn engage(&mut self) {
        *self.engaged.lock().unwrap() = true;
    }

    fn release(&mut self) {
        *self.engaged.lock().unwrap() = false;
    }
}

impl MagnetProbe {
    pub fn is_engaged(&self) -> bool {
        *self.engaged.lock().unwrap()
    }
}

/// Lamp that remembers the last mode it was set to
pub struct SimIndicator {
    mode: Arc<Mutex<IndicatorMode>>,
}

#[derive(Clone)]
pub struct IndicatorProbe {
    mode: Arc<Mutex<IndicatorMode>>,
}

impl SimIndicator {
    pub fn new() -> (SimIndicator, IndicatorProbe) {
        let mode = Arc::new(Mutex::new(IndicatorMode::Off));
        (
            SimIndicator {
                mode: Arc::clone(&mode),
            },
            IndicatorProbe { mode },
        )
    }
}

impl Indicator for SimIndicator {
    fn set(&mut self, mode: IndicatorMode) {
        *self.mode.lock().unwrap() = mode;
    }
}

impl IndicatorProbe {
    pub fn mode(&self) -> IndicatorMode {
        *self.mode.lock().unwrap()
    }
}

/// One end of a simulated serial link
pub struct SimSerialPort {
    tx: Sender<u8>,
    rx: Receiver<u8>,
}

/// Two cross-connected ports; give one to the controller, keep the other
/// as the engine side
pub fn sim_serial_pair() -> (SimSerialPort, SimSerialPort) {
    let (a_tx, b_rx) = unbounded();
    let (b_tx, a_rx) = unbounded();
    (
        SimSerialPort { tx: a_tx, rx: a_rx },
        SimSerialPort { tx: b_tx, rx: b_rx },
    )
}

impl SerialPort for SimSerialPort {
    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            // A hung-up peer just swallows the bytes, like a real line
            let _ = self.tx.send(byte);
        }
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.rx.try_recv().ok()
    }
}

impl SimSerialPort {
    /// Drain everything currently pending on this end
    pub fn drain(&mut self) -> Vec<u8> {
        let mut bytes = Vec::new();
        while let Some(byte) = self.read_byte() {
            bytes.push(byte);
        }
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actuator_completes_after_latency() {
        let (mut actuator, log) = SimActuator::new(2);
        actuator.start(MotionCommand::HomeAll);
        assert!(!actuator.is_done());
        assert!(!actuator.is_done());
        assert!(actuator.is_done());
        assert_eq!(log.motions(), vec![MotionCommand::HomeAll]);
    }

    #[test]
    fn test_halt_finishes_motion_early() {
        let (mut actuator, log) = SimActuator::new(10);
        actuator.start(MotionCommand::HomeAll);
        assert!(!actuator.is_done());
        actuator.halt();
        assert!(actuator.is_done());
        assert_eq!(log.halt_count(), 1);
    }

    #[test]
    fn test_button_pulses_are_momentary() {
        let (mut panel, handle) = SimSwitchPanel::new();
        handle.press_end_turn();
        assert!(panel.read().end_turn);
        assert!(!panel.read().end_turn);

        handle.set_estop(true);
        assert!(panel.read().estop);
        assert!(panel.read().estop);
    }

    #[test]
    fn test_serial_pair_is_cross_connected() {
        let (mut controller, mut engine) = sim_serial_pair();
        controller.write(&[1, 2, 3]);
        assert_eq!(engine.drain(), vec![1, 2, 3]);
        engine.write(&[9]);
        assert_eq!(controller.read_byte(), Some(9));
        assert_eq!(controller.read_byte(), None);
    }

    #[test]
    fn test_sensor_starts_at_initial_presence() {
        let (mut sensor, handle) = SimBoardSensor::new();
        assert_eq!(sensor.read().0, INITIAL_PRESENCE);
        let e2 = Square::from_symbols('e', '2').unwrap();
        handle.lift(e2);
        assert!(!sensor.read().contains(e2));
    }
}
