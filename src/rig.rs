//! Simulated bench
//!
//! Wires a full controller to simulated devices, a manual clock, and a
//! scripted engine on the far end of the serial link. The demo binary and
//! the integration tests both drive the system through this rig: press
//! buttons through the handles, step the loop, assert on the probes.

use crate::clock::{ClockHandle, ManualClock};
use crate::config::Config;
use crate::hal::sim::{
    sim_serial_pair, IndicatorProbe, MagnetProbe, MotionLog, SensorHandle, SimActuator,
    SimBoardSensor, SimIndicator, SimMagnet, SimSwitchPanel, SwitchHandle,
};
use crate::peer::ScriptedEngine;
use crate::runtime::Runtime;
use crate::transport::Transport;
use crate::world::Services;

pub struct SimRig {
    pub runtime: Runtime,
    pub engine: ScriptedEngine,
    pub clock: ClockHandle,
    pub switches: SwitchHandle,
    pub sensor: SensorHandle,
    pub motions: MotionLog,
    pub magnet: MagnetProbe,
    pub indicator: IndicatorProbe,
}

impl SimRig {
    /// Controller plus simulated bench; motions take `motion_latency_ticks`
    /// polls to finish and the clock only moves when a test moves it
    pub fn new(config: Config, motion_latency_ticks: u32) -> SimRig {
        let (clock, clock_handle) = ManualClock::new();
        let (actuator, motions) = SimActuator::new(motion_latency_ticks);
        let (sensor, sensor_handle) = SimBoardSensor::new();
        let (switches, switch_handle) = SimSwitchPanel::new();
        let (magnet, magnet_probe) = SimMagnet::new();
        let (indicator, indicator_probe) = SimIndicator::new();
        let (near, far) = sim_serial_pair();

        let services = Services {
            clock: Box::new(clock),
            actuator: Box::new(actuator),
            sensor: Box::new(sensor),
            switches: Box::new(switches),
            magnet: Box::new(magnet),
            indicator: Box::new(indicator),
            transport: Transport::new(Box::new(near)),
        };

        SimRig {
            runtime: Runtime::new(config, services),
            engine: ScriptedEngine::new(far),
            clock: clock_handle,
            switches: switch_handle,
            sensor: sensor_handle,
            motions,
            magnet: magnet_probe,
            indicator: indicator_probe,
        }
    }

    /// One loop iteration: controller tick, then the engine answers, and
    /// one tick period of simulated time passes
    pub fn step(&mut self) {
        let period = self.runtime.world().config.tick_period_ms.max(1);
        self.runtime.tick();
        self.engine.poll();
        self.clock.advance_ms(period);
    }

    pub fn step_n(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.step();
        }
    }

    /// Step until the controller has nothing queued or in service; false
    /// if that never happens within `max_ticks`
    pub fn step_until_idle(&mut self, max_ticks: u64) -> bool {
        for _ in 0..max_ticks {
            self.step();
            if self.runtime.is_idle() {
                return true;
            }
        }
        false
    }
}
