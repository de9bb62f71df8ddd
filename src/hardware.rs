//! Motion and sensor capabilities.
//!
//! Provides the three capability traits the console dispatches to, simulated
//! implementations for host use, and recording mocks for testing. The
//! simulations keep the blocking drive discipline: a bounded drive returns
//! when its travel completes, an unlimited drive returns immediately with
//! the motors left running until `stop`.

use std::thread;
use std::time::Duration;

use log::info;

use crate::instruction::NO_LIMIT;

/// A commanded travel: a bounded distance/angle, or unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Travel {
    Distance(i32),
    Unlimited,
}

impl Travel {
    /// Decode an instruction argument, mapping the sentinel to `Unlimited`.
    pub fn from_argument(argument: i32) -> Self {
        if argument == NO_LIMIT {
            Travel::Unlimited
        } else {
            Travel::Distance(argument)
        }
    }
}

/// Drive and rotation control. Bounded calls block until the commanded
/// motion completes; unlimited calls return with the drive still running and
/// the caller is responsible for a later `stop`.
pub trait MotionActuator {
    fn drive_forward(&mut self, travel: Travel);
    fn drive_reverse(&mut self, travel: Travel);
    fn rotate_cw(&mut self, degrees: i32);
    fn rotate_ccw(&mut self, degrees: i32);
    fn pause(&mut self, millis: u32);
    fn stop(&mut self);
}

/// Ranging sensor: blocks, polling, until a measured distance is at or
/// under the threshold, then reports the reading in centimetres.
pub trait DistanceSensor {
    fn wait_until_within(&mut self, threshold_cm: u32) -> u32;
}

/// Push-button style input: blocks until a pressed-to-released transition.
pub trait SignalSensor {
    fn wait_for_release(&mut self);
}

/// Simulated drive that sleeps a configurable pace per centimetre or degree.
pub struct SimMotion {
    pace: Duration,
    running: bool,
}

impl SimMotion {
    /// `pace_ms` is the simulated travel time per centimetre or degree.
    pub fn new(pace_ms: u64) -> Self {
        Self {
            pace: Duration::from_millis(pace_ms),
            running: false,
        }
    }

    fn drive(&mut self, label: &str, travel: Travel) {
        match travel {
            Travel::Distance(cm) => {
                info!("{} {} cm", label, cm);
                thread::sleep(self.pace * cm.max(0) as u32);
                self.running = false;
            }
            Travel::Unlimited => {
                info!("{} until stopped", label);
                self.running = true;
            }
        }
    }

    fn rotate(&mut self, label: &str, degrees: i32) {
        info!("rotate {} {} deg", label, degrees);
        thread::sleep(self.pace * degrees.max(0) as u32);
    }
}

impl MotionActuator for SimMotion {
    fn drive_forward(&mut self, travel: Travel) {
        self.drive("forward", travel);
    }

    fn drive_reverse(&mut self, travel: Travel) {
        self.drive("reverse", travel);
    }

    fn rotate_cw(&mut self, degrees: i32) {
        self.rotate("cw", degrees);
    }

    fn rotate_ccw(&mut self, degrees: i32) {
        self.rotate("ccw", degrees);
    }

    fn pause(&mut self, millis: u32) {
        info!("pause {} ms", millis);
        thread::sleep(Duration::from_millis(u64::from(millis)));
    }

    fn stop(&mut self) {
        if self.running {
            info!("stop (drive was running)");
        } else {
            info!("stop");
        }
        self.running = false;
    }
}

/// Simulated ranging sensor: the object is taken to appear exactly at the
/// threshold after a short settling delay.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimRange;

impl DistanceSensor for SimRange {
    fn wait_until_within(&mut self, threshold_cm: u32) -> u32 {
        info!("waiting for an object within {} cm", threshold_cm);
        thread::sleep(Duration::from_millis(250));
        threshold_cm
    }
}

/// Simulated push button: a release arrives after a short delay.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimButton;

impl SignalSensor for SimButton {
    fn wait_for_release(&mut self) {
        info!("waiting for push button release");
        thread::sleep(Duration::from_millis(250));
    }
}

/// A recorded motion call, for asserting dispatch order in tests.
#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionCall {
    Forward(Travel),
    Reverse(Travel),
    RotateCw(i32),
    RotateCcw(i32),
    Pause(u32),
    Stop,
}

#[cfg(test)]
#[derive(Default)]
pub struct MockMotion {
    pub calls: Vec<MotionCall>,
}

#[cfg(test)]
impl MotionActuator for MockMotion {
    fn drive_forward(&mut self, travel: Travel) {
        self.calls.push(MotionCall::Forward(travel));
    }

    fn drive_reverse(&mut self, travel: Travel) {
        self.calls.push(MotionCall::Reverse(travel));
    }

    fn rotate_cw(&mut self, degrees: i32) {
        self.calls.push(MotionCall::RotateCw(degrees));
    }

    fn rotate_ccw(&mut self, degrees: i32) {
        self.calls.push(MotionCall::RotateCcw(degrees));
    }

    fn pause(&mut self, millis: u32) {
        self.calls.push(MotionCall::Pause(millis));
    }

    fn stop(&mut self) {
        self.calls.push(MotionCall::Stop);
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct MockRange {
    pub thresholds: Vec<u32>,
    pub reading: u32,
}

#[cfg(test)]
impl DistanceSensor for MockRange {
    fn wait_until_within(&mut self, threshold_cm: u32) -> u32 {
        self.thresholds.push(threshold_cm);
        self.reading
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct MockButton {
    pub releases: usize,
}

#[cfg(test)]
impl SignalSensor for MockButton {
    fn wait_for_release(&mut self) {
        self.releases += 1;
    }
}
