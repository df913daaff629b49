//! Motor state record and progress observation.
//!
//! The four observable fields live in [`MotorStatus`] as atomics so that a
//! [`MotorMonitor`] on another thread can read them while a run is executing.

use core::sync::atomic::{AtomicBool, AtomicI32, AtomicU32, Ordering};

use crate::motion::{Direction, StepSequence};

#[cfg(feature = "std")]
type SharedStatus = std::sync::Arc<MotorStatus>;
#[cfg(not(feature = "std"))]
type SharedStatus = MotorStatus;

#[cfg(feature = "std")]
fn share(status: MotorStatus) -> SharedStatus {
    std::sync::Arc::new(status)
}

#[cfg(not(feature = "std"))]
fn share(status: MotorStatus) -> SharedStatus {
    status
}

/// Point-in-time copy of a motor's progress fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Progress {
    /// A run is in progress.
    pub running: bool,
    /// Absolute position bound in degrees, 0 for none.
    pub threshold: u32,
    /// Logical position in degrees, relative to the start of the current run.
    pub current_position: i32,
    /// Phase writes left in the current run.
    pub steps_remaining: u32,
}

/// Progress fields written by the stepping engine.
#[derive(Debug, Default)]
pub struct MotorStatus {
    running: AtomicBool,
    threshold: AtomicU32,
    current_position: AtomicI32,
    steps_remaining: AtomicU32,
}

impl MotorStatus {
    /// Create an idle status with the given threshold.
    pub const fn new(threshold: u32) -> Self {
        Self {
            running: AtomicBool::new(false),
            threshold: AtomicU32::new(threshold),
            current_position: AtomicI32::new(0),
            steps_remaining: AtomicU32::new(0),
        }
    }

    /// Whether a run is in progress.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Threshold in degrees (0 = unbounded).
    #[inline]
    pub fn threshold(&self) -> u32 {
        self.threshold.load(Ordering::Relaxed)
    }

    /// Logical position in degrees.
    #[inline]
    pub fn current_position(&self) -> i32 {
        self.current_position.load(Ordering::Relaxed)
    }

    /// Steps left in the current run.
    #[inline]
    pub fn steps_remaining(&self) -> u32 {
        self.steps_remaining.load(Ordering::Relaxed)
    }

    /// Copy all fields.
    pub fn snapshot(&self) -> Progress {
        Progress {
            running: self.is_running(),
            threshold: self.threshold(),
            current_position: self.current_position(),
            steps_remaining: self.steps_remaining(),
        }
    }

    #[inline]
    pub(crate) fn set_running(&self, running: bool) {
        self.running.store(running, Ordering::Release);
    }

    #[inline]
    pub(crate) fn set_threshold(&self, threshold: u32) {
        self.threshold.store(threshold, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn set_current_position(&self, position: i32) {
        self.current_position.store(position, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn set_steps_remaining(&self, steps: u32) {
        self.steps_remaining.store(steps, Ordering::Relaxed);
    }
}

/// Mutable record of one physical motor.
///
/// Created once with its pin assignment and changed only by the stepping
/// engine that owns it.
#[derive(Debug)]
pub struct MotorState {
    status: SharedStatus,
    sequence: StepSequence,
    pins: [u8; 4],
}

impl MotorState {
    /// Create an idle state at position 0.
    pub fn new(pins: [u8; 4], threshold: u32) -> Self {
        Self {
            status: share(MotorStatus::new(threshold)),
            sequence: StepSequence::HALF_STEP_28BYJ48,
            pins,
        }
    }

    /// Whether a run is in progress.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.status.is_running()
    }

    /// Threshold in degrees (0 = unbounded).
    #[inline]
    pub fn threshold(&self) -> u32 {
        self.status.threshold()
    }

    /// Logical position in degrees.
    #[inline]
    pub fn current_position(&self) -> i32 {
        self.status.current_position()
    }

    /// Steps left in the current run.
    #[inline]
    pub fn steps_remaining(&self) -> u32 {
        self.status.steps_remaining()
    }

    /// Copy of the progress fields.
    #[inline]
    pub fn progress(&self) -> Progress {
        self.status.snapshot()
    }

    /// Pin identifiers in phase-pattern order.
    #[inline]
    pub fn pins(&self) -> [u8; 4] {
        self.pins
    }

    /// Working switching sequence.
    #[inline]
    pub fn sequence(&self) -> &StepSequence {
        &self.sequence
    }

    /// Read-only handle to the progress fields, usable from other threads.
    #[cfg(feature = "std")]
    pub fn monitor(&self) -> MotorMonitor {
        MotorMonitor {
            status: SharedStatus::clone(&self.status),
        }
    }

    #[inline]
    pub(crate) fn status(&self) -> &MotorStatus {
        &self.status
    }

    pub(crate) fn set_threshold(&mut self, threshold: u32) {
        self.status.set_threshold(threshold);
    }

    /// Orient the working sequence for `direction`.
    pub(crate) fn orient(&mut self, direction: Direction) {
        if direction == Direction::CounterClockwise {
            self.sequence = self.sequence.reversed();
        }
    }

    /// Put back the canonical clockwise sequence.
    pub(crate) fn restore_sequence(&mut self) {
        self.sequence = StepSequence::HALF_STEP_28BYJ48;
    }
}

/// Cloneable read-only view of a motor's progress.
///
/// Obtained from [`MotorState::monitor`] or the motor itself; reads never block
/// the stepping engine.
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct MotorMonitor {
    status: SharedStatus,
}

#[cfg(feature = "std")]
impl MotorMonitor {
    /// Whether a run is in progress.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.status.is_running()
    }

    /// Threshold in degrees (0 = unbounded).
    #[inline]
    pub fn threshold(&self) -> u32 {
        self.status.threshold()
    }

    /// Logical position in degrees.
    #[inline]
    pub fn current_position(&self) -> i32 {
        self.status.current_position()
    }

    /// Steps left in the current run.
    #[inline]
    pub fn steps_remaining(&self) -> u32 {
        self.status.steps_remaining()
    }

    /// Copy of the progress fields.
    #[inline]
    pub fn progress(&self) -> Progress {
        self.status.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = MotorState::new([17, 18, 27, 22], 0);

        assert!(!state.is_running());
        assert_eq!(state.threshold(), 0);
        assert_eq!(state.current_position(), 0);
        assert_eq!(state.steps_remaining(), 0);
        assert_eq!(state.pins(), [17, 18, 27, 22]);
        assert_eq!(state.sequence(), &StepSequence::HALF_STEP_28BYJ48);
    }

    #[test]
    fn test_orient_and_restore() {
        let mut state = MotorState::new([0, 1, 2, 3], 0);

        state.orient(Direction::Clockwise);
        assert_eq!(state.sequence(), &StepSequence::HALF_STEP_28BYJ48);

        state.orient(Direction::CounterClockwise);
        assert_eq!(state.sequence(), &StepSequence::HALF_STEP_28BYJ48.reversed());

        state.restore_sequence();
        assert_eq!(state.sequence(), &StepSequence::HALF_STEP_28BYJ48);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_monitor_sees_updates() {
        let mut state = MotorState::new([0, 1, 2, 3], 0);
        let monitor = state.monitor();

        state.set_threshold(45);
        state.status().set_running(true);
        state.status().set_current_position(-12);
        state.status().set_steps_remaining(300);

        assert_eq!(
            monitor.progress(),
            Progress {
                running: true,
                threshold: 45,
                current_position: -12,
                steps_remaining: 300,
            }
        );
    }
}
