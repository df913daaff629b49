//! Stepper motor driver.
//!
//! Generic over embedded-hal 1.0 pin and delay types.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::units::Speed;
use crate::config::SystemConfig;
use crate::error::{truncated, ConfigError, Error, MotorError, Result};
use crate::motion::{Direction, PhasePattern, RunPlan};

use super::builder::StepperMotorBuilder;
use super::state::{MotorState, Progress};

#[cfg(feature = "std")]
use super::state::MotorMonitor;

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RunReport {
    /// Direction of rotation.
    pub direction: Direction,
    /// Angle asked for by the caller.
    pub requested_angle: u32,
    /// Degrees planned after threshold clamping.
    pub degrees: u32,
    /// Steps planned for the run.
    pub planned_steps: u32,
    /// Phase writes actually performed.
    pub steps_executed: u32,
    /// The run stopped early because the threshold was reached.
    pub threshold_reached: bool,
    /// The threshold shortened the planned travel.
    pub clamped: bool,
    /// Logical position after the run.
    pub final_position: i32,
}

/// Stepper motor driver for 4-phase unipolar motors.
///
/// Generic over:
/// - `PIN`: coil line type (must implement `OutputPin`); use type-erased pins
///   when the HAL gives every GPIO its own type
/// - `DELAY`: Delay provider (must implement `DelayNs`)
///
/// [`run`](Self::run) takes `&mut self`, so one motor can never execute two
/// runs at once. To drive a motor from another thread see
/// [`MotorWorker`](super::MotorWorker).
pub struct StepperMotor<PIN, DELAY>
where
    PIN: OutputPin,
    DELAY: DelayNs,
{
    /// Coil lines, in phase-pattern order.
    pins: [PIN; 4],

    /// Delay provider for step timing.
    delay: DELAY,

    /// Position, progress and working sequence.
    state: MotorState,

    /// Motor name for logging/debugging.
    name: heapless::String<32>,
}

impl<PIN, DELAY> StepperMotor<PIN, DELAY>
where
    PIN: OutputPin,
    DELAY: DelayNs,
{
    /// Start building a motor.
    pub fn builder() -> StepperMotorBuilder<PIN, DELAY> {
        StepperMotorBuilder::new()
    }

    /// Create a new idle motor.
    pub(crate) fn new(
        pins: [PIN; 4],
        delay: DELAY,
        state: MotorState,
        name: heapless::String<32>,
    ) -> Self {
        Self {
            pins,
            delay,
            state,
            name,
        }
    }

    /// Get the motor name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Get the motor state.
    #[inline]
    pub fn state(&self) -> &MotorState {
        &self.state
    }

    /// Whether a run is in progress.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Threshold in degrees (0 = unbounded).
    #[inline]
    pub fn threshold(&self) -> u32 {
        self.state.threshold()
    }

    /// Logical position in degrees.
    #[inline]
    pub fn current_position(&self) -> i32 {
        self.state.current_position()
    }

    /// Steps left in the current run.
    #[inline]
    pub fn steps_remaining(&self) -> u32 {
        self.state.steps_remaining()
    }

    /// Copy of the progress fields.
    #[inline]
    pub fn progress(&self) -> Progress {
        self.state.progress()
    }

    /// Read-only progress handle for other threads.
    #[cfg(feature = "std")]
    pub fn monitor(&self) -> MotorMonitor {
        self.state.monitor()
    }

    /// Set the absolute position bound in degrees (0 disables it).
    pub fn set_threshold(&mut self, threshold: u32) {
        self.state.set_threshold(threshold);
    }

    /// Plan a run from the current position and threshold without executing it.
    ///
    /// # Errors
    ///
    /// Returns `MotionError::AngleTooLarge` if `angle` exceeds [`MAX_ANGLE`](crate::MAX_ANGLE).
    pub fn plan(&self, direction: Direction, angle: u32, speed: Speed) -> Result<RunPlan> {
        let plan = RunPlan::new(
            direction,
            angle,
            speed,
            self.state.current_position(),
            self.state.threshold(),
        )?;
        Ok(plan)
    }

    /// Rotate `angle` degrees and block until done.
    ///
    /// Stops early once the threshold is reached. All coil lines are driven low
    /// afterwards and the clockwise sequence is restored, also on pin errors.
    ///
    /// # Errors
    ///
    /// Returns `MotionError::AngleTooLarge` before any state change or pin write
    /// if `angle` exceeds [`MAX_ANGLE`](crate::MAX_ANGLE), and
    /// `MotorError::PinError` if an output line could not be written.
    pub fn run(&mut self, direction: Direction, angle: u32, speed: Speed) -> Result<RunReport> {
        let plan = self.plan(direction, angle, speed).map_err(|e| {
            warn!("{=str}: rejected angle {}", self.name.as_str(), angle);
            e
        })?;

        let Self {
            pins,
            delay,
            state,
            name,
        } = self;

        state.status().set_running(true);
        info!(
            "{=str}: run dir={} angle={} degrees={} steps={} delay_us={}",
            name.as_str(),
            direction.sign(),
            angle,
            plan.degrees,
            plan.steps,
            plan.step_delay_us
        );

        state.status().set_steps_remaining(plan.steps);
        state.orient(direction);

        let threshold = state.threshold();
        let mut steps_executed = 0;
        let mut threshold_reached = false;
        let mut outcome = Ok(());

        for i in 0..plan.steps {
            if threshold != 0 && state.current_position().unsigned_abs() >= threshold {
                debug!("{=str}: threshold {} reached", name.as_str(), threshold);
                threshold_reached = true;
                break;
            }

            if let Err(e) = write_phase(pins, state.sequence().phase(i as usize)) {
                outcome = Err(e);
                break;
            }

            let remaining = plan.steps - (i + 1);
            state.status().set_steps_remaining(remaining);
            state.status().set_current_position(plan.position_after(remaining));
            steps_executed += 1;

            delay.delay_us(plan.step_delay_us);
        }

        let released = release_lines(pins);
        state.restore_sequence();
        state.status().set_running(false);

        if outcome.is_err() || released.is_err() {
            warn!("{=str}: pin error after {} steps", name.as_str(), steps_executed);
        }
        outcome?;
        released?;

        Ok(RunReport {
            direction,
            requested_angle: angle,
            degrees: plan.degrees,
            planned_steps: plan.steps,
            steps_executed,
            threshold_reached,
            clamped: plan.clamped,
            final_position: state.current_position(),
        })
    }

    /// Run from unvalidated values.
    ///
    /// `direction` must be 1 or -1 and `speed` one of 20, 40, 60, 80, 100.
    ///
    /// # Errors
    ///
    /// Returns `MotionError::InvalidDirection` or `MotionError::InvalidSpeed`
    /// before any state change or pin write, otherwise as [`run`](Self::run).
    pub fn run_raw(&mut self, direction: i8, angle: u32, speed: u8) -> Result<RunReport> {
        let direction = Direction::try_from(direction).map_err(|e| {
            warn!("{=str}: rejected direction {}", self.name.as_str(), direction);
            e
        })?;
        let speed = Speed::new(speed).map_err(|e| {
            warn!("{=str}: rejected speed {}", self.name.as_str(), speed);
            e
        })?;

        self.run(direction, angle, speed)
    }

    /// Run a named move from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The move is not found in the configuration
    /// - The move is configured for another motor
    /// - A pin write fails during the run
    pub fn execute(&mut self, move_name: &str, config: &SystemConfig) -> Result<RunReport> {
        let mv = config
            .move_named(move_name)
            .ok_or_else(|| Error::Config(ConfigError::MoveNotFound(truncated(move_name))))?;

        if mv.motor.as_str() != self.name.as_str() {
            return Err(Error::Config(ConfigError::MoveMotorMismatch {
                name: truncated(move_name),
                motor: mv.motor.clone(),
            }));
        }

        self.run(mv.direction, mv.angle, mv.speed)
    }

    /// Drive all coil lines low.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::PinError` if any line failed; the others are still written.
    pub fn release(&mut self) -> Result<()> {
        release_lines(&mut self.pins)
    }

    /// Give back the pins and delay provider.
    pub fn free(self) -> ([PIN; 4], DELAY) {
        (self.pins, self.delay)
    }
}

/// Set each line to the matching pattern bit.
fn write_phase<PIN: OutputPin>(pins: &mut [PIN; 4], phase: PhasePattern) -> Result<()> {
    for (pin, &on) in pins.iter_mut().zip(phase.iter()) {
        let written = if on { pin.set_high() } else { pin.set_low() };
        written.map_err(|_| MotorError::PinError)?;
    }
    Ok(())
}

/// De-energize every coil, reporting the first failure.
fn release_lines<PIN: OutputPin>(pins: &mut [PIN; 4]) -> Result<()> {
    let mut result = Ok(());
    for pin in pins.iter_mut() {
        if pin.set_low().is_err() && result.is_ok() {
            result = Err(Error::Motor(MotorError::PinError));
        }
    }
    result
}
