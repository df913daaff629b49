//! Run planning: angle to step conversion and threshold clamping.

use libm::round;

use crate::config::units::Speed;
use crate::error::MotionError;

use super::direction::Direction;

/// Degrees of output shaft rotation per half step.
///
/// Step angle divided by the gear reduction: 5.625 / 63.68395.
pub const STEP_ANGLE: f64 = 0.0883268076179;

/// Largest angle a single run accepts, one million revolutions.
///
/// Keeps the step count within `u32`.
pub const MAX_ANGLE: u32 = 360_000_000;

/// Number of steps needed to turn `angle` degrees.
///
/// Exact for every `u32` angle; runs are further limited to [`MAX_ANGLE`].
#[inline]
pub fn steps_for_angle(angle: u32) -> u64 {
    round(f64::from(angle) / STEP_ANGLE) as u64
}

/// Everything the engine needs to execute one run, computed up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunPlan {
    /// Direction of rotation.
    pub direction: Direction,
    /// Angle asked for by the caller.
    pub requested_angle: u32,
    /// Degrees actually travelled after threshold clamping.
    pub degrees: u32,
    /// Number of phase writes to perform.
    pub steps: u32,
    /// Pause after each phase write.
    pub step_delay_us: u32,
    /// Whether the threshold cut the requested angle short (`degrees < requested_angle`).
    pub clamped: bool,
}

impl RunPlan {
    /// Plan a run from the motor's current position and threshold.
    ///
    /// When the target would leave `[-threshold, threshold]`, only the headroom
    /// `threshold - sign * current_position` is travelled. The headroom is
    /// clamped to `[0, angle]`.
    ///
    /// # Errors
    ///
    /// Returns `MotionError::AngleTooLarge` if `angle` exceeds [`MAX_ANGLE`].
    pub fn new(
        direction: Direction,
        angle: u32,
        speed: Speed,
        current_position: i32,
        threshold: u32,
    ) -> Result<Self, MotionError> {
        if angle > MAX_ANGLE {
            return Err(MotionError::AngleTooLarge(angle));
        }

        let sign = i64::from(direction.sign());
        let position = i64::from(current_position);
        let target = position + sign * i64::from(angle);

        let degrees = if threshold != 0 && target.unsigned_abs() > u64::from(threshold) {
            let headroom = i64::from(threshold) - sign * position;
            headroom.clamp(0, i64::from(angle)) as u32
        } else {
            angle
        };
        let steps = u32::try_from(steps_for_angle(degrees))
            .map_err(|_| MotionError::AngleTooLarge(angle))?;

        Ok(Self {
            direction,
            requested_angle: angle,
            degrees,
            steps,
            step_delay_us: speed.step_delay_us(),
            clamped: degrees < angle,
        })
    }

    /// Logical position once `steps_remaining` steps are left.
    ///
    /// Proportional to the progress through the run, and back to zero once the
    /// last step has been written.
    pub fn position_after(&self, steps_remaining: u32) -> i32 {
        if steps_remaining == 0 || self.steps == 0 {
            return 0;
        }
        let done = f64::from(self.steps.saturating_sub(steps_remaining));
        let travelled = round(done / f64::from(self.steps) * f64::from(self.degrees)) as i32;
        self.direction.sign() * travelled
    }

    /// Nominal run duration in microseconds, ignoring write overhead.
    #[inline]
    pub fn duration_us(&self) -> u64 {
        u64::from(self.steps) * u64::from(self.step_delay_us)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_for_angle() {
        assert_eq!(steps_for_angle(0), 0);
        assert_eq!(steps_for_angle(1), 11);
        assert_eq!(steps_for_angle(45), 509);
        assert_eq!(steps_for_angle(90), 1019);
        assert_eq!(steps_for_angle(270), 3057);
        assert_eq!(steps_for_angle(360), 4076);
    }

    #[test]
    fn test_steps_for_large_angles() {
        assert_eq!(steps_for_angle(400_000_000), 4_528_636_444);
        assert_eq!(steps_for_angle(u32::MAX), 48_625_863_550);
        assert!(steps_for_angle(MAX_ANGLE) <= u64::from(u32::MAX));
    }

    #[test]
    fn test_angle_limit() {
        let plan = RunPlan::new(Direction::Clockwise, MAX_ANGLE, Speed::PERCENT_100, 0, 0).unwrap();
        assert_eq!(u64::from(plan.steps), steps_for_angle(MAX_ANGLE));
        assert_eq!(plan.position_after(1), MAX_ANGLE as i32);

        assert_eq!(
            RunPlan::new(Direction::Clockwise, MAX_ANGLE + 1, Speed::PERCENT_100, 0, 0),
            Err(MotionError::AngleTooLarge(MAX_ANGLE + 1))
        );
        assert_eq!(
            RunPlan::new(Direction::CounterClockwise, u32::MAX, Speed::PERCENT_100, 0, 0),
            Err(MotionError::AngleTooLarge(u32::MAX))
        );
    }

    #[test]
    fn test_unbounded_plan() {
        let plan = RunPlan::new(Direction::Clockwise, 270, Speed::PERCENT_60, 0, 0).unwrap();

        assert_eq!(plan.degrees, 270);
        assert_eq!(plan.steps, 3057);
        assert_eq!(plan.step_delay_us, 8333);
        assert!(!plan.clamped);
    }

    #[test]
    fn test_threshold_clamps_to_headroom() {
        let plan = RunPlan::new(Direction::Clockwise, 90, Speed::PERCENT_100, 0, 45).unwrap();
        assert!(plan.clamped);
        assert_eq!(plan.degrees, 45);
        assert_eq!(plan.steps, 509);

        let plan = RunPlan::new(Direction::Clockwise, 90, Speed::PERCENT_100, -40, 45).unwrap();
        assert!(plan.clamped);
        assert_eq!(plan.degrees, 85);
    }

    #[test]
    fn test_threshold_not_reached() {
        let plan = RunPlan::new(Direction::CounterClockwise, 30, Speed::PERCENT_20, 10, 45).unwrap();
        assert!(!plan.clamped);
        assert_eq!(plan.degrees, 30);
    }

    #[test]
    fn test_negative_headroom_is_zero() {
        // Already past the threshold and asked to go further out.
        let plan = RunPlan::new(Direction::CounterClockwise, 90, Speed::PERCENT_100, -50, 45).unwrap();
        assert!(plan.clamped);
        assert_eq!(plan.degrees, 0);
        assert_eq!(plan.steps, 0);
    }

    #[test]
    fn test_headroom_capped_at_angle() {
        // Outside the band and heading back in: the formula exceeds the request.
        let plan = RunPlan::new(Direction::Clockwise, 2, Speed::PERCENT_100, -50, 45).unwrap();
        assert!(!plan.clamped);
        assert_eq!(plan.degrees, 2);
    }

    #[test]
    fn test_position_after() {
        let plan = RunPlan::new(Direction::CounterClockwise, 90, Speed::PERCENT_100, 0, 0).unwrap();

        assert_eq!(plan.position_after(plan.steps), 0);
        assert_eq!(plan.position_after(plan.steps / 2), -45);
        assert_eq!(plan.position_after(1), -90);
        assert_eq!(plan.position_after(0), 0);
    }

    #[test]
    fn test_duration() {
        let plan = RunPlan::new(Direction::Clockwise, 90, Speed::PERCENT_100, 0, 0).unwrap();
        assert_eq!(plan.duration_us(), 1019 * 5000);
    }
}
