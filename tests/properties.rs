//! Property tests for step conversion, run planning and the switching sequence.

use proptest::prelude::*;

use unipolar_stepper::{reverse, steps_for_angle, Direction, RunPlan, Speed, StepSequence};

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Clockwise), Just(Direction::CounterClockwise)]
}

fn speed() -> impl Strategy<Value = Speed> {
    prop::sample::select(vec![20u8, 40, 60, 80, 100]).prop_map(|v| Speed::new(v).unwrap())
}

proptest! {
    #[test]
    fn steps_follow_step_angle(angle in any::<u32>()) {
        let expected = (angle as f64 / 0.0883268076179).round() as u64;
        prop_assert_eq!(steps_for_angle(angle), expected);
    }

    #[test]
    fn steps_are_monotonic(angle in 0u32..200_000, extra in 0u32..1_000) {
        prop_assert!(steps_for_angle(angle) <= steps_for_angle(angle + extra));
    }

    #[test]
    fn planned_degrees_stay_within_request(
        direction in direction(),
        speed in speed(),
        angle in 0u32..10_000,
        position in -2_000i32..2_000,
        threshold in 0u32..2_000,
    ) {
        let plan = RunPlan::new(direction, angle, speed, position, threshold).unwrap();
        prop_assert!(plan.degrees <= angle);
        prop_assert_eq!(u64::from(plan.steps), steps_for_angle(plan.degrees));
        prop_assert_eq!(plan.clamped, plan.degrees < angle);
        prop_assert!(plan.step_delay_us >= Speed::MIN_STEP_DELAY_US);
        if threshold == 0 {
            prop_assert!(!plan.clamped);
            prop_assert_eq!(plan.degrees, angle);
        }
    }

    #[test]
    fn intermediate_positions_bounded(
        direction in direction(),
        angle in 1u32..2_000,
        fraction in 0.0f64..1.0,
    ) {
        let plan = RunPlan::new(direction, angle, Speed::PERCENT_100, 0, 0).unwrap();
        let remaining = (plan.steps as f64 * fraction) as u32;
        let position = plan.position_after(remaining);
        prop_assert!(position.unsigned_abs() <= angle);
        if position != 0 {
            prop_assert_eq!(position.signum(), direction.sign());
        }
    }

    #[test]
    fn reverse_is_involution(
        phases in prop::array::uniform8(prop::array::uniform4(any::<bool>()))
    ) {
        let sequence = StepSequence::new(phases);
        prop_assert_eq!(reverse(&reverse(&sequence)), sequence);
    }
}
