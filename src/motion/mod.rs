//! Motion module for unipolar-stepper.
//!
//! Provides the direction type, the half-step switching sequence and run planning.

mod direction;
mod plan;
mod sequence;

pub use direction::Direction;
pub use plan::{steps_for_angle, RunPlan, MAX_ANGLE, STEP_ANGLE};
pub use sequence::{reverse, PhasePattern, StepSequence};
