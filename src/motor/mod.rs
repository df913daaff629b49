//! Motor module for unipolar-stepper.
//!
//! Provides the stepping engine, its state record and progress observation.

mod builder;
mod driver;
pub mod state;
#[cfg(feature = "std")]
mod worker;

pub use builder::StepperMotorBuilder;
pub use driver::{RunReport, StepperMotor};
pub use state::{MotorState, MotorStatus, Progress};

#[cfg(feature = "std")]
pub use state::MotorMonitor;
#[cfg(feature = "std")]
pub use worker::{MotorWorker, PendingRun, RunRequest};
