//! # unipolar-stepper
//!
//! Half-step driver for 28BYJ48-class unipolar stepper motors with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **embedded-hal 1.0**: Four `OutputPin`s for the coil lines, `DelayNs` for timing
//! - **no_std compatible**: Core library works without standard library
//! - **Threshold clamping**: Runs stop at an absolute position bound
//! - **Live progress**: Position and remaining steps observable during a blocking run
//! - **Configuration-driven**: Define motors and named moves in TOML files
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use unipolar_stepper::{Direction, Speed, StepperMotor};
//!
//! let mut motor = StepperMotor::builder()
//!     .name("pan")
//!     .pins([in1, in2, in3, in4])
//!     .pin_ids([17, 18, 27, 22])
//!     .delay(delay)
//!     .build()?;
//!
//! motor.run(Direction::Clockwise, 270, Speed::PERCENT_60)?;
//! motor.run(Direction::CounterClockwise, 270, Speed::PERCENT_60)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O, TOML parsing and the threaded [`MotorWorker`]
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

// Must come first so the logging macros are visible to later modules
#[macro_use]
mod fmt;

// Core modules
pub mod config;
pub mod error;
pub mod motion;
pub mod motor;

// Re-exports for ergonomic API
pub use config::{validate_config, MotorConfig, MoveConfig, Speed, SystemConfig};
pub use error::{Error, Result};
pub use motion::{
    reverse, steps_for_angle, Direction, RunPlan, StepSequence, MAX_ANGLE, STEP_ANGLE,
};
pub use motor::{MotorState, Progress, RunReport, StepperMotor, StepperMotorBuilder};

#[cfg(feature = "std")]
pub use motor::{MotorMonitor, MotorWorker, PendingRun, RunRequest};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};
