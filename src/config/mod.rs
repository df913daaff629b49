//! Configuration module for unipolar-stepper.
//!
//! Provides types for loading and validating motor and move configurations
//! from TOML files (with `std` feature) or pre-parsed data.

mod motor;
mod moves;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use motor::{MotorConfig, DEFAULT_PINS};
pub use moves::MoveConfig;
pub use system::SystemConfig;
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::Speed;
