//! Error types for unipolar-stepper.
//!
//! Provides unified error handling across configuration, motor control, and run validation.

use core::fmt;

use crate::motion::MAX_ANGLE;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all unipolar-stepper operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motor operation error
    Motor(MotorError),
    /// Run request validation error
    Motion(MotionError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Required builder field was not provided
    MissingField(&'static str),
    /// Motor name not found in configuration
    MotorNotFound(heapless::String<32>),
    /// Move name not found in configuration
    MoveNotFound(heapless::String<32>),
    /// Move targets another motor than the one asked to execute it
    MoveMotorMismatch {
        /// Move name
        name: heapless::String<32>,
        /// Motor the move is configured for
        motor: heapless::String<32>,
    },
    /// Move references a motor missing from the configuration
    UnknownMotor {
        /// Move name
        name: heapless::String<32>,
        /// Referenced motor name
        motor: heapless::String<32>,
    },
    /// The same pin appears twice in one motor's assignment
    DuplicatePin(u8),
    /// Two motors claim the same pin
    PinConflict {
        /// Pin identifier
        pin: u8,
        /// First motor using the pin
        first: heapless::String<32>,
        /// Second motor using the pin
        second: heapless::String<32>,
    },
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motor operation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotorError {
    /// Pin operation failed
    PinError,
    /// The worker thread owning the motor has stopped
    WorkerStopped,
}

/// Run request validation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionError {
    /// Direction must be 1 (clockwise) or -1 (counter-clockwise)
    InvalidDirection(i8),
    /// Speed must be one of 20, 40, 60, 80, 100
    InvalidSpeed(u8),
    /// Angle exceeds the per-run limit
    AngleTooLarge(u32),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
            Error::Motion(e) => write!(f, "Motion error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::MissingField(field) => write!(f, "{} is required", field),
            ConfigError::MotorNotFound(name) => write!(f, "Motor '{}' not found", name),
            ConfigError::MoveNotFound(name) => write!(f, "Move '{}' not found", name),
            ConfigError::MoveMotorMismatch { name, motor } => {
                write!(f, "Move '{}' is for motor '{}'", name, motor)
            }
            ConfigError::UnknownMotor { name, motor } => {
                write!(f, "Move '{}' references unknown motor '{}'", name, motor)
            }
            ConfigError::DuplicatePin(pin) => write!(f, "Pin {} assigned twice", pin),
            ConfigError::PinConflict { pin, first, second } => {
                write!(f, "Pin {} used by both '{}' and '{}'", pin, first, second)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError => write!(f, "GPIO pin operation failed"),
            MotorError::WorkerStopped => write!(f, "Motor worker has stopped"),
        }
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::InvalidDirection(v) => {
                write!(f, "Invalid direction: {}. Must be 1 or -1", v)
            }
            MotionError::InvalidSpeed(v) => {
                write!(f, "Invalid speed: {}. Valid values: 20, 40, 60, 80, 100", v)
            }
            MotionError::AngleTooLarge(v) => {
                write!(f, "Angle too large: {} degrees. Maximum is {}", v, MAX_ANGLE)
            }
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

impl From<MotionError> for Error {
    fn from(e: MotionError) -> Self {
        Error::Motion(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

#[cfg(feature = "std")]
impl std::error::Error for MotionError {}

/// Copy a name into a fixed-capacity string, truncating at a char boundary.
pub(crate) fn truncated<const N: usize>(s: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
