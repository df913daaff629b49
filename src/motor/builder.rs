//! Builder pattern for StepperMotor.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::{MotorConfig, SystemConfig, DEFAULT_PINS};
use crate::error::{truncated, ConfigError, Error, Result};

use super::driver::StepperMotor;
use super::state::MotorState;

/// Builder for creating StepperMotor instances.
pub struct StepperMotorBuilder<PIN, DELAY>
where
    PIN: OutputPin,
    DELAY: DelayNs,
{
    pins: Option<[PIN; 4]>,
    delay: Option<DELAY>,
    name: Option<heapless::String<32>>,
    pin_ids: [u8; 4],
    threshold: u32,
}

impl<PIN, DELAY> Default for StepperMotorBuilder<PIN, DELAY>
where
    PIN: OutputPin,
    DELAY: DelayNs,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<PIN, DELAY> StepperMotorBuilder<PIN, DELAY>
where
    PIN: OutputPin,
    DELAY: DelayNs,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            pins: None,
            delay: None,
            name: None,
            pin_ids: DEFAULT_PINS,
            threshold: 0,
        }
    }

    /// Set the four coil lines, in phase-pattern order.
    pub fn pins(mut self, pins: [PIN; 4]) -> Self {
        self.pins = Some(pins);
        self
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: DELAY) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the motor name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(truncated(name));
        self
    }

    /// Record which host pin identifiers the lines correspond to.
    pub fn pin_ids(mut self, ids: [u8; 4]) -> Self {
        self.pin_ids = ids;
        self
    }

    /// Set the absolute position bound in degrees (0 = unbounded).
    pub fn threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Configure from a MotorConfig.
    pub fn from_motor_config(mut self, config: &MotorConfig) -> Self {
        self.name = Some(config.name.clone());
        self.pin_ids = config.pins;
        self.threshold = config.threshold;
        self
    }

    /// Configure from SystemConfig by motor name.
    ///
    /// The motor is named after its configuration key so that moves can refer to it.
    pub fn from_config(self, config: &SystemConfig, motor_name: &str) -> Result<Self> {
        let motor_config = config
            .motor(motor_name)
            .ok_or_else(|| Error::Config(ConfigError::MotorNotFound(truncated(motor_name))))?;

        Ok(self.from_motor_config(motor_config).name(motor_name))
    }

    /// Build the StepperMotor.
    ///
    /// # Errors
    ///
    /// Returns an error if the pins or the delay provider are missing.
    pub fn build(self) -> Result<StepperMotor<PIN, DELAY>> {
        let pins = self
            .pins
            .ok_or(Error::Config(ConfigError::MissingField("pins")))?;

        let delay = self
            .delay
            .ok_or(Error::Config(ConfigError::MissingField("delay")))?;

        let name = self.name.unwrap_or_else(|| truncated("motor"));

        Ok(StepperMotor::new(
            pins,
            delay,
            MotorState::new(self.pin_ids, self.threshold),
            name,
        ))
    }
}
