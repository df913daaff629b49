//! Configuration validation.

use crate::error::{truncated, ConfigError, Error, Result};

use super::SystemConfig;

/// Validate a system configuration.
///
/// Checks:
/// - No motor lists the same pin twice
/// - No pin is shared between motors
/// - Every move references an existing motor
///
/// Speeds and directions are already validated while deserializing.
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    for (name, motor) in config.motors.iter() {
        if let Some(pin) = motor.duplicate_pin() {
            return Err(Error::Config(ConfigError::DuplicatePin(pin)));
        }

        for (other_name, other) in config.motors.iter() {
            if other_name == name {
                break;
            }
            if let Some(&pin) = motor.pins.iter().find(|p| other.pins.contains(p)) {
                return Err(Error::Config(ConfigError::PinConflict {
                    pin,
                    first: other_name.clone(),
                    second: name.clone(),
                }));
            }
        }
    }

    for (name, mv) in config.moves.iter() {
        if config.motor(mv.motor.as_str()).is_none() {
            return Err(Error::Config(ConfigError::UnknownMotor {
                name: truncated(name.as_str()),
                motor: mv.motor.clone(),
            }));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MotorConfig, MoveConfig, Speed};
    use crate::motion::Direction;

    fn name(s: &str) -> heapless::String<32> {
        heapless::String::try_from(s).unwrap()
    }

    #[test]
    fn test_duplicate_pin_rejected() {
        let mut config = SystemConfig::default();
        let motor = MotorConfig::new("a").with_pins([1, 2, 2, 3]);
        config.motors.insert(name("a"), motor).unwrap();

        assert_eq!(
            validate_config(&config),
            Err(Error::Config(ConfigError::DuplicatePin(2)))
        );
    }

    #[test]
    fn test_pin_conflict_rejected() {
        let mut config = SystemConfig::default();
        config
            .motors
            .insert(name("a"), MotorConfig::new("a").with_pins([17, 18, 27, 22]))
            .unwrap();
        config
            .motors
            .insert(name("b"), MotorConfig::new("b").with_pins([5, 6, 22, 13]))
            .unwrap();

        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::PinConflict { pin: 22, .. }))
        ));
    }

    #[test]
    fn test_unknown_motor_rejected() {
        let mut config = SystemConfig::default();
        config.motors.insert(name("a"), MotorConfig::new("a")).unwrap();
        let mv = MoveConfig {
            motor: name("b"),
            direction: Direction::Clockwise,
            angle: 90,
            speed: Speed::PERCENT_60,
        };
        config.moves.insert(name("quarter"), mv).unwrap();

        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::UnknownMotor { .. }))
        ));
    }
}
