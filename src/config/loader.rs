//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{truncated, ConfigError, Error, Result};

use super::SystemConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
///
/// ```rust,ignore
/// use unipolar_stepper::load_config;
///
/// let config = load_config("motors.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SystemConfig> {
    let content = fs::read_to_string(path.as_ref())
        .map_err(|e| Error::Config(ConfigError::IoError(truncated(&e.to_string()))))?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<SystemConfig> {
    let config: SystemConfig = toml::from_str(content)
        .map_err(|e| Error::Config(ConfigError::ParseError(truncated(e.message()))))?;

    super::validation::validate_config(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Speed;
    use crate::motion::Direction;

    #[test]
    fn test_parse_minimal_config() {
        let toml = r#"
[motors.pan]
name = "Pan"
"#;

        let config = parse_config(toml).unwrap();
        let motor = config.motor("pan").unwrap();
        assert_eq!(motor.pins, [0, 1, 2, 3]);
        assert_eq!(motor.threshold, 0);
    }

    #[test]
    fn test_parse_with_move() {
        let toml = r#"
[motors.pan]
name = "Pan"
pins = [17, 18, 27, 22]
threshold_degrees = 180

[moves.back]
motor = "pan"
direction = "counter_clockwise"
angle_degrees = 270
speed = 60
"#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.motor("pan").unwrap().threshold, 180);

        let mv = config.move_named("back").unwrap();
        assert_eq!(mv.direction, Direction::CounterClockwise);
        assert_eq!(mv.angle, 270);
        assert_eq!(mv.speed, Speed::PERCENT_60);
    }

    #[test]
    fn test_invalid_speed_rejected() {
        let toml = r#"
[motors.pan]
name = "Pan"

[moves.bad]
motor = "pan"
direction = "clockwise"
angle_degrees = 90
speed = 50
"#;

        assert!(matches!(
            parse_config(toml),
            Err(Error::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_config("/nonexistent/motors.toml"),
            Err(Error::Config(ConfigError::IoError(_)))
        ));
    }
}
