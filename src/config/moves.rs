//! Named run requests from TOML.

use heapless::String;
use serde::Deserialize;

use crate::motion::Direction;

use super::units::Speed;

/// A named rotation to run on a configured motor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MoveConfig {
    /// Name of the motor this move is for.
    pub motor: String<32>,

    /// Rotation direction.
    pub direction: Direction,

    /// Angle to turn, in degrees from the current logical position.
    #[serde(rename = "angle_degrees")]
    pub angle: u32,

    /// Rotation speed.
    #[serde(default)]
    pub speed: Speed,
}
