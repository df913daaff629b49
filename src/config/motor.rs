//! Motor configuration from TOML.

use heapless::String;
use serde::Deserialize;

/// Pin identifiers used when a configuration does not name any.
pub const DEFAULT_PINS: [u8; 4] = [0, 1, 2, 3];

/// Motor configuration from TOML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MotorConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Identifiers of the four coil lines, in phase-pattern order.
    ///
    /// How identifiers map to physical pins is up to the host.
    #[serde(default = "default_pins")]
    pub pins: [u8; 4],

    /// Absolute position bound in degrees, 0 for none.
    #[serde(default, rename = "threshold_degrees")]
    pub threshold: u32,
}

fn default_pins() -> [u8; 4] {
    DEFAULT_PINS
}

impl MotorConfig {
    /// Create a configuration with default pins and no threshold.
    pub fn new(name: &str) -> Self {
        Self {
            name: crate::error::truncated(name),
            pins: DEFAULT_PINS,
            threshold: 0,
        }
    }

    /// Replace the pin assignment.
    pub fn with_pins(mut self, pins: [u8; 4]) -> Self {
        self.pins = pins;
        self
    }

    /// Replace the threshold.
    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }

    /// First pin that appears more than once in the assignment.
    pub fn duplicate_pin(&self) -> Option<u8> {
        self.pins
            .iter()
            .enumerate()
            .find(|(i, pin)| self.pins[..*i].contains(pin))
            .map(|(_, &pin)| pin)
    }
}
