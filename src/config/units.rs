//! Validated value types used in configuration and run requests.

use serde::Deserialize;

use crate::error::MotionError;

/// Rotation speed as a percentage of the motor's maximum (20, 40, 60, 80, 100).
///
/// Validated at construction so the derived step delay is always defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Speed(u8);

impl Speed {
    /// 20 % speed.
    pub const PERCENT_20: Self = Self(20);
    /// 40 % speed.
    pub const PERCENT_40: Self = Self(40);
    /// 60 % speed.
    pub const PERCENT_60: Self = Self(60);
    /// 80 % speed.
    pub const PERCENT_80: Self = Self(80);
    /// Full speed (5 ms between steps).
    pub const PERCENT_100: Self = Self(100);

    /// Valid speed values.
    const VALID_VALUES: [u8; 5] = [20, 40, 60, 80, 100];

    /// Delay between steps at full speed, in microseconds.
    pub const MIN_STEP_DELAY_US: u32 = 5_000;

    /// Create a new Speed value with validation.
    ///
    /// # Errors
    ///
    /// Returns `MotionError::InvalidSpeed` if the value is not one of the allowed percentages.
    pub fn new(value: u8) -> Result<Self, MotionError> {
        if Self::is_valid(value) {
            Ok(Self(value))
        } else {
            Err(MotionError::InvalidSpeed(value))
        }
    }

    /// Get the raw percentage.
    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Get the percentage as a float.
    #[inline]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }

    /// Check if a value is valid.
    #[inline]
    pub fn is_valid(value: u8) -> bool {
        Self::VALID_VALUES.contains(&value)
    }

    /// Pause between two phase writes, in microseconds.
    ///
    /// `round((5 * 100 / speed) * 1000)`.
    #[inline]
    pub fn step_delay_us(self) -> u32 {
        libm::round(5.0 * 100.0 / self.as_f64() * 1000.0) as u32
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self::PERCENT_100
    }
}

impl TryFrom<u8> for Speed {
    type Error = MotionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Speed> for u8 {
    fn from(speed: Speed) -> Self {
        speed.value()
    }
}

impl<'de> Deserialize<'de> for Speed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use core::fmt::Write;
        let value = u8::deserialize(deserializer)?;
        Speed::new(value).map_err(|e| {
            let mut buf = heapless::String::<128>::new();
            let _ = write!(buf, "{}", e);
            serde::de::Error::custom(buf.as_str())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_valid_values() {
        for &v in &Speed::VALID_VALUES {
            assert!(Speed::is_valid(v));
            assert_eq!(Speed::new(v).unwrap().value(), v);
            assert_eq!(u8::from(Speed::new(v).unwrap()), v);
        }
        assert!(!Speed::is_valid(50));
    }

    #[test]
    fn test_speed_invalid_values() {
        assert_eq!(Speed::new(0), Err(MotionError::InvalidSpeed(0)));
        assert!(Speed::new(10).is_err());
        assert!(Speed::new(50).is_err());
        assert!(Speed::new(101).is_err());
        assert!(Speed::new(255).is_err());
    }

    #[test]
    fn test_step_delay() {
        assert_eq!(Speed::PERCENT_20.step_delay_us(), 25_000);
        assert_eq!(Speed::PERCENT_40.step_delay_us(), 12_500);
        assert_eq!(Speed::PERCENT_60.step_delay_us(), 8_333);
        assert_eq!(Speed::PERCENT_80.step_delay_us(), 6_250);
        assert_eq!(Speed::PERCENT_100.step_delay_us(), Speed::MIN_STEP_DELAY_US);
    }
}
