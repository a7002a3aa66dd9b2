// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temperature set point type.

use std::fmt;

use crate::error::ValueError;

/// A thermostat set point in degrees Celsius.
///
/// The API exchanges temperatures as integer hundredths of a degree.
///
/// # Examples
///
/// ```
/// use toon_lib::types::Temperature;
///
/// let temp = Temperature::new(20.5).unwrap();
/// assert_eq!(temp.hundredths(), 2050);
///
/// assert!(Temperature::new(45.0).is_err());
/// assert!(Temperature::new(f32::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Temperature(f32);

impl Temperature {
    /// Lowest set point the thermostat accepts.
    pub const MIN: f32 = 6.0;
    /// Highest set point the thermostat accepts.
    pub const MAX: f32 = 30.0;

    /// Creates a set point, validating the range.
    ///
    /// # Errors
    ///
    /// Returns error if the value is not finite or outside
    /// [`MIN`](Self::MIN)..=[`MAX`](Self::MAX).
    pub fn new(celsius: f32) -> Result<Self, ValueError> {
        if celsius.is_finite() && (Self::MIN..=Self::MAX).contains(&celsius) {
            Ok(Self(celsius))
        } else {
            Err(ValueError::InvalidTemperature {
                min: Self::MIN,
                max: Self::MAX,
                actual: celsius,
            })
        }
    }

    /// Converts an API value in hundredths of a degree to degrees Celsius.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn celsius_from_hundredths(hundredths: i64) -> f32 {
        hundredths as f32 / 100.0
    }

    /// Returns the temperature in degrees Celsius.
    #[must_use]
    pub fn celsius(&self) -> f32 {
        self.0
    }

    /// Returns the temperature in hundredths of a degree.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn hundredths(&self) -> i32 {
        // The range check keeps this well inside i32.
        (self.0 * 100.0).round() as i32
    }
}

impl TryFrom<f32> for Temperature {
    type Error = ValueError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}°C", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        assert!(Temperature::new(6.0).is_ok());
        assert!(Temperature::new(30.0).is_ok());
        assert!(Temperature::new(5.99).is_err());
        assert!(Temperature::new(30.01).is_err());
        assert!(Temperature::new(f32::INFINITY).is_err());
    }

    #[test]
    fn hundredths_round_trip() {
        assert_eq!(Temperature::new(19.99).unwrap().hundredths(), 1999);
        assert!((Temperature::celsius_from_hundredths(2150) - 21.5).abs() < f32::EPSILON);
    }

    #[test]
    fn display() {
        assert_eq!(Temperature::new(21.5).unwrap().to_string(), "21.50°C");
    }
}
