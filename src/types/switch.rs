// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! On/off state of switchable devices.

use std::fmt;

/// The on/off state of a light or smart plug.
///
/// # Examples
///
/// ```
/// use toon_lib::types::SwitchState;
///
/// assert_eq!(SwitchState::from(true), SwitchState::On);
/// assert_eq!(SwitchState::On.toggled(), SwitchState::Off);
/// assert_eq!(SwitchState::Off.as_num(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SwitchState {
    /// Switched off.
    #[default]
    Off,
    /// Switched on.
    On,
}

impl SwitchState {
    /// Returns the lowercase name used for display.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::On => "on",
        }
    }

    /// Returns the numeric value used by the API.
    #[must_use]
    pub const fn as_num(&self) -> u8 {
        match self {
            Self::Off => 0,
            Self::On => 1,
        }
    }

    /// Returns the opposite state.
    #[must_use]
    pub const fn toggled(&self) -> Self {
        match self {
            Self::Off => Self::On,
            Self::On => Self::Off,
        }
    }

    /// Returns true when switched on.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        matches!(self, Self::On)
    }
}

impl fmt::Display for SwitchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<bool> for SwitchState {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggled_flips() {
        assert_eq!(SwitchState::Off.toggled(), SwitchState::On);
        assert_eq!(SwitchState::On.toggled().toggled(), SwitchState::On);
    }

    #[test]
    fn display() {
        assert_eq!(SwitchState::On.to_string(), "on");
        assert_eq!(SwitchState::default().to_string(), "off");
    }
}
