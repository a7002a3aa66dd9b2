// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat preset, program and burner types.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// A thermostat preset.
///
/// Names are matched case-insensitively. The API also reports ids 4 and 5,
/// which carry no usable preset and map to [`ThermostatState::Unknown`]; that
/// variant cannot be selected by name.
///
/// # Examples
///
/// ```
/// use toon_lib::types::ThermostatState;
///
/// let state: ThermostatState = "comfort".parse().unwrap();
/// assert_eq!(state, ThermostatState::Comfort);
/// assert_eq!(state.id(), 0);
///
/// assert!("party".parse::<ThermostatState>().is_err());
/// assert!("unknown".parse::<ThermostatState>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThermostatState {
    /// Comfort preset (id 0).
    Comfort,
    /// Home preset (id 1).
    Home,
    /// Sleep preset (id 2).
    Sleep,
    /// Away preset (id 3).
    Away,
    /// Any other id reported by the API.
    Unknown,
}

impl ThermostatState {
    /// The presets that can be selected by name.
    pub const SELECTABLE: [Self; 4] = [Self::Comfort, Self::Home, Self::Sleep, Self::Away];

    /// Maps an API id to a preset.
    #[must_use]
    pub const fn from_id(id: i32) -> Self {
        match id {
            0 => Self::Comfort,
            1 => Self::Home,
            2 => Self::Sleep,
            3 => Self::Away,
            _ => Self::Unknown,
        }
    }

    /// Returns the API id of the preset. [`Self::Unknown`] reports 4.
    #[must_use]
    pub const fn id(&self) -> i32 {
        match self {
            Self::Comfort => 0,
            Self::Home => 1,
            Self::Sleep => 2,
            Self::Away => 3,
            Self::Unknown => 4,
        }
    }

    /// Returns the display name of the preset.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Comfort => "Comfort",
            Self::Home => "Home",
            Self::Sleep => "Sleep",
            Self::Away => "Away",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ThermostatState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThermostatState {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::SELECTABLE
            .into_iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValueError::InvalidThermostatState(s.to_string()))
    }
}

/// State of the thermostat's weekly program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramState {
    /// The program is disabled; the set point stays where it was put.
    Off,
    /// The program drives the set point.
    On,
    /// The program is enabled but bypassed until its next switch.
    Override,
}

impl ProgramState {
    /// Maps an API code to a program state.
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Off),
            1 => Some(Self::On),
            2 => Some(Self::Override),
            _ => None,
        }
    }

    /// Returns the API code of the program state.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::Off => 0,
            Self::On => 1,
            Self::Override => 2,
        }
    }

    /// Returns the lowercase name of the program state.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::On => "on",
            Self::Override => "override",
        }
    }
}

impl fmt::Display for ProgramState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProgramState {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "off" | "0" => Ok(Self::Off),
            "on" | "1" => Ok(Self::On),
            "override" | "2" => Ok(Self::Override),
            _ => Err(ValueError::InvalidProgramState(s.to_string())),
        }
    }
}

/// What the boiler burner is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BurnerState {
    /// Burner idle.
    Off,
    /// Heating the house.
    On,
    /// Heating tap water.
    WaterHeating,
    /// Pre-heating ahead of a program switch.
    PreHeating,
}

impl BurnerState {
    /// Maps an API code to a burner state.
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Off),
            1 => Some(Self::On),
            2 => Some(Self::WaterHeating),
            3 => Some(Self::PreHeating),
            _ => None,
        }
    }

    /// Returns the lowercase name of the burner state.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::On => "on",
            Self::WaterHeating => "water_heating",
            Self::PreHeating => "pre_heating",
        }
    }
}

impl fmt::Display for BurnerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a manual set point interacts with a running program.
///
/// A program that is on rewrites the set point at its next switch, which can
/// come right after a manual change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProgramGuard {
    /// Write the set point and move the program to
    /// [`ProgramState::Override`] in the same request.
    #[default]
    Override,
    /// Refuse to write the set point while the program is on.
    RejectWhileActive,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thermostat_state_from_str_is_case_insensitive() {
        assert_eq!("HOME".parse::<ThermostatState>().unwrap(), ThermostatState::Home);
        assert_eq!("sLeEp".parse::<ThermostatState>().unwrap(), ThermostatState::Sleep);
        assert_eq!(" away ".parse::<ThermostatState>().unwrap(), ThermostatState::Away);
    }

    #[test]
    fn thermostat_state_rejects_unknown_names() {
        let err = "Holiday".parse::<ThermostatState>().unwrap_err();
        assert_eq!(err, ValueError::InvalidThermostatState("Holiday".to_string()));
        assert!("Unknown".parse::<ThermostatState>().is_err());
    }

    #[test]
    fn thermostat_state_ids() {
        for state in ThermostatState::SELECTABLE {
            assert_eq!(ThermostatState::from_id(state.id()), state);
        }
        assert_eq!(ThermostatState::from_id(5), ThermostatState::Unknown);
        assert_eq!(ThermostatState::from_id(-1), ThermostatState::Unknown);
    }

    #[test]
    fn program_state_codes() {
        assert_eq!(ProgramState::from_code(1), Some(ProgramState::On));
        assert_eq!(ProgramState::from_code(7), None);
        assert_eq!(ProgramState::Override.code(), 2);
        assert_eq!("ON".parse::<ProgramState>().unwrap(), ProgramState::On);
        assert!("maybe".parse::<ProgramState>().is_err());
    }

    #[test]
    fn burner_state_codes() {
        assert_eq!(BurnerState::from_code(2), Some(BurnerState::WaterHeating));
        assert_eq!(BurnerState::from_code(9), None);
        assert_eq!(BurnerState::PreHeating.to_string(), "pre_heating");
    }

    #[test]
    fn program_guard_default_overrides() {
        assert_eq!(ProgramGuard::default(), ProgramGuard::Override);
    }
}
