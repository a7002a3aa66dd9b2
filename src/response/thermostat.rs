// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat info and preset parsing.

use serde::Deserialize;

use super::de;
use crate::types::{BurnerState, ProgramState, Temperature, ThermostatState};

/// The `thermostatInfo` section of the status document.
///
/// Temperatures are reported in hundredths of a degree; use the helper
/// methods for degrees Celsius.
///
/// # Examples
///
/// ```
/// use toon_lib::response::ThermostatInfo;
///
/// let json = r#"{
///     "currentDisplayTemp": 2150,
///     "currentSetpoint": 2000,
///     "activeState": 1,
///     "programState": 1,
///     "burnerInfo": "1"
/// }"#;
/// let info: ThermostatInfo = serde_json::from_str(json).unwrap();
/// assert!((info.displayed_temperature().unwrap() - 21.5).abs() < f32::EPSILON);
/// assert!(info.burner_on());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThermostatInfo {
    /// Id of the active preset; `-1` when the set point was set manually.
    #[serde(deserialize_with = "de::integer")]
    pub active_state: Option<i64>,

    /// Whether the boiler module is connected.
    #[serde(rename = "boilerModuleConnected", deserialize_with = "de::flag")]
    pub boiler_connected: Option<bool>,

    /// Raw burner code.
    #[serde(deserialize_with = "de::integer")]
    pub burner_info: Option<i64>,

    /// Displayed room temperature in hundredths of a degree.
    #[serde(rename = "currentDisplayTemp", deserialize_with = "de::integer")]
    pub current_displayed_temperature: Option<i64>,

    /// Boiler modulation level in percent.
    #[serde(deserialize_with = "de::integer")]
    pub current_modulation_level: Option<i64>,

    /// Current set point in hundredths of a degree.
    #[serde(rename = "currentSetpoint", deserialize_with = "de::integer")]
    pub current_set_point: Option<i64>,

    /// Boiler error code.
    #[serde(deserialize_with = "de::integer")]
    pub error_found: Option<i64>,

    /// Whether an OpenTherm boiler is present.
    #[serde(rename = "haveOTBoiler", deserialize_with = "de::flag")]
    pub have_ot_boiler: Option<bool>,

    /// Whether the program runs after the next switch.
    #[serde(deserialize_with = "de::integer")]
    pub next_program: Option<i64>,

    /// Set point after the next switch, in hundredths of a degree.
    #[serde(rename = "nextSetpoint", deserialize_with = "de::integer")]
    pub next_set_point: Option<i64>,

    /// Preset id after the next switch.
    #[serde(deserialize_with = "de::integer")]
    pub next_state: Option<i64>,

    /// Unix time of the next switch.
    #[serde(deserialize_with = "de::integer")]
    pub next_time: Option<i64>,

    /// OpenTherm communication error code.
    #[serde(rename = "otCommError", deserialize_with = "de::integer")]
    pub ot_communication_error: Option<i64>,

    /// Raw program state code.
    #[serde(deserialize_with = "de::integer")]
    pub program_state: Option<i64>,

    /// Set point the boiler is working towards, in hundredths of a degree.
    #[serde(rename = "realSetpoint", deserialize_with = "de::integer")]
    pub real_set_point: Option<i64>,
}

impl ThermostatInfo {
    /// Returns the displayed room temperature in degrees Celsius.
    #[must_use]
    pub fn displayed_temperature(&self) -> Option<f32> {
        self.current_displayed_temperature
            .map(Temperature::celsius_from_hundredths)
    }

    /// Returns the current set point in degrees Celsius.
    #[must_use]
    pub fn set_point(&self) -> Option<f32> {
        self.current_set_point
            .map(Temperature::celsius_from_hundredths)
    }

    /// Returns the program state, if the code is known.
    #[must_use]
    pub fn program(&self) -> Option<ProgramState> {
        self.program_state
            .and_then(|code| i32::try_from(code).ok())
            .and_then(ProgramState::from_code)
    }

    /// Returns true when the burner is doing anything.
    #[must_use]
    pub fn burner_on(&self) -> bool {
        self.burner_info.is_some_and(|code| code != 0)
    }

    /// Returns the burner state, if the code is known.
    #[must_use]
    pub fn burner_state(&self) -> Option<BurnerState> {
        self.burner_info
            .and_then(|code| i32::try_from(code).ok())
            .and_then(BurnerState::from_code)
    }
}

/// The `thermostatStates` section of the status document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThermostatStates {
    /// Configured presets.
    pub state: Vec<ThermostatStateRecord>,
}

/// One configured preset as reported by the API.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThermostatStateRecord {
    /// Preset id.
    #[serde(deserialize_with = "de::integer")]
    pub id: Option<i64>,

    /// Preset temperature in hundredths of a degree.
    #[serde(deserialize_with = "de::integer")]
    pub temp_value: Option<i64>,

    /// Whether tap water heating is enabled in this preset.
    #[serde(deserialize_with = "de::flag")]
    pub dhw: Option<bool>,
}

/// A configured preset with its name resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermostatPreset {
    /// The preset.
    pub state: ThermostatState,
    /// Raw preset id.
    pub id: i64,
    /// Preset temperature in hundredths of a degree.
    pub temperature: Option<i64>,
    /// Whether tap water heating is enabled in this preset.
    pub dhw: bool,
}

impl ThermostatPreset {
    /// Returns the preset temperature in degrees Celsius.
    #[must_use]
    pub fn celsius(&self) -> Option<f32> {
        self.temperature.map(Temperature::celsius_from_hundredths)
    }
}

impl ThermostatStates {
    /// Returns the presets that carry an id, with names resolved.
    #[must_use]
    pub fn presets(&self) -> Vec<ThermostatPreset> {
        self.state
            .iter()
            .filter_map(|record| {
                let id = record.id?;
                Some(ThermostatPreset {
                    state: i32::try_from(id).map_or(ThermostatState::Unknown, ThermostatState::from_id),
                    id,
                    temperature: record.temp_value,
                    dhw: record.dhw.unwrap_or(false),
                })
            })
            .collect()
    }
}
