// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Status document parsing.

use serde::Deserialize;

use super::device::{DeviceConfigEntry, DeviceList, DeviceStatusEntry, SmokeDetector, SwitchRecord};
use super::thermostat::{ThermostatInfo, ThermostatStates};
use super::usage::{PowerUsage, Solar, Usage, UsageSection};
use crate::error::ParseError;

/// The status document returned by `/toon/v3/{agreementId}/status`.
///
/// Every section is optional in the wire format. The usage and thermostat
/// accessors turn a missing section into [`ParseError::MissingField`]; a
/// missing device section reads as an empty device list.
///
/// # Examples
///
/// ```
/// use toon_lib::response::StatusResponse;
///
/// let json = r#"{
///     "gasUsage": {"value": 12, "isSmart": 1},
///     "thermostatInfo": {"currentDisplayTemp": 2050}
/// }"#;
/// let status: StatusResponse = serde_json::from_str(json).unwrap();
/// assert_eq!(status.gas().unwrap().value, Some(12.0));
/// assert!(status.power().is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusResponse {
    /// Gas consumption.
    pub gas_usage: Option<UsageSection>,

    /// Electricity consumption and solar production.
    pub power_usage: Option<UsageSection>,

    /// Thermostat state.
    pub thermostat_info: Option<ThermostatInfo>,

    /// Configured thermostat presets.
    pub thermostat_states: Option<ThermostatStates>,

    /// Live state of switchable devices.
    pub device_status_info: Option<DeviceList<DeviceStatusEntry>>,

    /// Configuration of switchable devices.
    pub device_config_info: Option<DeviceList<DeviceConfigEntry>>,

    /// Smoke detectors.
    pub smoke_detectors: Option<DeviceList<SmokeDetector>>,
}

impl StatusResponse {
    /// Returns gas usage.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingField`] if `gasUsage` is absent.
    pub fn gas(&self) -> Result<Usage, ParseError> {
        section(self.gas_usage.as_ref(), "gasUsage").map(UsageSection::usage)
    }

    /// Returns electricity usage.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingField`] if `powerUsage` is absent.
    pub fn power(&self) -> Result<PowerUsage, ParseError> {
        section(self.power_usage.as_ref(), "powerUsage").map(UsageSection::power)
    }

    /// Returns solar production.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingField`] if `powerUsage` is absent.
    pub fn solar(&self) -> Result<Solar, ParseError> {
        section(self.power_usage.as_ref(), "powerUsage").map(UsageSection::solar)
    }

    /// Returns the thermostat section.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingField`] if `thermostatInfo` is absent.
    pub fn thermostat(&self) -> Result<&ThermostatInfo, ParseError> {
        section(self.thermostat_info.as_ref(), "thermostatInfo")
    }

    /// Returns the configured presets.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingField`] if `thermostatStates` is absent.
    pub fn presets(&self) -> Result<&ThermostatStates, ParseError> {
        section(self.thermostat_states.as_ref(), "thermostatStates")
    }

    /// Returns all switches, each joined with its configuration by name.
    ///
    /// An installation without switches has no `deviceStatusInfo`, which
    /// yields an empty list.
    #[must_use]
    pub fn switches(&self) -> Vec<SwitchRecord> {
        let status = devices(self.device_status_info.as_ref());
        let config = devices(self.device_config_info.as_ref());

        status
            .iter()
            .map(|entry| SwitchRecord {
                status: entry.clone(),
                config: config
                    .iter()
                    .find(|cfg| cfg.name.eq_ignore_ascii_case(&entry.name))
                    .cloned()
                    .unwrap_or_default(),
            })
            .collect()
    }

    /// Returns the switches that are lights.
    #[must_use]
    pub fn lights(&self) -> Vec<SwitchRecord> {
        self.switches()
            .into_iter()
            .filter(|record| record.status.is_light())
            .collect()
    }

    /// Returns the switches that are smart plugs.
    #[must_use]
    pub fn smart_plugs(&self) -> Vec<SwitchRecord> {
        self.switches()
            .into_iter()
            .filter(|record| record.status.is_smart_plug())
            .collect()
    }

    /// Returns the smoke detectors, empty if `smokeDetectors` is absent.
    #[must_use]
    pub fn smoke_detectors(&self) -> &[SmokeDetector] {
        devices(self.smoke_detectors.as_ref())
    }
}

fn devices<T>(list: Option<&DeviceList<T>>) -> &[T] {
    list.map_or(&[][..], |list| list.device.as_slice())
}

fn section<'a, T>(value: Option<&'a T>, field: &str) -> Result<&'a T, ParseError> {
    value.ok_or_else(|| ParseError::MissingField(field.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATUS: &str = r##"{
        "deviceStatusInfo": {"device": [
            {"name": "Living Lamp", "devUUID": "hue-1", "rgbColor": "#ff0000", "isConnected": 1, "currentState": 1},
            {"name": "Coffee", "devUUID": "plug-1", "networkHealthState": 5, "isConnected": 1, "currentState": 0},
            {"name": "Orphan", "devUUID": "x-1", "isConnected": 0}
        ]},
        "deviceConfigInfo": {"device": [
            {"name": "coffee", "devType": "FGWPF102", "switchLocked": 1, "usageCapable": 1},
            {"name": "Living Lamp", "devType": "HueLight", "switchLocked": 0}
        ]},
        "smokeDetectors": {"device": [
            {"devUuid": "s-1", "name": "Hallway", "connected": 1, "batteryLevel": 80}
        ]}
    }"##;

    #[test]
    fn join_switches_by_name() {
        let status: StatusResponse = serde_json::from_str(STATUS).unwrap();
        let switches = status.switches();

        assert_eq!(switches.len(), 3);
        assert_eq!(switches[1].config.dev_type.as_deref(), Some("FGWPF102"));
        assert!(switches[1].is_locked());
        assert_eq!(switches[2].config, DeviceConfigEntry::default());
    }

    #[test]
    fn filter_lights_and_plugs() {
        let status: StatusResponse = serde_json::from_str(STATUS).unwrap();

        let lights = status.lights();
        assert_eq!(lights.len(), 1);
        assert_eq!(lights[0].name(), "Living Lamp");

        let plugs = status.smart_plugs();
        assert_eq!(plugs.len(), 1);
        assert_eq!(plugs[0].dev_uuid(), Some("plug-1"));
    }

    #[test]
    fn smoke_detectors_listed() {
        let status: StatusResponse = serde_json::from_str(STATUS).unwrap();
        let detectors = status.smoke_detectors();
        assert_eq!(detectors[0].battery_level, Some(80));
    }

    #[test]
    fn missing_sections_are_reported() {
        let status = StatusResponse::default();

        assert!(matches!(status.gas(), Err(ParseError::MissingField(f)) if f == "gasUsage"));
        assert!(matches!(status.thermostat(), Err(ParseError::MissingField(f)) if f == "thermostatInfo"));
        assert!(matches!(status.presets(), Err(ParseError::MissingField(f)) if f == "thermostatStates"));
    }

    #[test]
    fn missing_device_sections_are_empty() {
        let status: StatusResponse = serde_json::from_str(r#"{"gasUsage": {"value": 1}}"#).unwrap();

        assert!(status.switches().is_empty());
        assert!(status.lights().is_empty());
        assert!(status.smart_plugs().is_empty());
        assert!(status.smoke_detectors().is_empty());
    }

    #[test]
    fn switches_without_config_section_are_unlocked() {
        let status: StatusResponse = serde_json::from_str(
            r##"{"deviceStatusInfo": {"device": [{"name": "Lamp", "rgbColor": "#fff", "isConnected": 1}]}}"##,
        )
        .unwrap();
        let lights = status.lights();

        assert_eq!(lights.len(), 1);
        assert!(!lights[0].is_locked());
    }

    #[test]
    fn null_device_name_does_not_spoil_the_document() {
        let status: StatusResponse = serde_json::from_str(
            r#"{"gasUsage": {"value": 3}, "smokeDetectors": {"device": [{"devUuid": "s-1", "name": null}]}}"#,
        )
        .unwrap();

        assert_eq!(status.gas().unwrap().value, Some(3.0));
        assert_eq!(status.smoke_detectors()[0].name, "");
    }
}
