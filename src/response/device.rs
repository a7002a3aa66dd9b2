// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessory device parsing: switches (lights, smart plugs) and smoke
//! detectors.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::de;

/// A `{"device": [...]}` wrapper used by several status sections.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct DeviceList<T> {
    /// The devices in API order.
    #[serde(default)]
    pub device: Vec<T>,
}

impl<T> Default for DeviceList<T> {
    fn default() -> Self {
        Self { device: Vec::new() }
    }
}

/// Live state of a switchable device (`deviceStatusInfo.device[]`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceStatusEntry {
    /// Device name as shown on the display.
    #[serde(deserialize_with = "de::string")]
    pub name: String,

    /// Stable device identifier.
    #[serde(rename = "devUUID")]
    pub dev_uuid: Option<String>,

    /// Whether the device is reachable.
    #[serde(deserialize_with = "de::flag")]
    pub is_connected: Option<bool>,

    /// Switch state, `1` for on.
    #[serde(deserialize_with = "de::integer")]
    pub current_state: Option<i64>,

    /// Light color; only lights report it.
    pub rgb_color: Option<Value>,

    /// Z-Wave network health; only smart plugs report it.
    #[serde(deserialize_with = "de::integer")]
    pub network_health_state: Option<i64>,

    /// Average power usage.
    #[serde(deserialize_with = "de::float")]
    pub avg_usage: Option<f64>,

    /// Current power usage.
    #[serde(deserialize_with = "de::float")]
    pub current_usage: Option<f64>,

    /// Today's power usage.
    #[serde(deserialize_with = "de::float")]
    pub day_usage: Option<f64>,
}

impl DeviceStatusEntry {
    /// Returns true for entries that describe a light.
    #[must_use]
    pub fn is_light(&self) -> bool {
        is_truthy(self.rgb_color.as_ref())
    }

    /// Returns true for entries that describe a smart plug.
    #[must_use]
    pub fn is_smart_plug(&self) -> bool {
        self.network_health_state.is_some_and(|health| health != 0)
    }
}

/// Configuration of a switchable device (`deviceConfigInfo.device[]`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceConfigEntry {
    /// Device name as shown on the display.
    #[serde(deserialize_with = "de::string")]
    pub name: String,

    /// Device type, e.g. `"HueLight"` or `"FGWPF102"`.
    pub dev_type: Option<String>,

    /// Whether the device follows the "switch all" action.
    #[serde(deserialize_with = "de::flag")]
    pub in_switch_all: Option<bool>,

    /// Whether the device follows a switch schedule.
    #[serde(deserialize_with = "de::flag")]
    pub in_switch_schedule: Option<bool>,

    /// Z-Wave node position.
    #[serde(deserialize_with = "de::integer")]
    pub position: Option<i64>,

    /// Whether the switch is locked against changes.
    #[serde(deserialize_with = "de::flag")]
    pub switch_locked: Option<bool>,

    /// Z-Wave identifier.
    pub zw_uuid: Option<String>,

    /// Whether the device reports power usage.
    #[serde(deserialize_with = "de::flag")]
    pub usage_capable: Option<bool>,

    /// Identifier of the quantity graph.
    pub quantity_graph_uuid: Option<String>,

    /// Identifier of the flow graph.
    pub flow_graph_uuid: Option<String>,
}

/// A smoke detector (`smokeDetectors.device[]`).
///
/// # Examples
///
/// ```
/// use toon_lib::response::SmokeDetector;
///
/// let json = r#"{
///     "devUuid": "smoke-1",
///     "name": "Hallway",
///     "lastConnectedChange": 1700000000,
///     "connected": true,
///     "batteryLevel": 95,
///     "type": "smokeDetector"
/// }"#;
/// let detector: SmokeDetector = serde_json::from_str(json).unwrap();
/// assert_eq!(detector.battery_level, Some(95));
/// assert!(detector.last_connected_change().is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SmokeDetector {
    /// Stable device identifier.
    pub dev_uuid: Option<String>,

    /// Detector name.
    #[serde(deserialize_with = "de::string")]
    pub name: String,

    /// Unix time of the last connection change.
    #[serde(rename = "lastConnectedChange", deserialize_with = "de::integer")]
    pub last_connected_change_epoch: Option<i64>,

    /// Whether the detector is reachable.
    #[serde(deserialize_with = "de::flag")]
    pub connected: Option<bool>,

    /// Battery level in percent.
    #[serde(deserialize_with = "de::integer")]
    pub battery_level: Option<i64>,

    /// Device type.
    #[serde(rename = "type")]
    pub device_type: Option<String>,
}

impl SmokeDetector {
    /// Returns the last connection change as a timestamp.
    #[must_use]
    pub fn last_connected_change(&self) -> Option<DateTime<Utc>> {
        self.last_connected_change_epoch
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// Returns true when the detector is reachable.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected.unwrap_or(false)
    }
}

/// A switch's live state joined with its configuration by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SwitchRecord {
    /// Entry from `deviceStatusInfo`.
    pub status: DeviceStatusEntry,
    /// Matching entry from `deviceConfigInfo`; empty if the API sent none.
    pub config: DeviceConfigEntry,
}

impl SwitchRecord {
    /// Returns the device name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.status.name
    }

    /// Returns the device identifier used in write paths.
    #[must_use]
    pub fn dev_uuid(&self) -> Option<&str> {
        self.status.dev_uuid.as_deref()
    }

    /// Returns true when the device is reachable.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.status.is_connected.unwrap_or(false)
    }

    /// Returns true when the switch is locked against changes.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.config.switch_locked.unwrap_or(false)
    }

    /// Returns true when the switch is on.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.status.current_state == Some(1)
    }

    /// Returns true when the switch can be written: connected and unlocked.
    #[must_use]
    pub fn can_toggle(&self) -> bool {
        self.is_connected() && !self.is_locked()
    }

    /// Returns true when the name matches, ignoring case.
    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        self.status.name.eq_ignore_ascii_case(name)
    }
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}
