// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response parsing for Toon API JSON documents.
//!
//! The status document is the main source of data: usage, thermostat and
//! accessory devices are all sections of [`StatusResponse`]. The API encodes
//! flags and counters inconsistently, so numeric fields are parsed leniently
//! and surface as `Option`.

mod agreement;
mod de;
mod device;
mod status;
mod thermostat;
mod usage;

pub use agreement::Agreement;
pub use device::{DeviceConfigEntry, DeviceList, DeviceStatusEntry, SmokeDetector, SwitchRecord};
pub use status::StatusResponse;
pub use thermostat::{ThermostatInfo, ThermostatPreset, ThermostatStateRecord, ThermostatStates};
pub use usage::{PowerUsage, Solar, Usage, UsageSection};
