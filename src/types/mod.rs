// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for reading and controlling a Toon.
//!
//! Each type either validates its value at construction time or maps the
//! numeric codes of the API onto named variants.
//!
//! # Types
//!
//! - [`ThermostatState`] - Comfort/Home/Sleep/Away presets
//! - [`ProgramState`] - Weekly program off/on/override
//! - [`BurnerState`] - What the boiler burner is doing
//! - [`ProgramGuard`] - How manual set points treat a running program
//! - [`Temperature`] - Set point in degrees Celsius (6-30)
//! - [`Interval`] - Bucket size of consumption graphs
//! - [`SwitchState`] - On/Off state of lights and plugs

mod interval;
mod switch;
mod temperature;
mod thermostat;

pub use interval::Interval;
pub use switch::SwitchState;
pub use temperature::Temperature;
pub use thermostat::{BurnerState, ProgramGuard, ProgramState, ThermostatState};
