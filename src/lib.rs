// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `toon_lib` - A Rust client for the Toon thermostat and energy display.
//!
//! This library provides async APIs to read and control a Toon installation
//! through the vendor's cloud API.
//!
//! # Supported Features
//!
//! - **Usage**: gas, electricity and solar readings
//! - **Thermostat**: presets by name, manual set points, program on/off,
//!   burner state
//! - **Accessories**: lights and smart plugs (on/off/toggle), smoke detectors
//! - **History**: electricity, gas and district heating flows and graphs
//!
//! # Caching and Authentication
//!
//! Reads are served from one status document that is fetched on first use
//! and kept for a staleness window (30 seconds by default). Writes clear it.
//!
//! The client is created from a long-lived refresh token. Access tokens are
//! renewed before they expire, and a request rejected with `401` is retried
//! once after renewing.
//!
//! # Quick Start
//!
//! ```no_run
//! use toon_lib::Toon;
//! use toon_lib::device::Switchable;
//!
//! #[tokio::main]
//! async fn main() -> toon_lib::Result<()> {
//!     let toon = Toon::builder("refresh-token").build().await?;
//!
//!     println!("Room: {:.1} °C", toon.temperature().await?);
//!     println!("Gas today: {:?}", toon.gas().await?.daily_usage);
//!
//!     // Case-insensitive preset names
//!     toon.set_thermostat_state("Comfort").await?;
//!
//!     for light in toon.lights().await? {
//!         if light.can_toggle() {
//!             light.turn_on().await?;
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Program Guard
//!
//! A manual set point written while the thermostat program runs is
//! overwritten at the program's next switch. By default the write also puts
//! the program in temporary override. With
//! [`ProgramGuard::RejectWhileActive`] the write is refused instead:
//!
//! ```no_run
//! use toon_lib::{DeviceError, Error, ProgramGuard, Toon};
//!
//! # async fn example() -> toon_lib::Result<()> {
//! let toon = Toon::builder("refresh-token")
//!     .with_program_guard(ProgramGuard::RejectWhileActive)
//!     .build()
//!     .await?;
//!
//! match toon.set_thermostat(19.0).await {
//!     Err(Error::Device(DeviceError::ProgramActive)) => println!("program is running"),
//!     other => other?,
//! }
//! # Ok(())
//! # }
//! ```

mod client;
pub mod consumption;
pub mod device;
pub mod error;
pub mod protocol;
pub mod response;
pub mod state;
pub mod types;

pub use client::{Toon, ToonBuilder};
pub use consumption::Consumption;
pub use device::{Light, SmartPlug, Switchable};
pub use error::{DeviceError, Error, ErrorKind, ParseError, ProtocolError, Result, ValueError};
pub use protocol::{ApiConfig, Token};
pub use response::{Agreement, SmokeDetector, StatusResponse, ThermostatInfo, ThermostatPreset};
pub use types::{
    BurnerState, Interval, ProgramGuard, ProgramState, SwitchState, Temperature, ThermostatState,
};
