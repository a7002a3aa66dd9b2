// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Switchable accessories: lights and smart plugs.
//!
//! Handles are obtained from [`Toon`](crate::Toon) and carry the device
//! record as it was when the handle was created. Control operations look the
//! device up again in the current status before writing, and refuse to write
//! when the device is disconnected or locked:
//!
//! ```no_run
//! use toon_lib::Toon;
//! use toon_lib::device::Switchable;
//!
//! # async fn example() -> toon_lib::Result<()> {
//! let toon = Toon::builder("refresh-token").build().await?;
//!
//! let plug = toon.smart_plug_by_name("coffee machine").await?;
//! if plug.can_toggle() {
//!     plug.turn_off().await?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Every successful write clears the client's status cache.

mod light;
mod smart_plug;

pub use light::Light;
pub use smart_plug::SmartPlug;

use std::sync::Arc;

use serde_json::Value;

use crate::client::session::{Session, SwitchKind};
use crate::error::{DeviceError, ParseError, Result};
use crate::response::SwitchRecord;
use crate::types::SwitchState;

/// Common behavior of lights and smart plugs.
///
/// The getters read the record captured when the handle was created.
#[allow(async_fn_in_trait)]
pub trait Switchable {
    /// Returns the record captured when the handle was created.
    fn record(&self) -> &SwitchRecord;

    /// Sets the switch state.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::NotConnected`] or [`DeviceError::Locked`]
    /// without writing when the device cannot be switched, or a protocol
    /// error if the write fails.
    async fn set_state(&self, state: SwitchState) -> Result<()>;

    /// Inverts the current switch state as reported by the latest status.
    ///
    /// # Errors
    ///
    /// See [`set_state`](Self::set_state).
    async fn toggle(&self) -> Result<()>;

    /// Turns the device on.
    ///
    /// # Errors
    ///
    /// See [`set_state`](Self::set_state).
    async fn turn_on(&self) -> Result<()> {
        self.set_state(SwitchState::On).await
    }

    /// Turns the device off.
    ///
    /// # Errors
    ///
    /// See [`set_state`](Self::set_state).
    async fn turn_off(&self) -> Result<()> {
        self.set_state(SwitchState::Off).await
    }

    /// Returns the device name.
    fn name(&self) -> &str {
        self.record().name()
    }

    /// Returns the device identifier.
    fn device_uuid(&self) -> Option<&str> {
        self.record().dev_uuid()
    }

    /// Returns true when the device is reachable.
    fn is_connected(&self) -> bool {
        self.record().is_connected()
    }

    /// Returns the switch state.
    fn current_state(&self) -> SwitchState {
        SwitchState::from(self.record().is_on())
    }

    /// Returns the device type.
    fn device_type(&self) -> Option<&str> {
        self.record().config.dev_type.as_deref()
    }

    /// Returns true when the device follows the "switch all" action.
    fn in_switch_all_group(&self) -> bool {
        self.record().config.in_switch_all.unwrap_or(false)
    }

    /// Returns true when the device follows a switch schedule.
    fn in_switch_schedule(&self) -> bool {
        self.record().config.in_switch_schedule.unwrap_or(false)
    }

    /// Returns the Z-Wave node position.
    fn zwave_index(&self) -> Option<i64> {
        self.record().config.position
    }

    /// Returns the Z-Wave identifier.
    fn zwave_uuid(&self) -> Option<&str> {
        self.record().config.zw_uuid.as_deref()
    }

    /// Returns true when the switch is locked.
    fn is_locked(&self) -> bool {
        self.record().is_locked()
    }

    /// Returns true when the device is connected and unlocked.
    fn can_toggle(&self) -> bool {
        self.record().can_toggle()
    }
}

/// Requested change of a switch.
#[derive(Debug, Clone, Copy)]
enum Target {
    Set(SwitchState),
    Toggle,
}

/// Write path shared by [`Light`] and [`SmartPlug`].
#[derive(Debug, Clone)]
struct Switch {
    session: Arc<Session>,
    kind: SwitchKind,
    record: SwitchRecord,
}

impl Switch {
    fn new(session: Arc<Session>, kind: SwitchKind, record: SwitchRecord) -> Self {
        Self {
            session,
            kind,
            record,
        }
    }

    async fn apply(&self, target: Target) -> Result<()> {
        let current = self.session.switch(self.kind, self.record.name()).await?;
        let name = current.name();

        if !current.is_connected() {
            tracing::warn!(device = name, "Device is not connected, cannot change state");
            return Err(DeviceError::NotConnected(name.to_string()).into());
        }
        if current.is_locked() {
            tracing::warn!(device = name, "Device is locked, cannot change state");
            return Err(DeviceError::Locked(name.to_string()).into());
        }

        let state = match target {
            Target::Set(state) => state,
            Target::Toggle => SwitchState::from(current.is_on()).toggled(),
        };
        let uuid = current
            .dev_uuid()
            .ok_or_else(|| ParseError::MissingField("devUUID".to_string()))?;
        let path = self
            .session
            .path(&format!("devices/{}", urlencoding::encode(uuid)));

        let mut device = self.session.get_object(&path).await?;
        device.insert("currentState".to_string(), Value::from(state.as_num()));

        tracing::debug!(device = name, state = %state, "Changing device state");
        self.session.put_object(&path, &device).await
    }
}
