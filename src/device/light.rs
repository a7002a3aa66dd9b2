// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light handle.

use std::sync::Arc;

use super::{Switch, Switchable, Target};
use crate::client::session::{Session, SwitchKind};
use crate::error::Result;
use crate::response::SwitchRecord;
use crate::types::SwitchState;

/// A light connected to the display, e.g. a Hue bulb.
#[derive(Debug, Clone)]
pub struct Light {
    switch: Switch,
}

impl Light {
    pub(crate) fn new(session: Arc<Session>, record: SwitchRecord) -> Self {
        Self {
            switch: Switch::new(session, SwitchKind::Light, record),
        }
    }

    /// Returns the light color as reported by the API, e.g. `"#ffc864"`.
    #[must_use]
    pub fn rgb_color(&self) -> Option<&str> {
        self.switch
            .record
            .status
            .rgb_color
            .as_ref()
            .and_then(serde_json::Value::as_str)
    }
}

impl Switchable for Light {
    fn record(&self) -> &SwitchRecord {
        &self.switch.record
    }

    async fn set_state(&self, state: SwitchState) -> Result<()> {
        self.switch.apply(Target::Set(state)).await
    }

    async fn toggle(&self) -> Result<()> {
        self.switch.apply(Target::Toggle).await
    }
}
