// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Smart plug handle.

use std::sync::Arc;

use super::{Switch, Switchable, Target};
use crate::client::session::{Session, SwitchKind};
use crate::error::Result;
use crate::response::SwitchRecord;
use crate::types::SwitchState;

/// A Z-Wave smart plug.
///
/// Usage getters return `0.0` for plugs that cannot measure power.
#[derive(Debug, Clone)]
pub struct SmartPlug {
    switch: Switch,
}

impl SmartPlug {
    pub(crate) fn new(session: Arc<Session>, record: SwitchRecord) -> Self {
        Self {
            switch: Switch::new(session, SwitchKind::SmartPlug, record),
        }
    }

    /// Returns true when the plug measures power usage.
    #[must_use]
    pub fn usage_capable(&self) -> bool {
        self.switch.record.config.usage_capable.unwrap_or(false)
    }

    /// Returns the average power usage.
    #[must_use]
    pub fn average_usage(&self) -> f64 {
        self.usage(self.switch.record.status.avg_usage)
    }

    /// Returns the current power usage.
    #[must_use]
    pub fn current_usage(&self) -> f64 {
        self.usage(self.switch.record.status.current_usage)
    }

    /// Returns today's power usage.
    #[must_use]
    pub fn daily_usage(&self) -> f64 {
        self.usage(self.switch.record.status.day_usage)
    }

    /// Returns the Z-Wave network health.
    #[must_use]
    pub fn network_health_state(&self) -> Option<i64> {
        self.switch.record.status.network_health_state
    }

    /// Returns the identifier of the quantity graph.
    #[must_use]
    pub fn quantity_graph_uuid(&self) -> Option<&str> {
        self.switch.record.config.quantity_graph_uuid.as_deref()
    }

    /// Returns the identifier of the flow graph.
    #[must_use]
    pub fn flow_graph_uuid(&self) -> Option<&str> {
        self.switch.record.config.flow_graph_uuid.as_deref()
    }

    fn usage(&self, value: Option<f64>) -> f64 {
        if self.usage_capable() {
            value.unwrap_or(0.0)
        } else {
            0.0
        }
    }
}

impl Switchable for SmartPlug {
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
