// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Consumption history over a time window.
//!
//! Flows are fine-grained readings sent without an interval; graphs are
//! aggregated per [`Interval`].
//! The API returns round-robin database series whose shape differs per
//! endpoint, so results are handed out as raw JSON.
//!
//! ```no_run
//! use chrono::{Duration, Utc};
//! use toon_lib::{Interval, Toon};
//!
//! # async fn example() -> toon_lib::Result<()> {
//! let toon = Toon::builder("refresh-token").build().await?;
//! let to = Utc::now();
//! let from = to - Duration::days(7);
//!
//! let gas = toon.consumption().gas_graph(from, to, Interval::Days).await?;
//! println!("{gas}");
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::client::session::Session;
use crate::error::{Result, ValueError};
use crate::types::Interval;

/// Query parameters of a time window request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
struct TimeWindow {
    from_time: i64,
    to_time: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    interval: Option<&'static str>,
}

impl TimeWindow {
    fn new(from: DateTime<Utc>, to: DateTime<Utc>, interval: Option<Interval>) -> Result<Self> {
        if from > to {
            return Err(ValueError::InvalidTimeWindow.into());
        }
        Ok(Self {
            from_time: from.timestamp_millis(),
            to_time: to.timestamp_millis(),
            interval: interval.as_ref().map(Interval::as_str),
        })
    }
}

/// Consumption endpoints of the active agreement.
///
/// Obtained from [`Toon::consumption`](crate::Toon::consumption).
#[derive(Debug, Clone)]
pub struct Consumption {
    session: Arc<Session>,
}

impl Consumption {
    pub(crate) fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// Returns the electricity flow between `from` and `to`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidTimeWindow`] if `from` is after `to`, or
    /// error if the request fails.
    pub async fn power_flow(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Value> {
        self.fetch("consumption/electricity/flows", from, to, None)
            .await
    }

    /// Returns the gas flow between `from` and `to`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidTimeWindow`] if `from` is after `to`, or
    /// error if the request fails.
    pub async fn gas_flow(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Value> {
        self.fetch("consumption/gas/flows", from, to, None).await
    }

    /// Returns the electricity graph between `from` and `to`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidTimeWindow`] if `from` is after `to`, or
    /// error if the request fails.
    pub async fn power_graph(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        interval: Interval,
    ) -> Result<Value> {
        self.fetch("consumption/electricity/data", from, to, Some(interval))
            .await
    }

    /// Returns the gas graph between `from` and `to`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidTimeWindow`] if `from` is after `to`, or
    /// error if the request fails.
    pub async fn gas_graph(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        interval: Interval,
    ) -> Result<Value> {
        self.fetch("consumption/gas/data", from, to, Some(interval))
            .await
    }

    /// Returns the district heating graph between `from` and `to`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidTimeWindow`] if `from` is after `to`, or
    /// error if the request fails.
    pub async fn district_heat_graph(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        interval: Interval,
    ) -> Result<Value> {
        self.fetch("consumption/districtheat/data", from, to, Some(interval))
            .await
    }

    async fn fetch(
        &self,
        endpoint: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        interval: Option<Interval>,
    ) -> Result<Value> {
        let window = TimeWindow::new(from, to, interval)?;
        tracing::debug!(endpoint, ?window, "Retrieving consumption window");
        self.session.get_json(endpoint, &window).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn window_in_milliseconds() {
        let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let window = TimeWindow::new(from, to, Some(Interval::Days)).unwrap();

        assert_eq!(window.from_time, 1_704_067_200_000);
        assert_eq!(window.to_time - window.from_time, 86_400_000);
        assert_eq!(
            serde_json::to_value(window).unwrap(),
            serde_json::json!({"fromTime": 1_704_067_200_000_i64, "toTime": 1_704_153_600_000_i64, "interval": "days"})
        );
    }

    #[test]
    fn reversed_window_is_rejected() {
        let from = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let err = TimeWindow::new(from, to, Some(Interval::Hours)).unwrap_err();

        assert!(matches!(
            err,
            crate::Error::Value(ValueError::InvalidTimeWindow)
        ));
    }

    #[test]
    fn empty_window_is_allowed() {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        assert!(TimeWindow::new(at, at, None).is_ok());
    }

    #[test]
    fn flow_window_has_no_interval() {
        let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap();
        let window = TimeWindow::new(from, to, None).unwrap();

        let query = serde_json::to_value(window).unwrap();
        assert!(query.get("interval").is_none());
        assert_eq!(query["toTime"], 1_704_088_800_000_i64);
    }
}
