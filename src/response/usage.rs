// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Gas, electricity and solar usage parsing.

use serde::Deserialize;

use super::de;

/// A `gasUsage` or `powerUsage` section of the status document.
///
/// Both sections share the consumption fields; `powerUsage` additionally
/// carries low-tariff and solar production fields. Use [`usage`](Self::usage),
/// [`power`](Self::power) or [`solar`](Self::solar) for typed views.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UsageSection {
    #[serde(deserialize_with = "de::float")]
    avg_day_value: Option<f64>,
    #[serde(deserialize_with = "de::float")]
    avg_value: Option<f64>,
    #[serde(deserialize_with = "de::float")]
    day_cost: Option<f64>,
    #[serde(deserialize_with = "de::float")]
    day_usage: Option<f64>,
    #[serde(deserialize_with = "de::flag")]
    is_smart: Option<bool>,
    #[serde(deserialize_with = "de::float")]
    meter_reading: Option<f64>,
    #[serde(deserialize_with = "de::float")]
    value: Option<f64>,
    #[serde(deserialize_with = "de::float")]
    meter_reading_low: Option<f64>,
    #[serde(deserialize_with = "de::float")]
    day_low_usage: Option<f64>,
    #[serde(deserialize_with = "de::float")]
    max_solar: Option<f64>,
    #[serde(deserialize_with = "de::float")]
    value_produced: Option<f64>,
    #[serde(deserialize_with = "de::float")]
    value_solar: Option<f64>,
    #[serde(deserialize_with = "de::float")]
    avg_produ_value: Option<f64>,
    #[serde(deserialize_with = "de::float")]
    meter_reading_low_produ: Option<f64>,
    #[serde(deserialize_with = "de::float")]
    meter_reading_produ: Option<f64>,
    #[serde(deserialize_with = "de::float")]
    day_cost_produced: Option<f64>,
}

impl UsageSection {
    /// Returns the consumption fields.
    #[must_use]
    pub fn usage(&self) -> Usage {
        Usage {
            average_daily: self.avg_day_value,
            average: self.avg_value,
            daily_cost: self.day_cost,
            daily_usage: self.day_usage,
            is_smart: self.is_smart.unwrap_or(false),
            meter_reading: self.meter_reading,
            value: self.value,
        }
    }

    /// Returns the consumption fields plus the low-tariff readings.
    #[must_use]
    pub fn power(&self) -> PowerUsage {
        PowerUsage {
            usage: self.usage(),
            meter_reading_low: self.meter_reading_low,
            daily_usage_low: self.day_low_usage,
        }
    }

    /// Returns the solar production fields.
    #[must_use]
    pub fn solar(&self) -> Solar {
        Solar {
            maximum: self.max_solar,
            produced: self.value_produced,
            value: self.value_solar,
            average_produced: self.avg_produ_value,
            meter_reading_low_produced: self.meter_reading_low_produ,
            meter_reading_produced: self.meter_reading_produ,
            daily_cost_produced: self.day_cost_produced,
        }
    }
}

/// Gas or electricity consumption.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Usage {
    /// Average daily consumption.
    pub average_daily: Option<f64>,
    /// Average consumption.
    pub average: Option<f64>,
    /// Cost of today's consumption.
    pub daily_cost: Option<f64>,
    /// Today's consumption.
    pub daily_usage: Option<f64>,
    /// Whether the reading comes from a smart meter.
    pub is_smart: bool,
    /// Cumulative meter reading.
    pub meter_reading: Option<f64>,
    /// Current consumption.
    pub value: Option<f64>,
}

/// Electricity consumption including low-tariff readings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerUsage {
    /// Fields shared with gas usage.
    pub usage: Usage,
    /// Cumulative low-tariff meter reading.
    pub meter_reading_low: Option<f64>,
    /// Today's low-tariff consumption.
    pub daily_usage_low: Option<f64>,
}

/// Solar production.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solar {
    /// Peak production.
    pub maximum: Option<f64>,
    /// Current production delivered back to the grid.
    pub produced: Option<f64>,
    /// Current production of the panels.
    pub value: Option<f64>,
    /// Average production.
    pub average_produced: Option<f64>,
    /// Cumulative low-tariff production meter reading.
    pub meter_reading_low_produced: Option<f64>,
    /// Cumulative production meter reading.
    pub meter_reading_produced: Option<f64>,
    /// Value of today's production.
    pub daily_cost_produced: Option<f64>,
}
