// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Aggregation interval of consumption graphs.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Bucket size of a consumption graph.
///
/// # Examples
///
/// ```
/// use toon_lib::types::Interval;
///
/// let interval: Interval = "Days".parse().unwrap();
/// assert_eq!(interval.as_str(), "days");
/// assert!("minutes".parse::<Interval>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Interval {
    /// One bucket per hour.
    #[default]
    Hours,
    /// One bucket per day.
    Days,
    /// One bucket per week.
    Weeks,
    /// One bucket per month.
    Months,
    /// One bucket per year.
    Years,
}

impl Interval {
    /// Returns the query parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hours => "hours",
            Self::Days => "days",
            Self::Weeks => "weeks",
            Self::Months => "months",
            Self::Years => "years",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hours" => Ok(Self::Hours),
            "days" => Ok(Self::Days),
            "weeks" => Ok(Self::Weeks),
            "months" => Ok(Self::Months),
            "years" => Ok(Self::Years),
            _ => Err(ValueError::InvalidInterval(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_intervals() {
        for interval in [
            Interval::Hours,
            Interval::Days,
            Interval::Weeks,
            Interval::Months,
            Interval::Years,
        ] {
            assert_eq!(interval.as_str().parse::<Interval>().unwrap(), interval);
            assert_eq!(
                interval.as_str().to_uppercase().parse::<Interval>().unwrap(),
                interval
            );
        }
    }

    #[test]
    fn rejects_unknown_interval() {
        assert_eq!(
            "fortnights".parse::<Interval>().unwrap_err(),
            ValueError::InvalidInterval("fortnights".to_string())
        );
    }
}
