// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lenient field deserializers.
//!
//! The API is inconsistent about scalar encodings: flags arrive as `0`/`1`,
//! `true`/`false` or `"0"`/`"1"`, and some counters arrive as strings.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserializes an optional flag from a bool, number or string.
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::Bool(b) => Some(b),
        Value::Number(n) => n.as_f64().map(|n| n != 0.0),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "" => None,
            "0" | "false" | "no" | "off" => Some(false),
            _ => Some(true),
        },
        _ => None,
    }))
}

/// Deserializes an optional integer from a number or numeric string.
pub(crate) fn integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(round_to_i64)),
        Value::String(s) => s.trim().parse::<f64>().ok().map(round_to_i64),
        Value::Bool(b) => Some(i64::from(b)),
        _ => None,
    }))
}

/// Deserializes an optional float from a number or numeric string.
pub(crate) fn float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

/// Deserializes a string, reading `null` as empty.
pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[allow(clippy::cast_possible_truncation)]
fn round_to_i64(value: f64) -> i64 {
    value.round() as i64
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "super::flag")]
        flag: Option<bool>,
        #[serde(default, deserialize_with = "super::integer")]
        integer: Option<i64>,
        #[serde(default, deserialize_with = "super::float")]
        float: Option<f64>,
        #[serde(default, deserialize_with = "super::string")]
        string: String,
    }

    fn sample(json: &str) -> Sample {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn flags_from_any_encoding() {
        assert_eq!(sample(r#"{"flag": 1}"#).flag, Some(true));
        assert_eq!(sample(r#"{"flag": 0}"#).flag, Some(false));
        assert_eq!(sample(r#"{"flag": "1"}"#).flag, Some(true));
        assert_eq!(sample(r#"{"flag": false}"#).flag, Some(false));
        assert_eq!(sample(r#"{"flag": null}"#).flag, None);
        assert_eq!(sample("{}").flag, None);
    }

    #[test]
    fn integers_from_strings() {
        assert_eq!(sample(r#"{"integer": "2"}"#).integer, Some(2));
        assert_eq!(sample(r#"{"integer": 1950}"#).integer, Some(1950));
        assert_eq!(sample(r#"{"integer": "n/a"}"#).integer, None);
    }

    #[test]
    fn floats_from_strings() {
        assert_eq!(sample(r#"{"float": "1.5"}"#).float, Some(1.5));
        assert_eq!(sample(r#"{"float": 3}"#).float, Some(3.0));
    }

    #[test]
    fn null_string_is_empty() {
        assert_eq!(sample(r#"{"string": null}"#).string, "");
        assert_eq!(sample("{}").string, "");
        assert_eq!(sample(r#"{"string": "Hallway"}"#).string, "Hallway");
    }
}
