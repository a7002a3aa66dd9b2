// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Agreement list parsing.

use serde::Deserialize;

/// One installation bound to the account.
///
/// Every data endpoint is scoped to an agreement id.
///
/// # Examples
///
/// ```
/// use toon_lib::response::Agreement;
///
/// let json = r#"[{
///     "agreementId": "12345",
///     "agreementIdChecksum": "abc",
///     "heatingType": "GAS",
///     "displayCommonName": "eneco-001-123456",
///     "displayHardwareVersion": "qb2/ene/2.10.10",
///     "displaySoftwareVersion": "qb2/ene/5.39.5",
///     "isToonSolar": false,
///     "isToonly": false
/// }]"#;
/// let agreements: Vec<Agreement> = serde_json::from_str(json).unwrap();
/// assert_eq!(agreements[0].id, "12345");
/// assert!(!agreements[0].solar);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agreement {
    /// Agreement id used in API paths.
    #[serde(rename = "agreementId")]
    pub id: String,

    /// Checksum of the agreement id.
    #[serde(rename = "agreementIdChecksum", default)]
    pub checksum: Option<String>,

    /// Heating type, e.g. `"GAS"`.
    #[serde(default)]
    pub heating_type: Option<String>,

    /// Common name of the display.
    #[serde(default, deserialize_with = "super::de::string")]
    pub display_common_name: String,

    /// Hardware version of the display.
    #[serde(default)]
    pub display_hardware_version: Option<String>,

    /// Software version of the display.
    #[serde(default)]
    pub display_software_version: Option<String>,

    /// Whether the installation has solar panels.
    #[serde(rename = "isToonSolar", default)]
    pub solar: bool,

    /// Whether this is a "Toonly" (display-only) installation.
    #[serde(rename = "isToonly", default)]
    pub toonly: bool,
}

impl Agreement {
    /// Returns true if the display common name matches, ignoring case.
    #[must_use]
    pub fn matches_display_name(&self, name: &str) -> bool {
        self.display_common_name.eq_ignore_ascii_case(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_agreement() {
        let agreements: Vec<Agreement> =
            serde_json::from_str(r#"[{"agreementId": "1"}]"#).unwrap();
        assert_eq!(agreements[0].id, "1");
        assert_eq!(agreements[0].display_common_name, "");
        assert!(agreements[0].heating_type.is_none());
    }

    #[test]
    fn display_name_match_ignores_case() {
        let agreement: Agreement = serde_json::from_str(
            r#"{"agreementId": "1", "displayCommonName": "Eneco-001-ABC"}"#,
        )
        .unwrap();
        assert!(agreement.matches_display_name("eneco-001-abc"));
        assert!(!agreement.matches_display_name("eneco-002-abc"));
    }

    #[test]
    fn null_display_name_is_empty() {
        let agreement: Agreement =
            serde_json::from_str(r#"{"agreementId": "1", "displayCommonName": null}"#).unwrap();
        assert_eq!(agreement.display_common_name, "");
    }
}
