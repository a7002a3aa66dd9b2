// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Communication with the Toon cloud API.
//!
//! - [`ApiConfig`]: base URL, timeouts, cache window and OAuth client
//! - [`ApiClient`]: bearer-authenticated requests with token renewal
//! - [`Token`]: the access/refresh token pair held by the client

mod auth;
mod http;

pub use auth::{ClientCredentials, Token};
pub use http::{ApiClient, ApiConfig};

use crate::error::{ParseError, ProtocolError};

/// Response from the cloud API.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: u16,
    body: String,
}

impl ApiResponse {
    /// Creates a new response with the given status and body.
    #[must_use]
    pub fn new(status: u16, body: String) -> Self {
        Self { status, body }
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns the raw response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns true for `202 Accepted`, which the API sends while it is still
    /// collecting data.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.status == 202
    }

    /// Parses the response body as a specific type.
    ///
    /// # Errors
    ///
    /// Returns error if the JSON cannot be parsed into the target type.
    pub fn parse<T: serde::de::DeserializeOwned>(&self) -> Result<T, ParseError> {
        serde_json::from_str(&self.body).map_err(Into::into)
    }

    pub(crate) fn ensure_success(self) -> Result<Self, ProtocolError> {
        if (200..300).contains(&self.status) {
            Ok(self)
        } else {
            Err(ProtocolError::UnexpectedStatus {
                status: self.status,
                body: self.body,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_body() {
        let response = ApiResponse::new(200, r#"{"value": 3}"#.to_string());
        let value: serde_json::Value = response.parse().unwrap();
        assert_eq!(value["value"], 3);
    }

    #[test]
    fn parse_invalid_body() {
        let response = ApiResponse::new(200, "<html>".to_string());
        let result: Result<serde_json::Value, _> = response.parse();
        assert!(matches!(result, Err(ParseError::Json(_))));
    }

    #[test]
    fn ensure_success_rejects_server_errors() {
        let response = ApiResponse::new(503, "down".to_string());
        let err = response.ensure_success().unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::UnexpectedStatus { status: 503, ref body } if body == "down"
        ));
    }

    #[test]
    fn accepted_is_success_but_flagged() {
        let response = ApiResponse::new(202, String::new()).ensure_success().unwrap();
        assert!(response.is_accepted());
    }
}
