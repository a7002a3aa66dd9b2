// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! OAuth credentials and token exchange payloads.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;

use crate::error::ProtocolError;

/// Access tokens are renewed this long before they actually expire.
const EXPIRY_MARGIN_SECS: i64 = 30;

/// An access token and the refresh token that renews it.
///
/// A `Token` is never mutated; renewal produces a new value that replaces
/// the old one as a whole.
#[derive(Clone)]
pub struct Token {
    access_token: String,
    refresh_token: String,
    expires_at: DateTime<Utc>,
    refresh_token_expires_at: Option<DateTime<Utc>>,
}

impl Token {
    /// Creates a token from its parts.
    #[must_use]
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            expires_at,
            refresh_token_expires_at: None,
        }
    }

    /// Returns the bearer access token.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Returns the refresh token.
    #[must_use]
    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    /// Returns when the access token expires.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns when the refresh token expires, if the API reported it.
    #[must_use]
    pub fn refresh_token_expires_at(&self) -> Option<DateTime<Utc>> {
        self.refresh_token_expires_at
    }

    /// Returns true when the access token is expired, or about to be, at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now + TimeDelta::seconds(EXPIRY_MARGIN_SECS) >= self.expires_at
    }

    /// Returns true when the access token is expired, or about to be.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .field("refresh_token_expires_at", &self.refresh_token_expires_at)
            .finish()
    }
}

/// Body of a successful `/token` response.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    refresh_token_expires_in: Option<i64>,
}

impl TokenResponse {
    /// Converts the response into a [`Token`] issued at `now`.
    ///
    /// All of the access token, refresh token and expiry must be present and
    /// non-empty.
    pub(crate) fn into_token(self, now: DateTime<Utc>) -> Result<Token, ProtocolError> {
        let (Some(access_token), Some(refresh_token), Some(expires_in)) =
            (self.access_token, self.refresh_token, self.expires_in)
        else {
            return Err(ProtocolError::AuthenticationFailed(
                "token response is incomplete".to_string(),
            ));
        };
        if access_token.is_empty() || refresh_token.is_empty() || expires_in <= 0 {
            return Err(ProtocolError::AuthenticationFailed(
                "token response is incomplete".to_string(),
            ));
        }

        Ok(Token {
            access_token,
            refresh_token,
            expires_at: now + TimeDelta::seconds(expires_in),
            refresh_token_expires_at: self
                .refresh_token_expires_in
                .filter(|secs| *secs > 0)
                .map(|secs| now + TimeDelta::seconds(secs)),
        })
    }
}

/// OAuth client credentials sent alongside token exchanges.
#[derive(Clone)]
pub struct ClientCredentials {
    /// OAuth client id (consumer key).
    pub client_id: String,
    /// OAuth client secret (consumer secret).
    pub client_secret: String,
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Builds the form body of a refresh-token grant.
pub(crate) fn refresh_grant<'a>(
    refresh_token: &'a str,
    client: Option<&'a ClientCredentials>,
) -> Vec<(&'static str, &'a str)> {
    let mut form = vec![
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
    ];
    if let Some(client) = client {
        form.push(("client_id", client.client_id.as_str()));
        form.push(("client_secret", client.client_secret.as_str()));
    }
    form
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> TokenResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn token_response_into_token() {
        let now = Utc::now();
        let token = response(
            r#"{"access_token":"a1","refresh_token":"r1","expires_in":1800,"refresh_token_expires_in":86400}"#,
        )
        .into_token(now)
        .unwrap();

        assert_eq!(token.access_token(), "a1");
        assert_eq!(token.refresh_token(), "r1");
        assert_eq!(token.expires_at(), now + TimeDelta::seconds(1800));
        assert_eq!(
            token.refresh_token_expires_at(),
            Some(now + TimeDelta::seconds(86400))
        );
    }

    #[test]
    fn incomplete_token_response_is_rejected() {
        let now = Utc::now();
        let missing = response(r#"{"access_token":"a1","expires_in":1800}"#).into_token(now);
        let empty =
            response(r#"{"access_token":"","refresh_token":"r1","expires_in":1800}"#).into_token(now);

        assert!(matches!(missing, Err(ProtocolError::AuthenticationFailed(_))));
        assert!(matches!(empty, Err(ProtocolError::AuthenticationFailed(_))));
    }

    #[test]
    fn expiry_includes_margin() {
        let now = Utc::now();
        let token = Token::new("a", "r", now + TimeDelta::seconds(20));
        assert!(token.is_expired_at(now));

        let token = Token::new("a", "r", now + TimeDelta::seconds(3600));
        assert!(!token.is_expired_at(now));
        assert!(token.is_expired_at(now + TimeDelta::seconds(3600)));
    }

    #[test]
    fn debug_redacts_secrets() {
        let token = Token::new("secret-access", "secret-refresh", Utc::now());
        let rendered = format!("{token:?}");
        assert!(!rendered.contains("secret-access"));
        assert!(!rendered.contains("secret-refresh"));
    }

    #[test]
    fn refresh_grant_with_client_credentials() {
        let client = ClientCredentials {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
        };
        let form = refresh_grant("r0", Some(&client));
        assert!(form.contains(&("grant_type", "refresh_token")));
        assert!(form.contains(&("refresh_token", "r0")));
        assert!(form.contains(&("client_id", "id")));
        assert!(form.contains(&("client_secret", "secret")));

        assert_eq!(refresh_grant("r0", None).len(), 2);
    }
}
