// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP client for the Toon cloud API.

use std::time::Duration;

use chrono::Utc;
use parking_lot::RwLock;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;

use crate::error::ProtocolError;
use crate::protocol::ApiResponse;
use crate::protocol::auth::{ClientCredentials, Token, TokenResponse, refresh_grant};

// ============================================================================
// ApiConfig - Connection parameters for the cloud API
// ============================================================================

/// Configuration for the Toon cloud API connection.
///
/// # Examples
///
/// ```
/// use toon_lib::protocol::ApiConfig;
/// use std::time::Duration;
///
/// let config = ApiConfig::new()
///     .with_base_url("https://api.toon.eu")
///     .with_timeout(Duration::from_secs(5))
///     .with_state_caching(Duration::from_secs(60))
///     .with_client_credentials("consumer-key", "consumer-secret");
///
/// assert_eq!(config.state_caching(), Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    base_url: String,
    timeout: Duration,
    state_caching: Duration,
    client: Option<ClientCredentials>,
}

impl ApiConfig {
    /// Default API base URL.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.toon.eu";
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(9);
    /// Default staleness window of the status snapshot.
    pub const DEFAULT_STATE_CACHING: Duration = Duration::from_secs(30);

    /// Creates a configuration with the default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
            state_caching: Self::DEFAULT_STATE_CACHING,
            client: None,
        }
    }

    /// Sets the API base URL. A trailing slash is ignored.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets how long a fetched status stays valid.
    #[must_use]
    pub fn with_state_caching(mut self, window: Duration) -> Self {
        self.state_caching = window;
        self
    }

    /// Sets OAuth client credentials sent with every token exchange.
    #[must_use]
    pub fn with_client_credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.client = Some(ClientCredentials {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        });
        self
    }

    /// Returns the API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the staleness window of the status snapshot.
    #[must_use]
    pub fn state_caching(&self) -> Duration {
        self.state_caching
    }

    /// Returns the OAuth client credentials if set.
    #[must_use]
    pub fn client_credentials(&self) -> Option<&ClientCredentials> {
        self.client.as_ref()
    }

    /// Creates an [`ApiClient`] that renews its access token with
    /// `refresh_token`.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is not an HTTP(S) URL or the HTTP client
    /// cannot be created.
    pub fn into_client(self, refresh_token: impl Into<String>) -> Result<ApiClient, ProtocolError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ProtocolError::InvalidAddress(self.base_url));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(ApiClient {
            base_url: self.base_url,
            client,
            oauth_client: self.client,
            credential: RwLock::new(Credential {
                refresh_token: refresh_token.into(),
                token: None,
            }),
            renewal: tokio::sync::Mutex::new(()),
        })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// ApiClient - Authenticated requests with one-shot re-authentication
// ============================================================================

/// Current credential of an [`ApiClient`].
#[derive(Debug)]
struct Credential {
    /// Refresh token used when no token has been issued yet.
    refresh_token: String,
    /// Token issued by the last successful exchange.
    token: Option<Token>,
}

impl Credential {
    fn refresh_token(&self) -> &str {
        self.token
            .as_ref()
            .map_or(self.refresh_token.as_str(), Token::refresh_token)
    }
}

/// Authenticated HTTP client for the Toon cloud API.
///
/// Every request carries the current bearer access token. A missing or
/// expired access token is renewed before the request is sent. When the API
/// answers `401 Unauthorized` the token is renewed once and the request is
/// retried once; a second rejection is reported as
/// [`ProtocolError::AuthenticationFailed`].
///
/// Renewals are serialized: callers that were rejected with the same token
/// wait for the first renewal and reuse its result.
#[derive(Debug)]
pub struct ApiClient {
    base_url: String,
    client: Client,
    oauth_client: Option<ClientCredentials>,
    credential: RwLock<Credential>,
    renewal: tokio::sync::Mutex<()>,
}

impl ApiClient {
    /// Returns the API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns a copy of the current token, if one has been issued.
    #[must_use]
    pub fn token(&self) -> Option<Token> {
        self.credential.read().token.clone()
    }

    /// Exchanges the refresh token for a new access token.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::AuthenticationFailed`] if the refresh token
    /// is rejected, or a network error if the token endpoint is unreachable.
    pub async fn authenticate(&self) -> Result<Token, ProtocolError> {
        let _renewal = self.renewal.lock().await;
        self.exchange_refresh_token().await
    }

    /// Sends a GET request to `path` with the given query parameters.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the API answers with a non-success
    /// status, or authentication fails after one renewal.
    pub async fn get<Q>(&self, path: &str, query: &Q) -> Result<ApiResponse, ProtocolError>
    where
        Q: Serialize + Sync + ?Sized,
    {
        let url = self.url(path);
        tracing::debug!(url = %url, "Sending GET request");
        self.send(|| self.client.get(&url).query(query)).await
    }

    /// Sends a PUT request with a JSON body to `path`.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the API answers with a non-success
    /// status, or authentication fails after one renewal.
    pub async fn put_json<B>(&self, path: &str, body: &B) -> Result<ApiResponse, ProtocolError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let url = self.url(path);
        tracing::debug!(url = %url, "Sending PUT request");
        self.send(|| self.client.put(&url).json(body)).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send<F>(&self, request: F) -> Result<ApiResponse, ProtocolError>
    where
        F: Fn() -> RequestBuilder,
    {
        let access_token = self.access_token().await?;
        let response = Self::execute(request(), &access_token).await?;

        if response.status() != StatusCode::UNAUTHORIZED.as_u16() {
            return response.ensure_success();
        }

        tracing::info!("Access token rejected, renewing and retrying once");
        let access_token = self.renew(&access_token).await?;
        let response = Self::execute(request(), &access_token).await?;

        if response.status() == StatusCode::UNAUTHORIZED.as_u16() {
            return Err(ProtocolError::AuthenticationFailed(
                "request rejected after renewing the access token".to_string(),
            ));
        }
        response.ensure_success()
    }

    async fn execute(
        request: RequestBuilder,
        access_token: &str,
    ) -> Result<ApiResponse, ProtocolError> {
        let response = request
            .bearer_auth(access_token)
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(ProtocolError::Http)?;

        tracing::debug!(status, body = %body, "Received HTTP response");

        Ok(ApiResponse::new(status, body))
    }

    /// Returns a valid access token, renewing it first if needed.
    async fn access_token(&self) -> Result<String, ProtocolError> {
        if let Some(access_token) = self.current_access_token(None) {
            return Ok(access_token);
        }

        let _renewal = self.renewal.lock().await;
        // Another caller may have renewed while we waited.
        if let Some(access_token) = self.current_access_token(None) {
            return Ok(access_token);
        }
        Ok(self.exchange_refresh_token().await?.access_token().to_string())
    }

    /// Renews the token that carried `rejected` and returns the new access
    /// token.
    async fn renew(&self, rejected: &str) -> Result<String, ProtocolError> {
        let _renewal = self.renewal.lock().await;
        if let Some(access_token) = self.current_access_token(Some(rejected)) {
            return Ok(access_token);
        }
        Ok(self.exchange_refresh_token().await?.access_token().to_string())
    }

    /// Returns the stored access token if it is unexpired and not `rejected`.
    fn current_access_token(&self, rejected: Option<&str>) -> Option<String> {
        let credential = self.credential.read();
        let token = credential.token.as_ref()?;
        if token.is_expired() || rejected == Some(token.access_token()) {
            return None;
        }
        Some(token.access_token().to_string())
    }

    /// Performs the token exchange. Callers hold the renewal lock.
    async fn exchange_refresh_token(&self) -> Result<Token, ProtocolError> {
        let refresh_token = self.credential.read().refresh_token().to_string();
        let url = self.url("token");

        tracing::debug!(url = %url, "Exchanging refresh token");

        let response = self
            .client
            .post(&url)
            .form(&refresh_grant(&refresh_token, self.oauth_client.as_ref()))
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        let status = response.status();
        let body = response.text().await.map_err(ProtocolError::Http)?;

        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            return Err(ProtocolError::AuthenticationFailed(format!(
                "refresh token rejected with HTTP {}",
                status.as_u16()
            )));
        }
        if !status.is_success() {
            return Err(ProtocolError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let token = serde_json::from_str::<TokenResponse>(&body)
            .map_err(|err| {
                ProtocolError::AuthenticationFailed(format!("unreadable token response: {err}"))
            })?
            .into_token(Utc::now())?;

        tracing::info!(expires_at = %token.expires_at(), "Access token renewed");

        self.credential.write().token = Some(token.clone());
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_config_default_values() {
        let config = ApiConfig::new();
        assert_eq!(config.base_url(), "https://api.toon.eu");
        assert_eq!(config.timeout(), Duration::from_secs(9));
        assert_eq!(config.state_caching(), Duration::from_secs(30));
        assert!(config.client_credentials().is_none());
    }

    #[test]
    fn api_config_trims_trailing_slash() {
        let config = ApiConfig::new().with_base_url("http://localhost:8080/");
        assert_eq!(config.base_url(), "http://localhost:8080");
    }

    #[test]
    fn api_config_builder_chain() {
        let config = ApiConfig::new()
            .with_timeout(Duration::from_secs(3))
            .with_state_caching(Duration::from_secs(5))
            .with_client_credentials("key", "secret");

        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.state_caching(), Duration::from_secs(5));
        assert_eq!(config.client_credentials().unwrap().client_id, "key");
    }

    #[test]
    fn into_client_rejects_non_http_url() {
        let result = ApiConfig::new()
            .with_base_url("ftp://example.com")
            .into_client("r0");
        assert!(matches!(result, Err(ProtocolError::InvalidAddress(_))));
    }

    #[test]
    fn into_client_starts_without_token() {
        let client = ApiConfig::new().into_client("r0").unwrap();
        assert!(client.token().is_none());
        assert_eq!(client.credential.read().refresh_token(), "r0");
    }

    #[test]
    fn url_joins_paths() {
        let client = ApiConfig::new()
            .with_base_url("http://localhost:1234")
            .into_client("r0")
            .unwrap();
        assert_eq!(
            client.url("/toon/v3/agreements"),
            "http://localhost:1234/toon/v3/agreements"
        );
        assert_eq!(client.url("token"), "http://localhost:1234/token");
    }
}
