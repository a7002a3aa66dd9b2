// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Client builder.

use std::sync::Arc;

use super::Toon;
use super::session::{NO_QUERY, Session};
use crate::error::Error;
use crate::protocol::ApiConfig;
use crate::response::Agreement;
use crate::types::ProgramGuard;

/// Builder for [`Toon`] clients.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use toon_lib::{ProgramGuard, Toon};
/// use toon_lib::protocol::ApiConfig;
///
/// # async fn example() -> toon_lib::Result<()> {
/// let toon = Toon::builder("refresh-token")
///     .with_config(ApiConfig::new().with_state_caching(Duration::from_secs(60)))
///     .with_client_credentials("consumer-key", "consumer-secret")
///     .with_display_common_name("eneco-001-123456")
///     .with_program_guard(ProgramGuard::RejectWhileActive)
///     .build()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ToonBuilder {
    refresh_token: String,
    config: ApiConfig,
    display_common_name: Option<String>,
    guard: ProgramGuard,
}

impl ToonBuilder {
    /// Creates a builder that authenticates with `refresh_token`.
    pub(crate) fn new(refresh_token: impl Into<String>) -> Self {
        Self {
            refresh_token: refresh_token.into(),
            config: ApiConfig::default(),
            display_common_name: None,
            guard: ProgramGuard::default(),
        }
    }

    /// Replaces the API configuration.
    #[must_use]
    pub fn with_config(mut self, config: ApiConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets OAuth client credentials sent with every token exchange.
    #[must_use]
    pub fn with_client_credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.config = self.config.with_client_credentials(client_id, client_secret);
        self
    }

    /// Selects the agreement whose display common name matches, ignoring
    /// case. Without it the first agreement is used.
    #[must_use]
    pub fn with_display_common_name(mut self, name: impl Into<String>) -> Self {
        self.display_common_name = Some(name.into());
        self
    }

    /// Sets how manual set points behave while the thermostat program runs.
    #[must_use]
    pub fn with_program_guard(mut self, guard: ProgramGuard) -> Self {
        self.guard = guard;
        self
    }

    /// Authenticates, retrieves the agreements and returns the client.
    ///
    /// # Errors
    ///
    /// Returns error if the refresh token is rejected, the account has no
    /// agreements, or no agreement matches the requested display name.
    pub async fn build(self) -> Result<Toon, Error> {
        let window = self.config.state_caching();
        let api = self.config.into_client(self.refresh_token)?;
        api.authenticate().await?;

        let agreements: Vec<Agreement> = api.get("toon/v3/agreements", NO_QUERY).await?.parse()?;
        let Some(first) = agreements.first() else {
            return Err(Error::NoAgreements);
        };
        let agreement = match &self.display_common_name {
            Some(name) => agreements
                .iter()
                .find(|agreement| agreement.matches_display_name(name))
                .cloned()
                .ok_or_else(|| Error::AgreementNotFound(name.clone()))?,
            None => first.clone(),
        };

        tracing::info!(
            agreement = %agreement.id,
            display = %agreement.display_common_name,
            agreements = agreements.len(),
            "Connected to Toon"
        );

        Ok(Toon {
            session: Arc::new(Session::new(api, window, agreements, agreement, self.guard)),
        })
    }
}
