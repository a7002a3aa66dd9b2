// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State shared by the client and the device handles it creates.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, ParseError, Result};
use crate::protocol::ApiClient;
use crate::response::{Agreement, StatusResponse, SwitchRecord};
use crate::state::StateCache;
use crate::types::ProgramGuard;

/// Empty query string.
pub(crate) const NO_QUERY: &[(&str, &str)] = &[];

/// Kind of switchable accessory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SwitchKind {
    Light,
    SmartPlug,
}

impl SwitchKind {
    pub(crate) const fn label(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::SmartPlug => "smart plug",
        }
    }

    fn matches(self, record: &SwitchRecord) -> bool {
        match self {
            Self::Light => record.status.is_light(),
            Self::SmartPlug => record.status.is_smart_plug(),
        }
    }
}

#[derive(Debug)]
pub(crate) struct Session {
    api: ApiClient,
    status: StateCache<StatusResponse>,
    agreements: Vec<Agreement>,
    agreement: RwLock<Agreement>,
    guard: ProgramGuard,
}

impl Session {
    pub(crate) fn new(
        api: ApiClient,
        window: Duration,
        agreements: Vec<Agreement>,
        agreement: Agreement,
        guard: ProgramGuard,
    ) -> Self {
        Self {
            api,
            status: StateCache::new(window),
            agreements,
            agreement: RwLock::new(agreement),
            guard,
        }
    }

    pub(crate) fn api(&self) -> &ApiClient {
        &self.api
    }

    pub(crate) fn guard(&self) -> ProgramGuard {
        self.guard
    }

    pub(crate) fn agreements(&self) -> &[Agreement] {
        &self.agreements
    }

    pub(crate) fn agreement(&self) -> Agreement {
        self.agreement.read().clone()
    }

    /// Makes the agreement with `display_common_name` the active one.
    pub(crate) async fn select_agreement(&self, display_common_name: &str) -> Result<()> {
        let selected = self
            .agreements
            .iter()
            .find(|agreement| agreement.matches_display_name(display_common_name))
            .cloned()
            .ok_or_else(|| Error::AgreementNotFound(display_common_name.to_string()))?;

        tracing::debug!(agreement = %selected.id, "Selecting agreement");
        *self.agreement.write() = selected;
        self.invalidate().await;
        Ok(())
    }

    /// Returns the API path of `endpoint` under the active agreement.
    pub(crate) fn path(&self, endpoint: &str) -> String {
        let agreement = self.agreement.read();
        format!(
            "toon/v3/{}/{}",
            urlencoding::encode(&agreement.id),
            endpoint.trim_start_matches('/')
        )
    }

    /// Returns the status document, fetching it if the snapshot is stale.
    pub(crate) async fn status(&self) -> Result<Arc<StatusResponse>> {
        self.status.get_or_fetch(|| self.fetch_status()).await
    }

    pub(crate) async fn invalidate(&self) {
        self.status.invalidate().await;
    }

    /// Sends a GET to `endpoint` and returns the raw JSON body.
    pub(crate) async fn get_json<Q>(&self, endpoint: &str, query: &Q) -> Result<Value>
    where
        Q: Serialize + Sync + ?Sized,
    {
        let response = self.api.get(&self.path(endpoint), query).await?;
        Ok(response.parse()?)
    }

    /// Reads the JSON object stored at `path`.
    pub(crate) async fn get_object(&self, path: &str) -> Result<Map<String, Value>> {
        match self.api.get(path, NO_QUERY).await?.parse::<Value>()? {
            Value::Object(fields) => Ok(fields),
            _ => Err(ParseError::InvalidValue {
                field: path.to_string(),
                message: "expected a JSON object".to_string(),
            }
            .into()),
        }
    }

    /// Writes `fields` back to `path` and clears the status cache.
    pub(crate) async fn put_object(&self, path: &str, fields: &Map<String, Value>) -> Result<()> {
        self.api.put_json(path, fields).await?;
        self.invalidate().await;
        Ok(())
    }

    /// Looks up a switch of `kind` by name in the status document.
    pub(crate) async fn switch(&self, kind: SwitchKind, name: &str) -> Result<SwitchRecord> {
        self.status()
            .await?
            .switches()
            .into_iter()
            .find(|record| kind.matches(record) && record.matches_name(name))
            .ok_or_else(|| Error::DeviceNotFound {
                kind: kind.label(),
                name: name.to_string(),
            })
    }

    /// Returns all switches of `kind`.
    pub(crate) async fn switches(&self, kind: SwitchKind) -> Result<Vec<SwitchRecord>> {
        Ok(self
            .status()
            .await?
            .switches()
            .into_iter()
            .filter(|record| kind.matches(record))
            .collect())
    }

    async fn fetch_status(&self) -> Result<StatusResponse> {
        let path = self.path("status");
        let mut response = self.api.get(&path, NO_QUERY).await?;

        if response.is_accepted() {
            tracing::debug!("Status accepted but no data yet, trying one more time");
            response = self.api.get(&path, NO_QUERY).await?;
        }

        Ok(response.parse()?)
    }
}
