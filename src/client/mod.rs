// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The Toon client.
//!
//! [`Toon`] exposes the status document of the active agreement as typed
//! accessors. The document is fetched on first use and kept for the
//! configured staleness window; every write clears it.

mod builder;
pub(crate) mod session;

pub use builder::ToonBuilder;

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::consumption::Consumption;
use crate::device::{Light, SmartPlug};
use crate::error::{DeviceError, Error, ParseError, Result};
use crate::response::{
    Agreement, PowerUsage, SmokeDetector, Solar, StatusResponse, ThermostatInfo,
    ThermostatPreset, Usage,
};
use crate::types::{BurnerState, ProgramGuard, ProgramState, Temperature, ThermostatState};
use session::{Session, SwitchKind};

/// Active state written with a manual set point.
const MANUAL_ACTIVE_STATE: i64 = -1;

/// A client for one Toon installation.
///
/// Cloning is cheap; clones share the token, the active agreement and the
/// status cache.
///
/// # Examples
///
/// ```no_run
/// use toon_lib::Toon;
///
/// # async fn example() -> toon_lib::Result<()> {
/// let toon = Toon::builder("refresh-token").build().await?;
///
/// println!("{:.1} °C", toon.temperature().await?);
/// toon.set_thermostat_state("comfort").await?;
/// toon.set_thermostat(20.5).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Toon {
    session: Arc<Session>,
}

impl Toon {
    /// Creates a builder that authenticates with `refresh_token`.
    #[must_use]
    pub fn builder(refresh_token: impl Into<String>) -> ToonBuilder {
        ToonBuilder::new(refresh_token)
    }

    // ========== Agreements ==========

    /// Returns all agreements of the account.
    #[must_use]
    pub fn agreements(&self) -> &[Agreement] {
        self.session.agreements()
    }

    /// Returns the active agreement.
    #[must_use]
    pub fn agreement(&self) -> Agreement {
        self.session.agreement()
    }

    /// Returns the lowercase display common names of all agreements.
    #[must_use]
    pub fn display_names(&self) -> Vec<String> {
        self.agreements()
            .iter()
            .map(|agreement| agreement.display_common_name.to_lowercase())
            .collect()
    }

    /// Makes the agreement with the given display common name active and
    /// clears the status cache.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AgreementNotFound`] if no agreement matches.
    pub async fn select_agreement(&self, display_common_name: &str) -> Result<()> {
        self.session.select_agreement(display_common_name).await
    }

    // ========== Status ==========

    /// Returns the status document, fetching it if the cached one is stale.
    ///
    /// # Errors
    ///
    /// Returns error if the fetch fails or the document cannot be parsed.
    pub async fn status(&self) -> Result<Arc<StatusResponse>> {
        self.session.status().await
    }

    /// Drops the cached status so the next access fetches.
    pub async fn clear_cache(&self) {
        self.session.invalidate().await;
    }

    /// Returns gas usage.
    ///
    /// # Errors
    ///
    /// Returns error if the status cannot be fetched or has no gas section.
    pub async fn gas(&self) -> Result<Usage> {
        Ok(self.status().await?.gas()?)
    }

    /// Returns electricity usage.
    ///
    /// # Errors
    ///
    /// Returns error if the status cannot be fetched or has no power section.
    pub async fn power(&self) -> Result<PowerUsage> {
        Ok(self.status().await?.power()?)
    }

    /// Returns solar production.
    ///
    /// # Errors
    ///
    /// Returns error if the status cannot be fetched or has no power section.
    pub async fn solar(&self) -> Result<Solar> {
        Ok(self.status().await?.solar()?)
    }

    /// Returns the thermostat section of the status.
    ///
    /// # Errors
    ///
    /// Returns error if the status cannot be fetched or has no thermostat
    /// section.
    pub async fn thermostat_info(&self) -> Result<ThermostatInfo> {
        Ok(self.status().await?.thermostat()?.clone())
    }

    // ========== Thermostat ==========

    /// Returns the configured thermostat presets.
    ///
    /// # Errors
    ///
    /// Returns error if the status cannot be fetched or has no presets.
    pub async fn thermostat_states(&self) -> Result<Vec<ThermostatPreset>> {
        Ok(self.status().await?.presets()?.presets())
    }

    /// Returns the preset with the given name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidThermostatState`](crate::error::ValueError::InvalidThermostatState)
    /// for names other than comfort, home, sleep and away, and
    /// [`Error::PresetNotFound`] if the preset is not configured.
    pub async fn thermostat_state_by_name(&self, name: &str) -> Result<ThermostatPreset> {
        let state: ThermostatState = name.parse()?;
        self.thermostat_states()
            .await?
            .into_iter()
            .find(|preset| preset.state == state)
            .ok_or_else(|| Error::PresetNotFound(name.to_string()))
    }

    /// Returns the preset with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PresetNotFound`] if no preset has this id.
    pub async fn thermostat_state_by_id(&self, id: i64) -> Result<ThermostatPreset> {
        self.thermostat_states()
            .await?
            .into_iter()
            .find(|preset| preset.id == id)
            .ok_or_else(|| Error::PresetNotFound(id.to_string()))
    }

    /// Returns the active preset, or `None` when the set point was set
    /// manually.
    ///
    /// # Errors
    ///
    /// Returns error if the status cannot be fetched or lacks the thermostat
    /// sections.
    pub async fn thermostat_state(&self) -> Result<Option<ThermostatPreset>> {
        let status = self.status().await?;
        let active = status.thermostat()?.active_state;
        let preset = active.and_then(|id| {
            status
                .presets()
                .ok()?
                .presets()
                .into_iter()
                .find(|preset| preset.id == id)
        });

        if preset.is_none() {
            tracing::debug!("Manually set temperature, no thermostat state chosen");
        }
        Ok(preset)
    }

    /// Activates the preset with the given name, ignoring case.
    ///
    /// The write also puts the program in override and sets the preset's
    /// temperature as the current set point.
    ///
    /// # Errors
    ///
    /// Returns a validation error for unknown names, [`DeviceError::ProgramActive`]
    /// under [`ProgramGuard::RejectWhileActive`] while the program runs, or a
    /// protocol error if the write fails.
    pub async fn set_thermostat_state(&self, name: &str) -> Result<()> {
        let preset = self.thermostat_state_by_name(name).await?;
        tracing::debug!(state = %preset.state, "Setting thermostat state");

        self.update_thermostat(true, |fields| {
            fields.insert("activeState".to_string(), Value::from(preset.id));
            fields.insert(
                "programState".to_string(),
                Value::from(ProgramState::Override.code()),
            );
            if let Some(temperature) = preset.temperature {
                fields.insert("currentSetpoint".to_string(), Value::from(temperature));
            }
        })
        .await
    }

    /// Returns the current set point in degrees Celsius.
    ///
    /// # Errors
    ///
    /// Returns error if the status cannot be fetched or reports no set point.
    pub async fn thermostat(&self) -> Result<f32> {
        self.thermostat_info()
            .await?
            .set_point()
            .ok_or_else(|| ParseError::MissingField("currentSetpoint".to_string()).into())
    }

    /// Sets a manual set point in degrees Celsius.
    ///
    /// The write clears the active preset and puts the program in override.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidTemperature`](crate::error::ValueError::InvalidTemperature)
    /// outside 6-30 °C, [`DeviceError::ProgramActive`] under
    /// [`ProgramGuard::RejectWhileActive`] while the program runs, or a
    /// protocol error if the write fails.
    pub async fn set_thermostat(&self, celsius: f32) -> Result<()> {
        let target = Temperature::new(celsius)?;
        tracing::debug!(set_point = %target, "Setting thermostat");

        self.update_thermostat(true, |fields| {
            fields.insert("currentSetpoint".to_string(), Value::from(target.hundredths()));
            fields.insert("activeState".to_string(), Value::from(MANUAL_ACTIVE_STATE));
            fields.insert(
                "programState".to_string(),
                Value::from(ProgramState::Override.code()),
            );
        })
        .await
    }

    /// Turns the thermostat program on or off.
    ///
    /// # Errors
    ///
    /// Returns error if the write fails.
    pub async fn set_program_state(&self, state: ProgramState) -> Result<()> {
        tracing::debug!(program = %state, "Setting program state");
        self.update_thermostat(false, |fields| {
            fields.insert("programState".to_string(), Value::from(state.code()));
        })
        .await
    }

    /// Returns the displayed room temperature in degrees Celsius.
    ///
    /// # Errors
    ///
    /// Returns error if the status cannot be fetched or reports no
    /// temperature.
    pub async fn temperature(&self) -> Result<f32> {
        self.thermostat_info()
            .await?
            .displayed_temperature()
            .ok_or_else(|| {
                ParseError::MissingField("currentDisplayTemp".to_string()).into()
            })
    }

    /// Returns true when the burner is active.
    ///
    /// # Errors
    ///
    /// Returns error if the status cannot be fetched.
    pub async fn burner_on(&self) -> Result<bool> {
        Ok(self.thermostat_info().await?.burner_on())
    }

    /// Returns what the burner is doing, if the code is known.
    ///
    /// # Errors
    ///
    /// Returns error if the status cannot be fetched.
    pub async fn burner_state(&self) -> Result<Option<BurnerState>> {
        Ok(self.thermostat_info().await?.burner_state())
    }

    /// Reads the thermostat resource, applies `update` and writes it back.
    ///
    /// Manual set points are subject to the program guard.
    async fn update_thermostat<F>(&self, manual_set_point: bool, update: F) -> Result<()>
    where
        F: FnOnce(&mut Map<String, Value>),
    {
        let path = self.session.path("thermostat");
        let mut fields = self.session.get_object(&path).await?;

        if manual_set_point
            && self.session.guard() == ProgramGuard::RejectWhileActive
            && program_running(&fields)
        {
            tracing::warn!("Thermostat program is active, refusing manual set point");
            return Err(DeviceError::ProgramActive.into());
        }

        update(&mut fields);
        self.session.put_object(&path, &fields).await
    }

    // ========== Devices ==========

    /// Returns all lights.
    ///
    /// # Errors
    ///
    /// Returns error if the status cannot be fetched or lacks device sections.
    pub async fn lights(&self) -> Result<Vec<Light>> {
        Ok(self
            .session
            .switches(SwitchKind::Light)
            .await?
            .into_iter()
            .map(|record| Light::new(Arc::clone(&self.session), record))
            .collect())
    }

    /// Returns the light with the given name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`] if no light has this name.
    pub async fn light_by_name(&self, name: &str) -> Result<Light> {
        let record = self.session.switch(SwitchKind::Light, name).await?;
        Ok(Light::new(Arc::clone(&self.session), record))
    }

    /// Returns all smart plugs.
    ///
    /// # Errors
    ///
    /// Returns error if the status cannot be fetched or lacks device sections.
    pub async fn smart_plugs(&self) -> Result<Vec<SmartPlug>> {
        Ok(self
            .session
            .switches(SwitchKind::SmartPlug)
            .await?
            .into_iter()
            .map(|record| SmartPlug::new(Arc::clone(&self.session), record))
            .collect())
    }

    /// Returns the smart plug with the given name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`] if no smart plug has this name.
    pub async fn smart_plug_by_name(&self, name: &str) -> Result<SmartPlug> {
        let record = self.session.switch(SwitchKind::SmartPlug, name).await?;
        Ok(SmartPlug::new(Arc::clone(&self.session), record))
    }

    /// Returns all smoke detectors.
    ///
    /// # Errors
    ///
    /// Returns error if the status cannot be fetched.
    pub async fn smoke_detectors(&self) -> Result<Vec<SmokeDetector>> {
        Ok(self.status().await?.smoke_detectors().to_vec())
    }

    /// Returns the smoke detector with the given name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`] if no smoke detector has this name.
    pub async fn smoke_detector_by_name(&self, name: &str) -> Result<SmokeDetector> {
        self.smoke_detectors()
            .await?
            .into_iter()
            .find(|detector| detector.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::DeviceNotFound {
                kind: "smoke detector",
                name: name.to_string(),
            })
    }

    // ========== Consumption ==========

    /// Returns the consumption history of the active agreement.
    #[must_use]
    pub fn consumption(&self) -> Consumption {
        Consumption::new(Arc::clone(&self.session))
    }
}

fn program_running(fields: &Map<String, Value>) -> bool {
    let code = fields.get("programState").and_then(|value| match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    });
    code == Some(i64::from(ProgramState::On.code()))
}
