// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `toon_lib` library.
//!
//! This module provides the error hierarchy for failures across the library:
//! value validation, communication with the cloud API, JSON parsing, and
//! device control preconditions.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while talking to the cloud API.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A device refused a control operation.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),

    /// No device of the requested kind carries the given name.
    #[error("no {kind} named '{name}'")]
    DeviceNotFound {
        /// The kind of device that was searched for.
        kind: &'static str,
        /// The name that was looked up.
        name: String,
    },

    /// No thermostat preset is configured under the given name or id.
    #[error("no thermostat preset '{0}'")]
    PresetNotFound(String),

    /// No agreement carries the given display common name.
    #[error("no agreement with display name '{0}'")]
    AgreementNotFound(String),

    /// The account has no agreements to operate on.
    #[error("account has no agreements")]
    NoAgreements,
}

/// Coarse classification of an [`Error`].
///
/// Host applications that only need to decide between "retry later",
/// "ask for new credentials" and "report a bug" can match on this instead of
/// the full error tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The API could not be reached or answered with an unexpected status.
    Network,
    /// The refresh token was rejected or re-authentication did not help.
    Authentication,
    /// The API answered with a document of an unexpected shape.
    MalformedResponse,
    /// A control operation was refused before anything was written.
    Precondition,
    /// A caller-supplied value was rejected.
    Validation,
    /// A named device, preset or agreement does not exist.
    NotFound,
}

impl Error {
    /// Returns the failure category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Value(_) => ErrorKind::Validation,
            Self::Protocol(ProtocolError::AuthenticationFailed(_)) => ErrorKind::Authentication,
            Self::Protocol(ProtocolError::InvalidAddress(_)) => ErrorKind::Validation,
            Self::Protocol(_) => ErrorKind::Network,
            Self::Parse(_) => ErrorKind::MalformedResponse,
            Self::Device(_) => ErrorKind::Precondition,
            Self::DeviceNotFound { .. }
            | Self::PresetNotFound(_)
            | Self::AgreementNotFound(_)
            | Self::NoAgreements => ErrorKind::NotFound,
        }
    }
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// The thermostat state name is not one of the known presets.
    #[error("invalid thermostat state: {0}")]
    InvalidThermostatState(String),

    /// The program state is not one of the known values.
    #[error("invalid program state: {0}")]
    InvalidProgramState(String),

    /// The graph interval is not one of the accepted values.
    #[error("invalid interval '{0}', accepted values are hours, days, weeks, months, years")]
    InvalidInterval(String),

    /// The temperature is not finite or outside the accepted range.
    #[error("temperature {actual} is out of range [{min}, {max}]")]
    InvalidTemperature {
        /// Minimum allowed temperature in degrees Celsius.
        min: f32,
        /// Maximum allowed temperature in degrees Celsius.
        max: f32,
        /// The temperature that was provided.
        actual: f32,
    },

    /// The start of a time window lies after its end.
    #[error("time window starts after it ends")]
    InvalidTimeWindow,
}

/// Errors related to communication with the cloud API.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("unexpected HTTP status {status}: {body}")]
    UnexpectedStatus {
        /// The HTTP status code.
        status: u16,
        /// The response body, possibly empty.
        body: String,
    },

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The refresh token was rejected, or a request was still rejected
    /// after renewing the access token.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),
}

/// Errors related to parsing API responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// Failed to parse a specific value.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// Errors raised when a device refuses a control operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// Device is not connected.
    #[error("device '{0}' is not connected")]
    NotConnected(String),

    /// Device switch is locked.
    #[error("device '{0}' is locked")]
    Locked(String),

    /// The thermostat program is running and the configured guard refuses
    /// manual set points until it is bypassed.
    #[error("thermostat program is active")]
    ProgramActive,
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
