// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `thermoreg` library.
//!
//! Every failure is scoped to one device, one intent or one reading. None of
//! them is fatal: the reconciler reports them and keeps running.

use thiserror::Error;

use crate::state::StateField;
use crate::types::{OperationMode, ThermalFunction};

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// The intent has no resolvable device address.
    #[error("device has no address")]
    NoAddress,

    /// No protocol encoding exists for the requested combination.
    #[error("no protocol encoding for mode {mode} with function {function}")]
    UnsupportedIntent {
        /// Requested operation mode.
        mode: OperationMode,
        /// Requested thermal function.
        function: ThermalFunction,
    },

    /// A single inbound reading failed to parse.
    #[error(transparent)]
    MalformedReading(#[from] MalformedReading),

    /// The link layer failed or refused the command.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Device was not found in the manager.
    #[error("device not found")]
    DeviceNotFound,
}

/// Errors related to value validation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// The address is empty or contains characters outside `0-9` and `#`.
    #[error("invalid address: {0:?}")]
    InvalidAddress(String),

    /// Setpoints must be finite real numbers.
    #[error("setpoint {0} is not a finite number")]
    NonFiniteSetpoint(f64),

    /// The setpoint does not fit the four-digit tenths field of a frame.
    #[error("setpoint {0} is outside -99.9..=99.9")]
    SetpointOutOfRange(f64),

    /// A mode or function label could not be parsed.
    #[error("unknown label: {0}")]
    UnknownLabel(String),
}

/// Errors raised by a [`Transport`](crate::protocol::Transport).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The link accepted the frame but answered with a NACK.
    #[error("command rejected: {0}")]
    Rejected(String),

    /// Connection to the gateway failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Internal channel was closed.
    #[error("channel closed: {0}")]
    ChannelClosed(String),
}

/// An inbound field whose payload could not be interpreted.
///
/// The field keeps its previous value; decoding of the remaining readings in
/// the same message continues.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("malformed {field} reading {payload:?}: {reason}")]
pub struct MalformedReading {
    /// The state field the reading was meant for.
    pub field: StateField,
    /// The raw payload as received.
    pub payload: String,
    /// Description of the parsing failure.
    pub reason: String,
}

impl MalformedReading {
    /// Creates a malformed reading error.
    #[must_use]
    pub fn new(field: StateField, payload: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field,
            payload: payload.into(),
            reason: reason.into(),
        }
    }
}

/// Errors related to loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configured value is invalid.
    #[error("invalid value for {field}: {message}")]
    InvalidValue {
        /// The offending configuration key.
        field: String,
        /// Description of the problem.
        message: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_intent_display() {
        let err = Error::UnsupportedIntent {
            mode: OperationMode::Auto,
            function: ThermalFunction::Heat,
        };
        assert_eq!(
            err.to_string(),
            "no protocol encoding for mode AUTO with function HEAT"
        );
    }

    #[test]
    fn malformed_reading_display() {
        let err = MalformedReading::new(StateField::Setpoint, "abc", "not a number");
        assert_eq!(
            err.to_string(),
            "malformed setpoint reading \"abc\": not a number"
        );
    }

    #[test]
    fn error_from_transport_error() {
        let err: Error = TransportError::Rejected("NACK".to_string()).into();
        assert!(matches!(err, Error::Transport(TransportError::Rejected(_))));
    }

    #[test]
    fn value_error_display() {
        let err = ValueError::InvalidAddress("a1".to_string());
        assert_eq!(err.to_string(), "invalid address: \"a1\"");
        assert_eq!(
            ValueError::SetpointOutOfRange(150.0).to_string(),
            "setpoint 150 is outside -99.9..=99.9"
        );
    }
}
