// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! User intents and the pending-intent slot.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::command::quantize_setpoint;
use crate::error::Error;
use crate::state::{DeviceState, StateField};
use crate::types::{OperationMode, ThermalFunction};

/// Something the user wants a zone to do.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Intent {
    /// Hold this temperature (°C).
    SetSetpoint(f64),
    /// Switch control regime.
    SetOperationMode(OperationMode),
    /// Switch between heating, cooling and generic.
    SetThermalFunction(ThermalFunction),
}

/// Discriminant of an [`Intent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentKind {
    /// [`Intent::SetSetpoint`].
    SetSetpoint,
    /// [`Intent::SetOperationMode`].
    SetOperationMode,
    /// [`Intent::SetThermalFunction`].
    SetThermalFunction,
}

impl Intent {
    /// Returns the kind of intent.
    #[must_use]
    pub fn kind(&self) -> IntentKind {
        match self {
            Self::SetSetpoint(_) => IntentKind::SetSetpoint,
            Self::SetOperationMode(_) => IntentKind::SetOperationMode,
            Self::SetThermalFunction(_) => IntentKind::SetThermalFunction,
        }
    }

    /// Returns the state field that must be known before the intent can be
    /// encoded, or `None` if it never needs one.
    ///
    /// # Examples
    ///
    /// ```
    /// use thermoreg_lib::reconciler::Intent;
    /// use thermoreg_lib::state::StateField;
    /// use thermoreg_lib::types::OperationMode;
    ///
    /// assert_eq!(Intent::SetSetpoint(20.0).prerequisite(), Some(StateField::ThermalFunction));
    /// assert_eq!(Intent::SetOperationMode(OperationMode::Off).prerequisite(), None);
    /// ```
    #[must_use]
    pub fn prerequisite(&self) -> Option<StateField> {
        match self {
            Self::SetSetpoint(_) => Some(StateField::ThermalFunction),
            Self::SetOperationMode(OperationMode::Off) => None,
            Self::SetOperationMode(_) | Self::SetThermalFunction(_) => Some(StateField::Setpoint),
        }
    }

    /// Returns `true` if `state` already holds the prerequisite.
    #[must_use]
    pub fn is_resolvable(&self, state: &DeviceState) -> bool {
        match self.prerequisite() {
            None => true,
            Some(StateField::ThermalFunction) => state.thermal_function().is_known(),
            Some(_) => state.setpoint().is_some(),
        }
    }

    /// Rejects intents that could never be encoded, whatever the state.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedIntent` for `Auto`/`Unknown` modes and the
    /// `Unknown` function, and a `ValueError` for setpoints that are not
    /// finite or do not fit a frame.
    pub fn validate(&self, state: &DeviceState) -> Result<(), Error> {
        match *self {
            Self::SetSetpoint(value) => {
                quantize_setpoint(value)?;
                Ok(())
            }
            Self::SetOperationMode(mode @ (OperationMode::Auto | OperationMode::Unknown)) => {
                Err(Error::UnsupportedIntent {
                    mode,
                    function: state.thermal_function(),
                })
            }
            Self::SetThermalFunction(ThermalFunction::Unknown) => Err(Error::UnsupportedIntent {
                mode: state.operation_mode(),
                function: ThermalFunction::Unknown,
            }),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetSetpoint(value) => write!(f, "set setpoint {value}"),
            Self::SetOperationMode(mode) => write!(f, "set mode {mode}"),
            Self::SetThermalFunction(function) => write!(f, "set function {function}"),
        }
    }
}

/// An intent parked until its prerequisite state is reported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingIntent {
    intent: Intent,
}

impl PendingIntent {
    /// Parks an intent.
    #[must_use]
    pub fn new(intent: Intent) -> Self {
        Self { intent }
    }

    /// Returns the parked intent.
    #[must_use]
    pub fn intent(&self) -> Intent {
        self.intent
    }

    /// Returns the kind of the parked intent.
    #[must_use]
    pub fn kind(&self) -> IntentKind {
        self.intent.kind()
    }

    /// Returns the field whose change resumes this intent.
    #[must_use]
    pub fn awaits(&self) -> Option<StateField> {
        self.intent.prerequisite()
    }
}
