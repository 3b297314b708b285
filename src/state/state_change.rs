// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change representation.
//!
//! A [`StateChange`] is both the unit of update fed into a
//! [`DeviceState`](super::DeviceState) and the event reported outward when
//! the update actually changed something.
//!
//! # Examples
//!
//! ```
//! use thermoreg_lib::state::{DeviceState, StateChange, StateField};
//! use thermoreg_lib::types::ThermalFunction;
//!
//! let mut state = DeviceState::new();
//! let change = StateChange::ThermalFunction(ThermalFunction::Heat);
//!
//! assert_eq!(change.field(), StateField::ThermalFunction);
//! assert!(state.apply(&change));
//! assert!(!state.apply(&change));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{
    Actuator, HeatingCoolingMode, LocalOffsetMode, OperationMode, ThermalFunction,
};

/// Identifies one field of a [`DeviceState`](super::DeviceState).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateField {
    /// Operation mode.
    OperationMode,
    /// Thermal function.
    ThermalFunction,
    /// Derived heating/cooling mode.
    HeatingCoolingMode,
    /// Commanded setpoint.
    Setpoint,
    /// Target temperature reported by the device.
    TargetTemperature,
    /// Ambient (probe) temperature.
    AmbientTemperature,
    /// Local trim knob.
    LocalOffset,
    /// One actuator's on/off status.
    Actuator(Actuator),
}

impl fmt::Display for StateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OperationMode => f.write_str("operation mode"),
            Self::ThermalFunction => f.write_str("thermal function"),
            Self::HeatingCoolingMode => f.write_str("heating/cooling mode"),
            Self::Setpoint => f.write_str("setpoint"),
            Self::TargetTemperature => f.write_str("target temperature"),
            Self::AmbientTemperature => f.write_str("ambient temperature"),
            Self::LocalOffset => f.write_str("local offset"),
            Self::Actuator(actuator) => write!(f, "{actuator} actuator"),
        }
    }
}

/// A change of one device state field.
///
/// Each variant carries the new value of exactly one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StateChange {
    /// Operation mode changed.
    OperationMode(OperationMode),
    /// Thermal function changed.
    ThermalFunction(ThermalFunction),
    /// Derived heating/cooling mode changed.
    ///
    /// Emitted by the state itself; applying it directly is a no-op.
    HeatingCoolingMode(HeatingCoolingMode),
    /// Setpoint changed (°C).
    Setpoint(f64),
    /// Target temperature changed (°C).
    TargetTemperature(f64),
    /// Ambient temperature changed (°C).
    AmbientTemperature(f64),
    /// Local offset changed.
    LocalOffset(LocalOffsetMode),
    /// Actuator status changed.
    Actuator {
        /// The actuator slot.
        actuator: Actuator,
        /// Whether the actuator is on.
        on: bool,
    },
}

impl StateChange {
    /// Creates a setpoint change.
    #[must_use]
    pub fn setpoint(value: f64) -> Self {
        Self::Setpoint(value)
    }

    /// Creates an actuator status change.
    #[must_use]
    pub fn actuator(actuator: Actuator, on: bool) -> Self {
        Self::Actuator { actuator, on }
    }

    /// Returns the field this change targets.
    #[must_use]
    pub fn field(&self) -> StateField {
        match self {
            Self::OperationMode(_) => StateField::OperationMode,
            Self::ThermalFunction(_) => StateField::ThermalFunction,
            Self::HeatingCoolingMode(_) => StateField::HeatingCoolingMode,
            Self::Setpoint(_) => StateField::Setpoint,
            Self::TargetTemperature(_) => StateField::TargetTemperature,
            Self::AmbientTemperature(_) => StateField::AmbientTemperature,
            Self::LocalOffset(_) => StateField::LocalOffset,
            Self::Actuator { actuator, .. } => StateField::Actuator(*actuator),
        }
    }

    /// Returns `true` for the mode/function axes.
    #[must_use]
    pub fn is_mode(&self) -> bool {
        matches!(
            self,
            Self::OperationMode(_) | Self::ThermalFunction(_) | Self::HeatingCoolingMode(_)
        )
    }

    /// Returns `true` for temperature readings and the setpoint.
    #[must_use]
    pub fn is_temperature(&self) -> bool {
        matches!(
            self,
            Self::Setpoint(_) | Self::TargetTemperature(_) | Self::AmbientTemperature(_)
        )
    }
}

impl fmt::Display for StateChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OperationMode(v) => write!(f, "{} = {v}", self.field()),
            Self::ThermalFunction(v) => write!(f, "{} = {v}", self.field()),
            Self::HeatingCoolingMode(v) => write!(f, "{} = {v}", self.field()),
            Self::Setpoint(v) | Self::TargetTemperature(v) | Self::AmbientTemperature(v) => {
                write!(f, "{} = {v}", self.field())
            }
            Self::LocalOffset(v) => write!(f, "{} = {v}", self.field()),
            Self::Actuator { on, .. } => {
                write!(f, "{} = {}", self.field(), if *on { "ON" } else { "OFF" })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_of_each_change() {
        assert_eq!(StateChange::setpoint(20.0).field(), StateField::Setpoint);
        assert_eq!(
            StateChange::actuator(Actuator::Cooling, true).field(),
            StateField::Actuator(Actuator::Cooling)
        );
        assert_eq!(
            StateChange::LocalOffset(LocalOffsetMode::Normal).field(),
            StateField::LocalOffset
        );
    }

    #[test]
    fn classification() {
        assert!(StateChange::OperationMode(OperationMode::Off).is_mode());
        assert!(!StateChange::setpoint(1.0).is_mode());
        assert!(StateChange::AmbientTemperature(19.5).is_temperature());
        assert!(!StateChange::actuator(Actuator::Heating, false).is_temperature());
    }

    #[test]
    fn display() {
        assert_eq!(StateChange::setpoint(21.5).to_string(), "setpoint = 21.5");
        assert_eq!(
            StateChange::actuator(Actuator::Heating, true).to_string(),
            "heating actuator = ON"
        );
        assert_eq!(
            StateChange::ThermalFunction(ThermalFunction::Cool).to_string(),
            "thermal function = COOL"
        );
    }
}
