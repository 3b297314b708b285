// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state tracking.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{
    Actuator, HeatingCoolingMode, LocalOffsetMode, OperationMode, ThermalFunction,
};

use super::StateChange;

/// Cached state of one thermostat zone.
///
/// Everything starts unknown: the device only reveals its state through
/// asynchronous reports. Temperatures are plain degrees Celsius.
///
/// # Examples
///
/// ```
/// use thermoreg_lib::state::{DeviceState, StateChange};
///
/// let mut state = DeviceState::new();
/// assert_eq!(state.setpoint(), None);
///
/// state.apply(&StateChange::setpoint(21.0));
/// assert_eq!(state.setpoint(), Some(21.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceState {
    operation_mode: OperationMode,
    thermal_function: ThermalFunction,
    setpoint: Option<f64>,
    target_temperature: Option<f64>,
    ambient_temperature: Option<f64>,
    local_offset: Option<LocalOffsetMode>,
    actuators: BTreeMap<Actuator, bool>,
}

impl DeviceState {
    /// Creates a new, fully unknown device state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the operation mode.
    #[must_use]
    pub fn operation_mode(&self) -> OperationMode {
        self.operation_mode
    }

    /// Gets the thermal function.
    #[must_use]
    pub fn thermal_function(&self) -> ThermalFunction {
        self.thermal_function
    }

    /// Gets the combined heating/cooling mode.
    #[must_use]
    pub fn heating_cooling_mode(&self) -> HeatingCoolingMode {
        HeatingCoolingMode::derive(self.operation_mode, self.thermal_function)
    }

    /// Gets the setpoint, if known.
    #[must_use]
    pub fn setpoint(&self) -> Option<f64> {
        self.setpoint
    }

    /// Gets the target temperature, if reported.
    #[must_use]
    pub fn target_temperature(&self) -> Option<f64> {
        self.target_temperature
    }

    /// Gets the ambient temperature, if reported.
    #[must_use]
    pub fn ambient_temperature(&self) -> Option<f64> {
        self.ambient_temperature
    }

    /// Gets the local offset, if reported.
    #[must_use]
    pub fn local_offset(&self) -> Option<LocalOffsetMode> {
        self.local_offset
    }

    /// Gets one actuator's status, if reported.
    #[must_use]
    pub fn actuator(&self, actuator: Actuator) -> Option<bool> {
        self.actuators.get(&actuator).copied()
    }

    /// Returns all reported actuator statuses.
    #[must_use]
    pub fn actuators(&self) -> &BTreeMap<Actuator, bool> {
        &self.actuators
    }

    /// Applies a state change and returns whether the state actually changed.
    ///
    /// [`StateChange::HeatingCoolingMode`] is derived, so applying it never
    /// changes anything.
    pub fn apply(&mut self, change: &StateChange) -> bool {
        match change {
            StateChange::OperationMode(mode) => replace(&mut self.operation_mode, *mode),
            StateChange::ThermalFunction(function) => {
                replace(&mut self.thermal_function, *function)
            }
            StateChange::HeatingCoolingMode(_) => false,
            StateChange::Setpoint(value) => replace(&mut self.setpoint, Some(*value)),
            StateChange::TargetTemperature(value) => {
                replace(&mut self.target_temperature, Some(*value))
            }
            StateChange::AmbientTemperature(value) => {
                replace(&mut self.ambient_temperature, Some(*value))
            }
            StateChange::LocalOffset(offset) => replace(&mut self.local_offset, Some(*offset)),
            StateChange::Actuator { actuator, on } => {
                self.actuators.insert(*actuator, *on) != Some(*on)
            }
        }
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}
