// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device event types.

use serde::{Deserialize, Serialize};

use crate::state::{DeviceState, StateChange};

use super::DeviceId;

/// Events emitted by the thermostat manager.
///
/// # Examples
///
/// ```
/// use thermoreg_lib::event::{DeviceId, DeviceEvent};
/// use thermoreg_lib::state::{DeviceState, StateChange};
///
/// let device_id = DeviceId::new();
///
/// let added = DeviceEvent::DeviceAdded { device_id };
/// assert!(added.is_lifecycle());
///
/// let changed = DeviceEvent::state_changed(
///     device_id,
///     StateChange::Setpoint(21.5),
///     DeviceState::new(),
/// );
/// assert!(changed.is_state_change());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DeviceEvent {
    /// A thermostat was registered.
    DeviceAdded {
        /// The ID of the added device.
        device_id: DeviceId,
    },

    /// A thermostat was unregistered.
    DeviceRemoved {
        /// The ID of the removed device.
        device_id: DeviceId,
    },

    /// The state store recorded a real change.
    ///
    /// Emitted once per changed field, in the order the store reported them,
    /// for inbound reports and optimistic updates alike.
    StateChanged {
        /// The ID of the device.
        device_id: DeviceId,
        /// The specific change that occurred.
        change: StateChange,
        /// The complete state after the whole update was applied.
        new_state: DeviceState,
    },

    /// A parked intent was replayed but could not be sent.
    ///
    /// The intent is dropped; no caller is waiting for it any more, so this
    /// event is the only place the failure surfaces.
    ReplayFailed {
        /// The ID of the device.
        device_id: DeviceId,
        /// Description of the failure.
        error: String,
    },
}

impl DeviceEvent {
    /// Returns the device ID associated with this event.
    #[must_use]
    pub fn device_id(&self) -> DeviceId {
        match self {
            Self::DeviceAdded { device_id }
            | Self::DeviceRemoved { device_id }
            | Self::StateChanged { device_id, .. }
            | Self::ReplayFailed { device_id, .. } => *device_id,
        }
    }

    /// Returns `true` if this is a device lifecycle event (added/removed).
    #[must_use]
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, Self::DeviceAdded { .. } | Self::DeviceRemoved { .. })
    }

    /// Returns `true` if this is a state change event.
    #[must_use]
    pub fn is_state_change(&self) -> bool {
        matches!(self, Self::StateChanged { .. })
    }

    /// Returns the state change carried by this event, if any.
    #[must_use]
    pub fn change(&self) -> Option<&StateChange> {
        match self {
            Self::StateChanged { change, .. } => Some(change),
            _ => None,
        }
    }

    /// Creates a device added event.
    #[must_use]
    pub fn device_added(device_id: DeviceId) -> Self {
        Self::DeviceAdded { device_id }
    }

    /// Creates a device removed event.
    #[must_use]
    pub fn device_removed(device_id: DeviceId) -> Self {
        Self::DeviceRemoved { device_id }
    }

    /// Creates a state changed event.
    #[must_use]
    pub fn state_changed(device_id: DeviceId, change: StateChange, new_state: DeviceState) -> Self {
        Self::StateChanged {
            device_id,
            change,
            new_state,
        }
    }

    /// Creates a replay failure event.
    #[must_use]
    pub fn replay_failed(device_id: DeviceId, error: impl Into<String>) -> Self {
        Self::ReplayFailed {
            device_id,
            error: error.into(),
        }
    }
}
