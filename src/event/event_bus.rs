// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan-out of zone events.

use tokio::sync::broadcast;

use crate::state::{DeviceState, StateChange};

use super::{DeviceEvent, DeviceId};

/// Events buffered per subscriber before a slow one starts lagging.
pub(crate) const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Shared channel carrying the [`DeviceEvent`]s of every managed zone.
///
/// The manager and each of its thermostats hold clones of one bus. A
/// subscriber that falls more than `capacity` events behind receives
/// `RecvError::Lagged` and continues with the newest events; the zones are
/// never slowed down by it.
///
/// # Examples
///
/// ```
/// use thermoreg_lib::event::{DeviceEvent, DeviceId, EventBus};
/// use thermoreg_lib::state::{DeviceState, StateChange};
///
/// let bus = EventBus::new();
/// let mut rx = bus.subscribe();
///
/// let zone = DeviceId::new();
/// let mut state = DeviceState::new();
/// state.apply(&StateChange::Setpoint(20.5));
/// bus.publish_changes(zone, &[StateChange::Setpoint(20.5)], &state);
///
/// let event = rx.try_recv().unwrap();
/// assert_eq!(event.change(), Some(&StateChange::Setpoint(20.5)));
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DeviceEvent>,
}

impl EventBus {
    /// Creates a bus buffering 256 events per subscriber.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_EVENT_CAPACITY)
    }

    /// Creates a bus buffering `capacity` events per subscriber.
    ///
    /// A capacity of zero is raised to one.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Subscribes to events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DeviceEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Publishes a lifecycle or failure event.
    pub fn publish(&self, event: DeviceEvent) {
        let device_id = event.device_id();
        if self.sender.send(event).is_err() {
            tracing::trace!(device_id = %device_id.short(), "Event dropped, no subscribers");
        }
    }

    /// Publishes one [`DeviceEvent::StateChanged`] per recorded change, in
    /// the order the store recorded them.
    ///
    /// Every event carries `new_state`, the aggregate after the whole batch,
    /// so a subscriber never observes a half-applied update.
    pub fn publish_changes(
        &self,
        device_id: DeviceId,
        changes: &[StateChange],
        new_state: &DeviceState,
    ) {
        if changes.is_empty() {
            return;
        }
        if self.sender.receiver_count() == 0 {
            tracing::trace!(
                device_id = %device_id.short(),
                count = changes.len(),
                "State changes dropped, no subscribers"
            );
            return;
        }
        for change in changes {
            let event = DeviceEvent::state_changed(device_id, change.clone(), new_state.clone());
            if self.sender.send(event).is_err() {
                break;
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
