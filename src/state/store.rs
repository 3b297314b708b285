// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-device state store with change detection.

use tokio::sync::watch;

use super::{DeviceState, StateChange};

/// Owns the [`DeviceState`] of one device.
///
/// The state lives inside a watch channel: [`apply`](Self::apply) mutates it
/// under the channel's lock in one step, so readers (including
/// [`watch`](Self::watch) receivers on other tasks) always see either the old
/// or the new aggregate.
#[derive(Debug)]
pub struct StateStore {
    tx: watch::Sender<DeviceState>,
}

impl StateStore {
    /// Creates a store holding a fully unknown state.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = watch::channel(DeviceState::new());
        Self { tx }
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn get(&self) -> DeviceState {
        self.tx.borrow().clone()
    }

    /// Creates a watch receiver that observes every committed update.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<DeviceState> {
        self.tx.subscribe()
    }

    /// Applies a partial update and returns the changes that took effect.
    ///
    /// Fields whose new value equals the cached one produce nothing, so
    /// applying the same update twice reports changes only the first time.
    /// When the mode or function moved, a derived
    /// [`StateChange::HeatingCoolingMode`] is appended.
    pub fn apply(&self, update: &[StateChange]) -> Vec<StateChange> {
        let mut changed = Vec::new();
        self.tx.send_if_modified(|state| {
            let before = state.heating_cooling_mode();
            for change in update {
                if state.apply(change) {
                    changed.push(change.clone());
                }
            }
            let after = state.heating_cooling_mode();
            if before != after {
                changed.push(StateChange::HeatingCoolingMode(after));
            }
            !changed.is_empty()
        });
        changed
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}
