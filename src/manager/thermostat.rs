// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A registered thermostat zone.

use std::sync::Arc;

use tokio::sync::{Mutex, watch};

use crate::error::Error;
use crate::event::{DeviceEvent, DeviceId, EventBus};
use crate::message::InboundMessage;
use crate::protocol::Transport;
use crate::reconciler::{Intent, MessageOutcome, ReconcileState, Reconciler, SubmitOutcome};
use crate::state::DeviceState;
use crate::types::Address;

use super::device_config::DeviceConfig;

/// One thermostat zone under management.
///
/// Every intent and every inbound message for the zone runs under one
/// async mutex around its [`Reconciler`], so the state and the pending
/// intent change together. Readers go through the watch channel and never
/// take that lock.
#[derive(Debug)]
pub struct Thermostat<T> {
    id: DeviceId,
    config: DeviceConfig,
    address: Option<Address>,
    reconciler: Mutex<Reconciler>,
    state_rx: watch::Receiver<DeviceState>,
    transport: Arc<T>,
    event_bus: EventBus,
}

impl<T: Transport> Thermostat<T> {
    /// Creates a thermostat from its configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the configured address is invalid.
    pub(crate) fn new(
        id: DeviceId,
        config: DeviceConfig,
        transport: Arc<T>,
        event_bus: EventBus,
    ) -> Result<Self, Error> {
        let address = config.resolve_address()?;
        let reconciler = Reconciler::new(address.clone());
        let state_rx = reconciler.watch();
        Ok(Self {
            id,
            config,
            address,
            reconciler: Mutex::new(reconciler),
            state_rx,
            transport,
            event_bus,
        })
    }

    /// Returns the device ID.
    #[must_use]
    pub fn id(&self) -> DeviceId {
        self.id
    }

    /// Returns the zone address, if configured.
    #[must_use]
    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    /// Returns the configuration the thermostat was created from.
    #[must_use]
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Returns the friendly name if set, otherwise the address, otherwise
    /// the short device ID.
    #[must_use]
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.config.friendly_name {
            return name.clone();
        }
        match &self.address {
            Some(address) => address.to_string(),
            None => self.id.short(),
        }
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> DeviceState {
        self.state_rx.borrow().clone()
    }

    /// Returns a watch receiver for state updates.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<DeviceState> {
        self.state_rx.clone()
    }

    /// Returns the reconciliation state.
    pub async fn reconcile_state(&self) -> ReconcileState {
        *self.reconciler.lock().await.reconcile_state()
    }

    /// Submits an intent and publishes the resulting state changes.
    ///
    /// # Errors
    ///
    /// See [`Reconciler::submit`].
    pub async fn submit(&self, intent: Intent) -> Result<SubmitOutcome, Error> {
        let mut reconciler = self.reconciler.lock().await;
        let outcome = reconciler.submit(self.transport.as_ref(), intent).await;
        match &outcome {
            Ok(SubmitOutcome::Sent { changes, .. }) => {
                self.event_bus
                    .publish_changes(self.id, changes, &reconciler.device_state());
            }
            Ok(SubmitOutcome::Deferred { .. }) => {}
            Err(e) => {
                tracing::debug!(device = %self.id, intent = %intent, error = %e, "Intent failed");
            }
        }
        outcome
    }

    /// Handles an inbound message addressed to this zone.
    ///
    /// Publishes one [`DeviceEvent::StateChanged`] per recorded change and a
    /// [`DeviceEvent::ReplayFailed`] if a parked intent could not be sent.
    pub async fn handle_message(&self, msg: &InboundMessage) -> MessageOutcome {
        let mut reconciler = self.reconciler.lock().await;
        let outcome = reconciler.handle_message(self.transport.as_ref(), msg).await;
        if !outcome.changes.is_empty() {
            self.event_bus
                .publish_changes(self.id, &outcome.changes, &reconciler.device_state());
        }
        if let Some(error) = &outcome.replay_error {
            self.event_bus
                .publish(DeviceEvent::replay_failed(self.id, error.to_string()));
        }
        outcome
    }

    /// Sends a status request without parking an intent.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoAddress` or `Error::Transport`.
    pub async fn refresh(&self) -> Result<(), Error> {
        let reconciler = self.reconciler.lock().await;
        reconciler.refresh(self.transport.as_ref()).await
    }
}
