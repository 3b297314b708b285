// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Manager coordinating many thermostat zones over one transport.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{RwLock, broadcast, watch};

use crate::error::{ConfigError, Error};
use crate::event::{DeviceEvent, DeviceId, EventBus};
use crate::message::InboundMessage;
use crate::protocol::Transport;
use crate::reconciler::{Intent, MessageOutcome, ReconcileState, SubmitOutcome};
use crate::state::DeviceState;
use crate::types::{Address, OperationMode, ThermalFunction};

use super::device_config::{DeviceConfig, ManagerConfig};
use super::thermostat::Thermostat;

/// Manager for a set of thermostat zones sharing one transport.
///
/// Each zone gets its own [`Thermostat`]; zones are independent and may be
/// driven concurrently. Inbound messages are routed to the zone whose
/// address they carry.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use thermoreg_lib::codes::ProtocolCode;
/// use thermoreg_lib::manager::{DeviceConfig, ThermostatManager};
/// use thermoreg_lib::message::InboundMessage;
/// use thermoreg_lib::protocol::RecordingTransport;
/// use thermoreg_lib::types::{Address, ThermalFunction};
///
/// #[tokio::main]
/// async fn main() -> thermoreg_lib::Result<()> {
///     let transport = Arc::new(RecordingTransport::new());
///     let manager = ThermostatManager::new(Arc::clone(&transport));
///
///     let id = manager
///         .add_device(DeviceConfig::new().with_address("1").with_friendly_name("Living"))
///         .await?;
///
///     manager
///         .handle_message(&InboundMessage::mode_report(
///             Address::new("1")?,
///             ProtocolCode::new(110),
///         ))
///         .await?;
///     assert_eq!(
///         manager.state(id).await.map(|s| s.thermal_function()),
///         Some(ThermalFunction::Heat)
///     );
///
///     manager.set_setpoint(id, 21.0).await?;
///     assert_eq!(transport.frames(), vec!["*#4*1*#14*0210*110##"]);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct ThermostatManager<T> {
    devices: Arc<RwLock<HashMap<DeviceId, Arc<Thermostat<T>>>>>,
    transport: Arc<T>,
    event_bus: EventBus,
}

impl<T: Transport> ThermostatManager<T> {
    /// Creates an empty manager.
    #[must_use]
    pub fn new(transport: Arc<T>) -> Self {
        Self::with_capacity(transport, crate::event::DEFAULT_EVENT_CAPACITY)
    }

    /// Creates an empty manager with a custom event bus capacity.
    #[must_use]
    pub fn with_capacity(transport: Arc<T>, event_capacity: usize) -> Self {
        Self {
            devices: Arc::new(RwLock::new(HashMap::new())),
            transport,
            event_bus: EventBus::with_capacity(event_capacity),
        }
    }

    /// Creates a manager and registers every configured zone.
    ///
    /// Returns the IDs in configuration order.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the configuration is invalid or two zones
    /// share an address.
    pub async fn from_config(
        transport: Arc<T>,
        config: &ManagerConfig,
    ) -> Result<(Self, Vec<DeviceId>), Error> {
        config.validate()?;
        let manager = Self::with_capacity(transport, config.event_capacity);
        let mut ids = Vec::with_capacity(config.devices.len());
        for device in &config.devices {
            ids.push(manager.add_device(device.clone()).await?);
        }
        Ok((manager, ids))
    }

    /// Returns the shared transport.
    #[must_use]
    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    // =========================================================================
    // Subscription
    // =========================================================================

    /// Subscribes to events of all managed zones.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DeviceEvent> {
        self.event_bus.subscribe()
    }

    /// Returns the number of active event subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.event_bus.subscriber_count()
    }

    // =========================================================================
    // Device Management
    // =========================================================================

    /// Registers a zone.
    ///
    /// A zone without an address is accepted; intents for it fail with
    /// `NoAddress`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the address is invalid or already taken.
    pub async fn add_device(&self, config: DeviceConfig) -> Result<DeviceId, Error> {
        let device_id = DeviceId::new();
        let thermostat = Thermostat::new(
            device_id,
            config,
            Arc::clone(&self.transport),
            self.event_bus.clone(),
        )?;

        let mut devices = self.devices.write().await;
        if let Some(address) = thermostat.address()
            && devices.values().any(|d| d.address() == Some(address))
        {
            return Err(ConfigError::InvalidValue {
                field: "address".to_string(),
                message: format!("address {address} is already registered"),
            }
            .into());
        }
        tracing::debug!(device = %device_id, name = %thermostat.display_name(), "Device added");
        devices.insert(device_id, Arc::new(thermostat));
        drop(devices);

        self.event_bus.publish(DeviceEvent::device_added(device_id));
        Ok(device_id)
    }

    /// Unregisters a zone.
    ///
    /// Any parked intent is dropped with it. Returns `true` if the zone was
    /// found.
    pub async fn remove_device(&self, device_id: DeviceId) -> bool {
        let removed = self.devices.write().await.remove(&device_id).is_some();

        if removed {
            tracing::debug!(device = %device_id, "Device removed");
            self.event_bus.publish(DeviceEvent::device_removed(device_id));
        }

        removed
    }

    /// Returns a list of all device IDs.
    pub async fn device_ids(&self) -> Vec<DeviceId> {
        self.devices.read().await.keys().copied().collect()
    }

    /// Returns the number of managed zones.
    pub async fn device_count(&self) -> usize {
        self.devices.read().await.len()
    }

    /// Returns the thermostat for a device.
    pub async fn device(&self, device_id: DeviceId) -> Option<Arc<Thermostat<T>>> {
        self.devices.read().await.get(&device_id).cloned()
    }

    /// Finds the zone registered under `address`.
    pub async fn find_by_address(&self, address: &Address) -> Option<DeviceId> {
        self.devices
            .read()
            .await
            .values()
            .find(|d| d.address() == Some(address))
            .map(|d| d.id())
    }

    /// Returns the display name of a device.
    pub async fn friendly_name(&self, device_id: DeviceId) -> Option<String> {
        self.device(device_id).await.map(|d| d.display_name())
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Returns a snapshot of a device's state.
    pub async fn state(&self, device_id: DeviceId) -> Option<DeviceState> {
        self.device(device_id).await.map(|d| d.state())
    }

    /// Returns a watch receiver for a device's state.
    pub async fn watch_device(
        &self,
        device_id: DeviceId,
    ) -> Option<watch::Receiver<DeviceState>> {
        self.device(device_id).await.map(|d| d.watch())
    }

    /// Returns the reconciliation state of a device.
    pub async fn reconcile_state(&self, device_id: DeviceId) -> Option<ReconcileState> {
        let device = self.device(device_id).await?;
        Some(device.reconcile_state().await)
    }

    // =========================================================================
    // Intents
    // =========================================================================

    /// Submits an intent to a device.
    ///
    /// # Errors
    ///
    /// Returns `Error::DeviceNotFound` for an unknown ID, otherwise see
    /// [`Reconciler::submit`](crate::reconciler::Reconciler::submit).
    pub async fn submit(
        &self,
        device_id: DeviceId,
        intent: Intent,
    ) -> Result<SubmitOutcome, Error> {
        let device = self.device(device_id).await.ok_or(Error::DeviceNotFound)?;
        device.submit(intent).await
    }

    /// Sets the target temperature.
    ///
    /// # Errors
    ///
    /// See [`submit`](Self::submit).
    pub async fn set_setpoint(
        &self,
        device_id: DeviceId,
        setpoint: f64,
    ) -> Result<SubmitOutcome, Error> {
        self.submit(device_id, Intent::SetSetpoint(setpoint)).await
    }

    /// Sets the operation mode.
    ///
    /// # Errors
    ///
    /// See [`submit`](Self::submit).
    pub async fn set_operation_mode(
        &self,
        device_id: DeviceId,
        mode: OperationMode,
    ) -> Result<SubmitOutcome, Error> {
        self.submit(device_id, Intent::SetOperationMode(mode)).await
    }

    /// Sets the thermal function.
    ///
    /// # Errors
    ///
    /// See [`submit`](Self::submit).
    pub async fn set_thermal_function(
        &self,
        device_id: DeviceId,
        function: ThermalFunction,
    ) -> Result<SubmitOutcome, Error> {
        self.submit(device_id, Intent::SetThermalFunction(function)).await
    }

    /// Asks a device to report its state.
    ///
    /// # Errors
    ///
    /// Returns `Error::DeviceNotFound`, `Error::NoAddress` or
    /// `Error::Transport`.
    pub async fn refresh(&self, device_id: DeviceId) -> Result<(), Error> {
        let device = self.device(device_id).await.ok_or(Error::DeviceNotFound)?;
        device.refresh().await
    }

    /// Asks every addressed zone to report its state.
    ///
    /// Returns the zones whose request failed.
    pub async fn refresh_all(&self) -> Vec<(DeviceId, Error)> {
        let devices: Vec<_> = self.devices.read().await.values().cloned().collect();
        let mut failures = Vec::new();
        for device in devices.iter().filter(|d| d.address().is_some()) {
            if let Err(e) = device.refresh().await {
                tracing::warn!(device = %device.id(), error = %e, "Refresh failed");
                failures.push((device.id(), e));
            }
        }
        failures
    }

    // =========================================================================
    // Inbound
    // =========================================================================

    /// Routes an inbound message to the zone at its address.
    ///
    /// # Errors
    ///
    /// Returns `Error::DeviceNotFound` if no zone has that address; the
    /// message is dropped.
    pub async fn handle_message(&self, msg: &InboundMessage) -> Result<MessageOutcome, Error> {
        let device = self
            .devices
            .read()
            .await
            .values()
            .find(|d| d.address() == Some(&msg.address))
            .cloned();
        let Some(device) = device else {
            tracing::trace!(address = %msg.address, "Message for unmanaged zone");
            return Err(Error::DeviceNotFound);
        };
        Ok(device.handle_message(msg).await)
    }
}

impl<T> Clone for ThermostatManager<T> {
    fn clone(&self) -> Self {
        Self {
            devices: Arc::clone(&self.devices),
            transport: Arc::clone(&self.transport),
            event_bus: self.event_bus.clone(),
        }
    }
}
