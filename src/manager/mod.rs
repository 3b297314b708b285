// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Manager for a set of thermostat zones.
//!
//! The [`ThermostatManager`] owns one [`Thermostat`] per zone, all sharing a
//! single [`Transport`](crate::protocol::Transport). It provides:
//!
//! - **Registration**: add and remove zones, from code or from a JSON
//!   [`ManagerConfig`]
//! - **Intents**: setpoint, operation mode and thermal function per zone
//! - **Routing**: inbound messages are delivered to the zone at their address
//! - **State tracking**: snapshots and watch receivers per zone
//! - **Event system**: every recorded change is broadcast as a
//!   [`DeviceEvent`](crate::event::DeviceEvent)
//!
//! # Examples
//!
//! ## Event Subscription
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use thermoreg_lib::event::DeviceEvent;
//! use thermoreg_lib::manager::ThermostatManager;
//! use thermoreg_lib::protocol::RecordingTransport;
//!
//! # fn example() {
//! let manager = ThermostatManager::new(Arc::new(RecordingTransport::new()));
//! let mut events = manager.subscribe();
//!
//! tokio::spawn(async move {
//!     while let Ok(event) = events.recv().await {
//!         match event {
//!             DeviceEvent::StateChanged { device_id, change, .. } => {
//!                 println!("{device_id:?}: {change}");
//!             }
//!             DeviceEvent::ReplayFailed { device_id, error } => {
//!                 eprintln!("{device_id:?}: {error}");
//!             }
//!             _ => {}
//!         }
//!     }
//! });
//! # }
//! ```
//!
//! ## Watching Zone State
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use thermoreg_lib::manager::{DeviceConfig, ThermostatManager};
//! use thermoreg_lib::protocol::RecordingTransport;
//!
//! # async fn example() -> thermoreg_lib::Result<()> {
//! let manager = ThermostatManager::new(Arc::new(RecordingTransport::new()));
//! let id = manager.add_device(DeviceConfig::new().with_address("1")).await?;
//!
//! if let Some(mut state_rx) = manager.watch_device(id).await {
//!     tokio::spawn(async move {
//!         while state_rx.changed().await.is_ok() {
//!             let state = state_rx.borrow();
//!             println!("Heating/cooling: {}", state.heating_cooling_mode());
//!         }
//!     });
//! }
//! # Ok(())
//! # }
//! ```

mod device_config;
mod device_manager;
mod thermostat;

pub use device_config::{DeviceConfig, ManagerConfig};
pub use device_manager::ThermostatManager;
pub use thermostat::Thermostat;
