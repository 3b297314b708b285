// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `ThermoReg` Lib - reconciling thermostat intents with combined
//! thermoregulation codes.
//!
//! OpenWebNet-style thermostat zones expose their operation mode (auto,
//! manual, protection, off) and their thermal function (heating, cooling,
//! generic) only through one combined code, and every setpoint write has to
//! carry that code. This library keeps a per-zone state cache fed by inbound
//! status messages and turns user intents into the right commands, parking an
//! intent behind a status request when the state it depends on is not known
//! yet.
//!
//! # Supported Features
//!
//! - **Code tables**: bidirectional mapping between codes and (mode, function)
//! - **State cache**: per-zone state with change detection and watch channels
//! - **Decoding**: mode reports, temperatures, setpoint, local offset, actuators
//! - **Reconciliation**: single-slot pending intent, replayed on status
//! - **Management**: many zones over one transport, with a broadcast event bus
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//!
//! use thermoreg_lib::codes::ProtocolCode;
//! use thermoreg_lib::manager::{DeviceConfig, ThermostatManager};
//! use thermoreg_lib::message::InboundMessage;
//! use thermoreg_lib::protocol::RecordingTransport;
//! use thermoreg_lib::Address;
//!
//! #[tokio::main]
//! async fn main() -> thermoreg_lib::Result<()> {
//!     let transport = Arc::new(RecordingTransport::new());
//!     let manager = ThermostatManager::new(Arc::clone(&transport));
//!     let zone = manager.add_device(DeviceConfig::new().with_address("1")).await?;
//!
//!     // Nothing is known about the zone yet: the request waits for a status.
//!     let outcome = manager.set_setpoint(zone, 21.5).await?;
//!     assert!(outcome.is_deferred());
//!     assert_eq!(transport.frames(), vec!["*#4*1##"]);
//!
//!     // The zone answers "manual heating"; the setpoint goes out.
//!     manager
//!         .handle_message(&InboundMessage::mode_report(Address::new("1")?, ProtocolCode::new(110)))
//!         .await?;
//!     assert_eq!(transport.frames()[1], "*#4*1*#14*0215*110##");
//!     Ok(())
//! }
//! ```

pub mod codes;
pub mod command;
pub mod error;
pub mod event;
pub mod manager;
pub mod message;
pub mod protocol;
pub mod reconciler;
pub mod state;
pub mod types;

pub use command::{Command, ThermoCommand, encode_command};
pub use error::{ConfigError, Error, MalformedReading, Result, TransportError, ValueError};
pub use event::{DeviceEvent, DeviceId, EventBus};
pub use manager::{DeviceConfig, ManagerConfig, Thermostat, ThermostatManager};
pub use message::{InboundMessage, MessageDecoder};
pub use protocol::{Ack, RecordingTransport, Transport};
pub use reconciler::{Intent, Reconciler};
pub use state::{DeviceState, StateChange, StateField, StateStore};
pub use types::{
    Actuator, Address, HeatingCoolingMode, LocalOffsetMode, OperationMode, ThermalFunction,
};
