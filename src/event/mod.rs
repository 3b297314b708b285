// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for thermostat state changes.
//!
//! Every change recorded by a device's state store is published on an
//! [`EventBus`] as a [`DeviceEvent::StateChanged`], together with the full
//! state after the change. Any number of subscribers (a UI, an automation
//! engine, a logger) can listen.
//!
//! # Examples
//!
//! ```
//! use thermoreg_lib::event::{DeviceId, DeviceEvent, EventBus};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! let device_id = DeviceId::new();
//! bus.publish(DeviceEvent::replay_failed(device_id, "command rejected"));
//! assert_eq!(rx.try_recv().unwrap().device_id(), device_id);
//! ```

mod device_event;
mod device_id;
mod event_bus;

pub use device_event::DeviceEvent;
pub use device_id::DeviceId;
pub use event_bus::EventBus;
pub(crate) use event_bus::DEFAULT_EVENT_CAPACITY;
