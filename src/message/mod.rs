// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Inbound status messages.
//!
//! Zones reveal their state only through asynchronous messages. Each message
//! is either a mode report (the device echoing the combined code that is
//! active) or a list of dimension readings (temperatures, setpoint, local
//! offset, actuator statuses). [`MessageDecoder`] turns them into
//! [`StateChange`](crate::state::StateChange)s.

mod decoder;
mod inbound;

pub use decoder::{DecodeResult, MessageDecoder};
pub use inbound::{DimensionTag, InboundMessage, MessageBody, Reading};
