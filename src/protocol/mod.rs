// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Link-layer collaborator used to reach zones.
//!
//! The reconciler only needs two operations: send a command and send a status
//! request. Both are fire-and-forget: success means the link accepted the
//! frame, not that the zone complied. The zone's answer, if any, arrives later
//! as an [`InboundMessage`](crate::message::InboundMessage).
//!
//! [`RecordingTransport`] is an in-memory implementation that records every
//! frame, useful for dry runs and tests.

mod recording;

pub use recording::{RecordingTransport, SentFrame};

use crate::command::ThermoCommand;
use crate::error::TransportError;
use crate::types::Address;

/// Link-level answer to a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ack {
    /// The link accepted the command.
    Ack,
    /// The link refused the command.
    Nack,
}

impl Ack {
    /// Returns `true` for [`Ack::Ack`].
    #[must_use]
    pub fn is_ack(&self) -> bool {
        matches!(self, Self::Ack)
    }
}

/// Trait for links that can deliver frames to thermoregulation zones.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Sends a command to the zone at `address`.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the link failed.
    async fn send(&self, address: &Address, command: &ThermoCommand)
    -> Result<Ack, TransportError>;

    /// Asks the zone at `address` to report its status.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the link failed.
    async fn send_status_request(&self, address: &Address) -> Result<(), TransportError>;
}
