// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory transport that records outgoing frames.

use parking_lot::Mutex;

use crate::command::{Command, ThermoCommand};
use crate::error::TransportError;
use crate::types::Address;

use super::{Ack, Transport};

/// A frame handed to a [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct SentFrame {
    /// Destination zone.
    pub address: Address,
    /// The command; status requests are recorded as
    /// [`ThermoCommand::RequestStatus`].
    pub command: ThermoCommand,
}

impl SentFrame {
    /// Renders the textual frame.
    #[must_use]
    pub fn frame(&self) -> String {
        self.command.to_frame(&self.address)
    }
}

#[derive(Debug, Default)]
struct Inner {
    sent: Vec<SentFrame>,
    reply: Option<Ack>,
    failure: Option<TransportError>,
}

/// Transport that records frames instead of sending them.
///
/// By default every command is acknowledged. [`nack_commands`](Self::nack_commands)
/// and [`fail_with`](Self::fail_with) change that for subsequent calls.
/// Frames are recorded even when refused or failed.
///
/// # Examples
///
/// ```
/// use thermoreg_lib::command::ThermoCommand;
/// use thermoreg_lib::protocol::{Ack, RecordingTransport, Transport};
/// use thermoreg_lib::types::Address;
///
/// # #[tokio::main]
/// # async fn main() {
/// let transport = RecordingTransport::new();
/// let zone = Address::new("1").unwrap();
///
/// let ack = transport.send(&zone, &ThermoCommand::TurnOff).await.unwrap();
/// assert_eq!(ack, Ack::Ack);
/// assert_eq!(transport.frames(), vec!["*4*4*1##".to_string()]);
/// # }
/// ```
#[derive(Debug, Default)]
pub struct RecordingTransport {
    inner: Mutex<Inner>,
}

impl RecordingTransport {
    /// Creates a transport that acknowledges everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent commands answer with [`Ack::Nack`].
    pub fn nack_commands(&self) {
        self.inner.lock().reply = Some(Ack::Nack);
    }

    /// Makes subsequent calls fail with `error`.
    pub fn fail_with(&self, error: TransportError) {
        self.inner.lock().failure = Some(error);
    }

    /// Restores the default acknowledging behaviour.
    pub fn reset_behaviour(&self) {
        let mut inner = self.inner.lock();
        inner.reply = None;
        inner.failure = None;
    }

    /// Returns every recorded frame, in order.
    #[must_use]
    pub fn sent(&self) -> Vec<SentFrame> {
        self.inner.lock().sent.clone()
    }

    /// Returns recorded commands, excluding status requests.
    #[must_use]
    pub fn commands(&self) -> Vec<ThermoCommand> {
        self.inner
            .lock()
            .sent
            .iter()
            .map(|f| f.command)
            .filter(|c| !c.is_status_request())
            .collect()
    }

    /// Returns the number of recorded status requests.
    #[must_use]
    pub fn status_requests(&self) -> usize {
        self.inner
            .lock()
            .sent
            .iter()
            .filter(|f| f.command.is_status_request())
            .count()
    }

    /// Returns the rendered frames, in order.
    #[must_use]
    pub fn frames(&self) -> Vec<String> {
        self.inner.lock().sent.iter().map(SentFrame::frame).collect()
    }

    /// Forgets all recorded frames.
    pub fn clear(&self) {
        self.inner.lock().sent.clear();
    }

    fn record(&self, address: &Address, command: ThermoCommand) -> Result<Ack, TransportError> {
        let mut inner = self.inner.lock();
        let frame = SentFrame {
            address: address.clone(),
            command,
        };
        tracing::debug!(frame = %frame.frame(), "Recording frame");
        inner.sent.push(frame);
        match &inner.failure {
            Some(error) => Err(error.clone()),
            None => Ok(inner.reply.unwrap_or(Ack::Ack)),
        }
    }
}

impl Transport for RecordingTransport {
    async fn send(
        &self,
        address: &Address,
        command: &ThermoCommand,
    ) -> Result<Ack, TransportError> {
        self.record(address, *command)
    }

    async fn send_status_request(&self, address: &Address) -> Result<(), TransportError> {
        self.record(address, ThermoCommand::RequestStatus).map(|_| ())
    }
}
