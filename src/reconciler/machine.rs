// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The per-device command reconciliation state machine.

use tokio::sync::watch;

use crate::command::{Command, ThermoCommand, encode_command};
use crate::error::{Error, MalformedReading, TransportError};
use crate::message::{InboundMessage, MessageDecoder};
use crate::protocol::{Ack, Transport};
use crate::state::{DeviceState, StateChange, StateStore};
use crate::types::{Address, OperationMode, ThermalFunction};

use super::{Intent, PendingIntent};

/// Reconciliation state of one device.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ReconcileState {
    /// No intent waiting.
    #[default]
    Idle,
    /// A status request is outstanding and one intent waits for its answer.
    AwaitingStatus(PendingIntent),
}

impl ReconcileState {
    /// Returns `true` when no intent is waiting.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns the waiting intent, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&PendingIntent> {
        match self {
            Self::Idle => None,
            Self::AwaitingStatus(pending) => Some(pending),
        }
    }
}

/// Result of submitting an intent.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The command was sent and acknowledged by the link.
    Sent {
        /// The command that went out.
        command: ThermoCommand,
        /// Optimistic state changes recorded after the acknowledgement.
        changes: Vec<StateChange>,
    },
    /// The intent is parked until the device reports its state.
    Deferred {
        /// `false` when the intent replaced one that was already waiting on
        /// an outstanding request.
        status_requested: bool,
    },
}

impl SubmitOutcome {
    /// Returns the sent command, if any.
    #[must_use]
    pub fn command(&self) -> Option<ThermoCommand> {
        match self {
            Self::Sent { command, .. } => Some(*command),
            Self::Deferred { .. } => None,
        }
    }

    /// Returns `true` if the intent was parked.
    #[must_use]
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred { .. })
    }
}

/// Result of handling one inbound message.
#[derive(Debug, Default)]
pub struct MessageOutcome {
    /// Every recorded change: decoded ones first, then optimistic ones from a
    /// replayed intent.
    pub changes: Vec<StateChange>,
    /// Readings that could not be parsed.
    pub errors: Vec<MalformedReading>,
    /// Command sent by replaying the pending intent.
    pub replayed: Option<ThermoCommand>,
    /// Failure of the replay; the intent is dropped.
    pub replay_error: Option<Error>,
}

/// Reconciles user intents with the protocol's combined codes.
///
/// Owns the device's [`StateStore`] and at most one [`PendingIntent`]. An
/// intent whose encoding needs state that is still unknown is parked behind
/// a status request and replayed once the answer reports that state. A newer
/// intent replaces a parked one; there is no queue and no timeout.
///
/// All methods take `&mut self`: callers serialize access per device.
///
/// # Examples
///
/// ```
/// use thermoreg_lib::codes::ProtocolCode;
/// use thermoreg_lib::message::InboundMessage;
/// use thermoreg_lib::protocol::RecordingTransport;
/// use thermoreg_lib::reconciler::{Intent, Reconciler};
/// use thermoreg_lib::types::Address;
///
/// # #[tokio::main]
/// # async fn main() -> thermoreg_lib::Result<()> {
/// let zone = Address::new("1").unwrap();
/// let transport = RecordingTransport::new();
/// let mut reconciler = Reconciler::new(Some(zone.clone()));
///
/// // Function unknown: parked behind a status request.
/// let outcome = reconciler.submit(&transport, Intent::SetSetpoint(21.5)).await?;
/// assert!(outcome.is_deferred());
///
/// // The zone reports "manual heating": the setpoint goes out.
/// let msg = InboundMessage::mode_report(zone, ProtocolCode::new(110));
/// let outcome = reconciler.handle_message(&transport, &msg).await;
/// assert!(outcome.replayed.is_some());
/// assert!(reconciler.reconcile_state().is_idle());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Reconciler {
    address: Option<Address>,
    store: StateStore,
    state: ReconcileState,
}

impl Reconciler {
    /// Creates a reconciler for a device with fully unknown state.
    #[must_use]
    pub fn new(address: Option<Address>) -> Self {
        Self {
            address,
            store: StateStore::new(),
            state: ReconcileState::Idle,
        }
    }

    /// Returns the device address, if any.
    #[must_use]
    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    /// Returns a snapshot of the device state.
    #[must_use]
    pub fn device_state(&self) -> DeviceState {
        self.store.get()
    }

    /// Creates a watch receiver for device state updates.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<DeviceState> {
        self.store.watch()
    }

    /// Returns the reconciliation state.
    #[must_use]
    pub fn reconcile_state(&self) -> &ReconcileState {
        &self.state
    }

    /// Submits an intent.
    ///
    /// Sends the encoded command right away when the state it needs is known
    /// (or, for `Off`, unconditionally). Otherwise parks the intent: from
    /// `Idle` a status request is sent; while already awaiting status the
    /// parked intent is simply replaced.
    ///
    /// # Errors
    ///
    /// - `Error::NoAddress` if the device has no address
    /// - `Error::UnsupportedIntent` / `Error::Value` if the intent can never
    ///   be encoded
    /// - `Error::Transport` if the link failed or refused; the intent is
    ///   dropped
    pub async fn submit<T: Transport>(
        &mut self,
        transport: &T,
        intent: Intent,
    ) -> Result<SubmitOutcome, Error> {
        let address = self.address.clone().ok_or(Error::NoAddress)?;
        let snapshot = self.store.get();
        intent.validate(&snapshot)?;

        if intent.is_resolvable(&snapshot) {
            if let ReconcileState::AwaitingStatus(pending) = std::mem::take(&mut self.state) {
                tracing::debug!(
                    address = %address,
                    superseded = %pending.intent(),
                    intent = %intent,
                    "Pending intent superseded"
                );
            }
            let command = resolve(intent, &snapshot)?;
            let optimistic = optimistic_changes(intent, command, &snapshot);
            let changes = self.send(transport, &address, command, &optimistic).await?;
            return Ok(SubmitOutcome::Sent { command, changes });
        }

        if let ReconcileState::AwaitingStatus(pending) = &mut self.state {
            tracing::debug!(
                address = %address,
                replaced = %pending.intent(),
                intent = %intent,
                "Replacing pending intent"
            );
            *pending = PendingIntent::new(intent);
            return Ok(SubmitOutcome::Deferred {
                status_requested: false,
            });
        }

        transport
            .send_status_request(&address)
            .await
            .inspect_err(|e| {
                tracing::warn!(
                    address = %address,
                    error = %e,
                    intent = %intent,
                    "Status request failed"
                );
            })?;
        tracing::debug!(address = %address, intent = %intent, "Awaiting status");
        self.state = ReconcileState::AwaitingStatus(PendingIntent::new(intent));
        Ok(SubmitOutcome::Deferred {
            status_requested: true,
        })
    }

    /// Handles an inbound message for this device.
    ///
    /// Applies it to the state store and, if it reported the state a parked
    /// intent was waiting for, replays that intent exactly once.
    pub async fn handle_message<T: Transport>(
        &mut self,
        transport: &T,
        msg: &InboundMessage,
    ) -> MessageOutcome {
        let decoded = MessageDecoder::decode(&self.store, msg);
        let mut outcome = MessageOutcome {
            changes: decoded.changes,
            errors: decoded.errors,
            ..MessageOutcome::default()
        };

        let resumes = self
            .state
            .pending()
            .and_then(PendingIntent::awaits)
            .is_some_and(|field| outcome.changes.iter().any(|c| c.field() == field));
        if !resumes {
            return outcome;
        }

        let ReconcileState::AwaitingStatus(pending) = std::mem::take(&mut self.state) else {
            return outcome;
        };
        tracing::debug!(
            address = %msg.address,
            intent = %pending.intent(),
            "Replaying pending intent"
        );
        match self.submit(transport, pending.intent()).await {
            Ok(SubmitOutcome::Sent { command, changes }) => {
                outcome.replayed = Some(command);
                outcome.changes.extend(changes);
            }
            Ok(SubmitOutcome::Deferred { .. }) => {}
            Err(e) => outcome.replay_error = Some(e),
        }
        outcome
    }

    /// Asks the device to report its state, without parking an intent.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoAddress` or `Error::Transport`.
    pub async fn refresh<T: Transport>(&self, transport: &T) -> Result<(), Error> {
        let address = self.address.as_ref().ok_or(Error::NoAddress)?;
        transport.send_status_request(address).await?;
        Ok(())
    }

    async fn send<T: Transport>(
        &mut self,
        transport: &T,
        address: &Address,
        command: ThermoCommand,
        optimistic: &[StateChange],
    ) -> Result<Vec<StateChange>, Error> {
        let frame = command.to_frame(address);
        match transport.send(address, &command).await {
            Ok(Ack::Ack) => {
                tracing::debug!(address = %address, frame = %frame, "Command sent");
                Ok(self.store.apply(optimistic))
            }
            Ok(Ack::Nack) => {
                tracing::warn!(address = %address, frame = %frame, "Command rejected");
                Err(TransportError::Rejected(frame).into())
            }
            Err(e) => {
                tracing::warn!(address = %address, frame = %frame, error = %e, "Command failed");
                Err(e.into())
            }
        }
    }
}

/// Encodes an intent whose prerequisite is satisfied by `state`.
///
/// Setpoint and function writes from `Auto` or an unreported mode go out
/// with the `Manual` variant, which switches the zone to manual.
fn resolve(intent: Intent, state: &DeviceState) -> Result<ThermoCommand, Error> {
    let mode = writable_variant(state.operation_mode());
    match intent {
        Intent::SetSetpoint(value) => encode_command(mode, state.thermal_function(), Some(value)),
        Intent::SetThermalFunction(function) => encode_command(mode, function, state.setpoint()),
        Intent::SetOperationMode(OperationMode::Off) => Ok(ThermoCommand::TurnOff),
        Intent::SetOperationMode(target) => {
            // Heating is the default when the zone has not reported a function.
            let function = match state.thermal_function() {
                ThermalFunction::Unknown => ThermalFunction::Heat,
                known => known,
            };
            let setpoint = if target == OperationMode::Manual {
                state.setpoint()
            } else {
                None
            };
            encode_command(target, function, setpoint)
        }
    }
}

/// Mode whose command variant carries a setpoint write.
fn writable_variant(mode: OperationMode) -> OperationMode {
    match mode {
        OperationMode::Unknown | OperationMode::Auto => OperationMode::Manual,
        writable => writable,
    }
}

/// State the device is assumed to hold once `command` is acknowledged.
///
/// The setpoint is the rounded value the frame carried, not the raw intent.
fn optimistic_changes(
    intent: Intent,
    command: ThermoCommand,
    state: &DeviceState,
) -> Vec<StateChange> {
    let mut changes = Vec::with_capacity(2);
    match intent {
        Intent::SetSetpoint(value) => {
            changes.push(StateChange::Setpoint(command.setpoint().unwrap_or(value)));
        }
        Intent::SetOperationMode(mode) => changes.push(StateChange::OperationMode(mode)),
        Intent::SetThermalFunction(function) => {
            changes.push(StateChange::ThermalFunction(function));
        }
    }
    let current = state.operation_mode();
    if !matches!(intent, Intent::SetOperationMode(_)) && writable_variant(current) != current {
        changes.push(StateChange::OperationMode(OperationMode::Manual));
    }
    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::ProtocolCode;
    use crate::error::ValueError;
    use crate::message::DimensionTag;
    use crate::protocol::RecordingTransport;
    use crate::state::StateField;

    fn zone() -> Address {
        Address::new("1").unwrap()
    }

    fn reconciler() -> Reconciler {
        Reconciler::new(Some(zone()))
    }

    fn mode_report(code: u16) -> InboundMessage {
        InboundMessage::mode_report(zone(), ProtocolCode::new(code))
    }

    fn setpoint_report(value: &str) -> InboundMessage {
        InboundMessage::reading(zone(), DimensionTag::Setpoint, value)
    }

    #[tokio::test]
    async fn setpoint_with_known_function_is_sent_immediately() {
        let transport = RecordingTransport::new();
        let mut rec = reconciler();
        rec.handle_message(&transport, &mode_report(210)).await;

        let outcome = rec.submit(&transport, Intent::SetSetpoint(23.0)).await.unwrap();

        assert_eq!(
            outcome.command(),
            Some(ThermoCommand::WriteSetpoint {
                code: ProtocolCode::new(210),
                setpoint: 23.0
            })
        );
        assert_eq!(transport.status_requests(), 0);
        assert_eq!(rec.device_state().setpoint(), Some(23.0));
        assert!(rec.reconcile_state().is_idle());
    }

    #[tokio::test]
    async fn setpoint_uses_protection_variant_when_in_protection() {
        let transport = RecordingTransport::new();
        let mut rec = reconciler();
        rec.handle_message(&transport, &mode_report(102)).await;

        rec.submit(&transport, Intent::SetSetpoint(7.0)).await.unwrap();

        assert_eq!(
            transport.commands(),
            vec![ThermoCommand::WriteSetpoint {
                code: ProtocolCode::new(102),
                setpoint: 7.0
            }]
        );
    }

    #[tokio::test]
    async fn setpoint_from_auto_uses_manual_variant() {
        let transport = RecordingTransport::new();
        let mut rec = reconciler();
        rec.handle_message(&transport, &mode_report(311)).await;

        let outcome = rec.submit(&transport, Intent::SetSetpoint(20.0)).await.unwrap();

        assert_eq!(
            transport.commands(),
            vec![ThermoCommand::WriteSetpoint {
                code: ProtocolCode::new(310),
                setpoint: 20.0
            }]
        );
        let SubmitOutcome::Sent { changes, .. } = outcome else {
            panic!("expected the setpoint to be sent");
        };
        assert!(changes.contains(&StateChange::OperationMode(OperationMode::Manual)));
        assert_eq!(rec.device_state().operation_mode(), OperationMode::Manual);
    }

    #[tokio::test]
    async fn function_change_from_unreported_mode_records_manual() {
        let transport = RecordingTransport::new();
        let mut rec = reconciler();
        rec.handle_message(&transport, &setpoint_report("19.0")).await;

        rec.submit(&transport, Intent::SetThermalFunction(ThermalFunction::Cool))
            .await
            .unwrap();

        assert_eq!(
            transport.commands(),
            vec![ThermoCommand::WriteSetpoint {
                code: ProtocolCode::new(210),
                setpoint: 19.0
            }]
        );
        let state = rec.device_state();
        assert_eq!(state.operation_mode(), OperationMode::Manual);
        assert_eq!(state.thermal_function(), ThermalFunction::Cool);
    }

    #[tokio::test]
    async fn protection_setpoint_keeps_protection_mode() {
        let transport = RecordingTransport::new();
        let mut rec = reconciler();
        rec.handle_message(&transport, &mode_report(102)).await;

        let outcome = rec.submit(&transport, Intent::SetSetpoint(7.0)).await.unwrap();

        let SubmitOutcome::Sent { changes, .. } = outcome else {
            panic!("expected the setpoint to be sent");
        };
        assert_eq!(changes, vec![StateChange::Setpoint(7.0)]);
        assert_eq!(rec.device_state().operation_mode(), OperationMode::Protection);
    }

    #[tokio::test]
    async fn cached_setpoint_matches_encoded_tenth() {
        let transport = RecordingTransport::new();
        let mut rec = reconciler();
        rec.handle_message(&transport, &mode_report(110)).await;

        rec.submit(&transport, Intent::SetSetpoint(21.25)).await.unwrap();

        assert_eq!(transport.frames(), vec!["*#4*1*#14*0213*110##"]);
        assert_eq!(rec.device_state().setpoint(), Some(21.3));

        // The zone echoing the written value is not a change.
        let echo = rec.handle_message(&transport, &setpoint_report("21.3")).await;
        assert!(echo.changes.is_empty());
    }

    #[tokio::test]
    async fn out_of_range_setpoint_is_rejected_before_sending() {
        let transport = RecordingTransport::new();
        let mut rec = reconciler();
        rec.handle_message(&transport, &mode_report(110)).await;

        let err = rec
            .submit(&transport, Intent::SetSetpoint(150.0))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Value(ValueError::SetpointOutOfRange(_))
        ));
        assert!(transport.sent().is_empty());
        assert_eq!(rec.device_state().setpoint(), None);
    }

    #[tokio::test]
    async fn out_of_range_setpoint_is_not_parked() {
        let transport = RecordingTransport::new();
        let mut rec = reconciler();

        let err = rec
            .submit(&transport, Intent::SetSetpoint(-120.0))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Value(_)));
        assert_eq!(transport.status_requests(), 0);
        assert!(rec.reconcile_state().is_idle());
    }

    #[tokio::test]
    async fn unknown_function_defers_setpoint() {
        let transport = RecordingTransport::new();
        let mut rec = reconciler();

        let outcome = rec.submit(&transport, Intent::SetSetpoint(21.5)).await.unwrap();

        assert_eq!(
            outcome,
            SubmitOutcome::Deferred {
                status_requested: true
            }
        );
        assert!(transport.commands().is_empty());
        assert_eq!(transport.status_requests(), 1);
        assert_eq!(
            rec.reconcile_state().pending().map(PendingIntent::intent),
            Some(Intent::SetSetpoint(21.5))
        );
    }

    #[tokio::test]
    async fn deferred_setpoint_is_replayed_once() {
        let transport = RecordingTransport::new();
        let mut rec = reconciler();
        rec.submit(&transport, Intent::SetSetpoint(21.5)).await.unwrap();

        let outcome = rec.handle_message(&transport, &mode_report(1)).await;

        let expected = ThermoCommand::WriteSetpoint {
            code: ProtocolCode::new(110),
            setpoint: 21.5,
        };
        assert_eq!(outcome.replayed, Some(expected));
        assert!(outcome.changes.contains(&StateChange::Setpoint(21.5)));
        assert!(rec.reconcile_state().is_idle());

        // A second identical report changes nothing and replays nothing.
        let again = rec.handle_message(&transport, &mode_report(1)).await;
        assert!(again.replayed.is_none());
        assert_eq!(transport.commands(), vec![expected]);
    }

    #[tokio::test]
    async fn newer_intent_overwrites_pending_without_second_request() {
        let transport = RecordingTransport::new();
        let mut rec = reconciler();

        rec.submit(&transport, Intent::SetSetpoint(20.0)).await.unwrap();
        let outcome = rec.submit(&transport, Intent::SetSetpoint(22.0)).await.unwrap();

        assert_eq!(
            outcome,
            SubmitOutcome::Deferred {
                status_requested: false
            }
        );
        assert_eq!(transport.status_requests(), 1);

        rec.handle_message(&transport, &mode_report(110)).await;
        assert_eq!(
            transport.commands(),
            vec![ThermoCommand::WriteSetpoint {
                code: ProtocolCode::new(110),
                setpoint: 22.0
            }]
        );
    }

    #[tokio::test]
    async fn pending_intent_of_other_kind_is_replaced() {
        let transport = RecordingTransport::new();
        let mut rec = reconciler();

        rec.submit(&transport, Intent::SetSetpoint(20.0)).await.unwrap();
        rec.submit(&transport, Intent::SetThermalFunction(ThermalFunction::Cool))
            .await
            .unwrap();

        // The function report no longer resumes anything.
        let outcome = rec.handle_message(&transport, &mode_report(110)).await;
        assert!(outcome.replayed.is_none());
        assert!(!rec.reconcile_state().is_idle());

        let outcome = rec.handle_message(&transport, &setpoint_report("18.5")).await;
        assert_eq!(
            outcome.replayed,
            Some(ThermoCommand::WriteSetpoint {
                code: ProtocolCode::new(210),
                setpoint: 18.5
            })
        );
        assert_eq!(rec.device_state().thermal_function(), ThermalFunction::Cool);
    }

    #[tokio::test]
    async fn unrelated_change_keeps_intent_pending() {
        let transport = RecordingTransport::new();
        let mut rec = reconciler();
        rec.submit(&transport, Intent::SetSetpoint(20.0)).await.unwrap();

        let outcome = rec
            .handle_message(
                &transport,
                &InboundMessage::reading(zone(), DimensionTag::Temperature, "19.0"),
            )
            .await;

        assert_eq!(outcome.changes, vec![StateChange::AmbientTemperature(19.0)]);
        assert!(outcome.replayed.is_none());
        assert!(rec.reconcile_state().pending().is_some());
    }

    #[tokio::test]
    async fn off_is_sent_unconditionally() {
        let transport = RecordingTransport::new();
        let mut rec = reconciler();

        let outcome = rec
            .submit(&transport, Intent::SetOperationMode(OperationMode::Off))
            .await
            .unwrap();

        assert_eq!(outcome.command(), Some(ThermoCommand::TurnOff));
        assert_eq!(transport.status_requests(), 0);
        assert!(rec.reconcile_state().is_idle());
        assert_eq!(rec.device_state().operation_mode(), OperationMode::Off);
    }

    #[tokio::test]
    async fn off_supersedes_pending_intent() {
        let transport = RecordingTransport::new();
        let mut rec = reconciler();
        rec.submit(&transport, Intent::SetSetpoint(20.0)).await.unwrap();

        rec.submit(&transport, Intent::SetOperationMode(OperationMode::Off))
            .await
            .unwrap();
        assert!(rec.reconcile_state().is_idle());

        let outcome = rec.handle_message(&transport, &mode_report(103)).await;
        assert!(outcome.replayed.is_none());
        assert_eq!(transport.commands(), vec![ThermoCommand::TurnOff]);
    }

    #[tokio::test]
    async fn manual_mode_carries_cached_setpoint() {
        let transport = RecordingTransport::new();
        let mut rec = reconciler();
        rec.handle_message(&transport, &mode_report(203)).await;
        rec.handle_message(&transport, &setpoint_report("24.0")).await;

        rec.submit(&transport, Intent::SetOperationMode(OperationMode::Manual))
            .await
            .unwrap();

        assert_eq!(
            transport.commands(),
            vec![ThermoCommand::WriteSetpoint {
                code: ProtocolCode::new(210),
                setpoint: 24.0
            }]
        );
        assert_eq!(rec.device_state().operation_mode(), OperationMode::Manual);
    }

    #[tokio::test]
    async fn protection_mode_defaults_to_heating() {
        let transport = RecordingTransport::new();
        let mut rec = reconciler();
        rec.handle_message(&transport, &setpoint_report("20.0")).await;

        rec.submit(&transport, Intent::SetOperationMode(OperationMode::Protection))
            .await
            .unwrap();

        assert_eq!(
            transport.commands(),
            vec![ThermoCommand::SetMode {
                code: ProtocolCode::new(102)
            }]
        );
    }

    #[tokio::test]
    async fn mode_without_setpoint_is_deferred() {
        let transport = RecordingTransport::new();
        let mut rec = reconciler();

        let outcome = rec
            .submit(&transport, Intent::SetOperationMode(OperationMode::Protection))
            .await
            .unwrap();

        assert!(outcome.is_deferred());
        assert_eq!(
            rec.reconcile_state().pending().and_then(PendingIntent::awaits),
            Some(StateField::Setpoint)
        );
    }

    #[tokio::test]
    async fn auto_is_rejected_synchronously() {
        let transport = RecordingTransport::new();
        let mut rec = reconciler();

        let err = rec
            .submit(&transport, Intent::SetOperationMode(OperationMode::Auto))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::UnsupportedIntent { .. }));
        assert!(transport.sent().is_empty());
        assert!(rec.reconcile_state().is_idle());
    }

    #[tokio::test]
    async fn missing_address_is_rejected() {
        let transport = RecordingTransport::new();
        let mut rec = Reconciler::new(None);

        let err = rec
            .submit(&transport, Intent::SetSetpoint(20.0))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NoAddress));
        assert!(rec.reconcile_state().is_idle());
        assert!(matches!(rec.refresh(&transport).await, Err(Error::NoAddress)));
    }

    #[tokio::test]
    async fn nack_drops_intent_without_optimistic_update() {
        let transport = RecordingTransport::new();
        let mut rec = reconciler();
        rec.handle_message(&transport, &mode_report(110)).await;
        transport.nack_commands();

        let err = rec
            .submit(&transport, Intent::SetSetpoint(25.0))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Transport(TransportError::Rejected(_))));
        assert_eq!(rec.device_state().setpoint(), None);
    }

    #[tokio::test]
    async fn failed_status_request_stays_idle() {
        let transport = RecordingTransport::new();
        transport.fail_with(TransportError::ConnectionFailed("down".to_string()));
        let mut rec = reconciler();

        let err = rec
            .submit(&transport, Intent::SetSetpoint(20.0))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Transport(_)));
        assert!(rec.reconcile_state().is_idle());
    }

    #[tokio::test]
    async fn replay_failure_is_reported_and_intent_dropped() {
        let transport = RecordingTransport::new();
        let mut rec = reconciler();
        rec.submit(&transport, Intent::SetSetpoint(20.0)).await.unwrap();
        transport.nack_commands();

        let outcome = rec.handle_message(&transport, &mode_report(110)).await;

        assert!(outcome.replayed.is_none());
        assert!(matches!(
            outcome.replay_error,
            Some(Error::Transport(TransportError::Rejected(_)))
        ));
        assert!(rec.reconcile_state().is_idle());
    }

    #[tokio::test]
    async fn refresh_sends_status_request_only() {
        let transport = RecordingTransport::new();
        let rec = reconciler();

        rec.refresh(&transport).await.unwrap();

        assert_eq!(transport.frames(), vec!["*#4*1##"]);
        assert!(rec.reconcile_state().is_idle());
    }
}
