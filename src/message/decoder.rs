// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoding of inbound messages into state changes.

use crate::codes;
use crate::error::MalformedReading;
use crate::state::{StateChange, StateField, StateStore};
use crate::types::{Actuator, LocalOffsetMode};

use super::{DimensionTag, InboundMessage, MessageBody, Reading};

/// Outcome of decoding one message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodeResult {
    /// Changes that were recorded by the state store.
    pub changes: Vec<StateChange>,
    /// Readings that could not be parsed; their fields kept their old value.
    pub errors: Vec<MalformedReading>,
}

impl DecodeResult {
    /// Returns `true` if some change targets `field`.
    #[must_use]
    pub fn touches(&self, field: StateField) -> bool {
        self.changes.iter().any(|c| c.field() == field)
    }
}

/// Turns inbound messages into [`StateChange`]s.
///
/// # Examples
///
/// ```
/// use thermoreg_lib::codes::ProtocolCode;
/// use thermoreg_lib::message::{InboundMessage, MessageDecoder};
/// use thermoreg_lib::state::StateStore;
/// use thermoreg_lib::types::{Address, OperationMode, ThermalFunction};
///
/// let store = StateStore::new();
/// let msg = InboundMessage::mode_report(Address::new("1").unwrap(), ProtocolCode::new(110));
///
/// let result = MessageDecoder::decode(&store, &msg);
/// assert!(result.errors.is_empty());
/// assert_eq!(store.get().operation_mode(), OperationMode::Manual);
/// assert_eq!(store.get().thermal_function(), ThermalFunction::Heat);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageDecoder;

impl MessageDecoder {
    /// Interprets a message without touching any state.
    ///
    /// Returns the update implied by the message and the readings that failed
    /// to parse.
    #[must_use]
    pub fn interpret(msg: &InboundMessage) -> (Vec<StateChange>, Vec<MalformedReading>) {
        match &msg.body {
            MessageBody::ModeReport(code) => {
                let (mode, function) = codes::decode_report(*code);
                if mode.is_none() && function.is_none() {
                    tracing::debug!(address = %msg.address, code = %code, "Mode not processed");
                }
                let update = mode
                    .map(StateChange::OperationMode)
                    .into_iter()
                    .chain(function.map(StateChange::ThermalFunction))
                    .collect();
                (update, Vec::new())
            }
            MessageBody::Readings(readings) => {
                let mut update = Vec::new();
                let mut errors = Vec::new();
                for reading in readings {
                    match interpret_reading(reading) {
                        Ok(changes) => update.extend(changes),
                        Err(e) => {
                            tracing::warn!(address = %msg.address, error = %e, "Malformed reading");
                            errors.push(e);
                        }
                    }
                }
                (update, errors)
            }
        }
    }

    /// Decodes a message and applies it to `store`.
    pub fn decode(store: &StateStore, msg: &InboundMessage) -> DecodeResult {
        let (update, errors) = Self::interpret(msg);
        let changes = store.apply(&update);
        if !changes.is_empty() {
            tracing::debug!(address = %msg.address, count = changes.len(), "State updated");
        }
        DecodeResult { changes, errors }
    }
}

fn interpret_reading(reading: &Reading) -> Result<Vec<StateChange>, MalformedReading> {
    let payload = reading.payload.as_str();
    match reading.tag {
        DimensionTag::Temperature | DimensionTag::ProbeTemperature => {
            let value = parse_temperature(StateField::AmbientTemperature, payload)?;
            Ok(vec![StateChange::AmbientTemperature(value)])
        }
        DimensionTag::Setpoint => {
            let value = parse_temperature(StateField::Setpoint, payload)?;
            Ok(vec![StateChange::Setpoint(value)])
        }
        DimensionTag::Target => {
            // A target report confirms the setpoint as well.
            let value = parse_temperature(StateField::Setpoint, payload)?;
            Ok(vec![
                StateChange::Setpoint(value),
                StateChange::TargetTemperature(value),
            ])
        }
        DimensionTag::LocalOffset => LocalOffsetMode::from_code(payload)
            .map(|offset| vec![StateChange::LocalOffset(offset)])
            .ok_or_else(|| {
                MalformedReading::new(StateField::LocalOffset, payload, "unrecognized offset code")
            }),
        DimensionTag::ActuatorStatus(index) => {
            let Some(actuator) = Actuator::from_index(index) else {
                tracing::trace!(index, "Ignoring status of untracked actuator");
                return Ok(Vec::new());
            };
            let status: u8 = payload.trim().parse().map_err(|_| {
                MalformedReading::new(StateField::Actuator(actuator), payload, "not a status code")
            })?;
            Ok(vec![StateChange::actuator(actuator, status == 1)])
        }
    }
}

fn parse_temperature(field: StateField, payload: &str) -> Result<f64, MalformedReading> {
    match payload.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(_) => Err(MalformedReading::new(field, payload, "not a finite number")),
        Err(e) => Err(MalformedReading::new(field, payload, e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::ProtocolCode;
    use crate::types::{Address, OperationMode, ThermalFunction};

    fn zone() -> Address {
        Address::new("1").unwrap()
    }

    #[test]
    fn same_message_twice_reports_changes_once() {
        let store = StateStore::new();
        let msg = InboundMessage::readings(
            zone(),
            vec![
                Reading::new(DimensionTag::Temperature, "20.4"),
                Reading::new(DimensionTag::Setpoint, "21"),
            ],
        );

        let first = MessageDecoder::decode(&store, &msg);
        let state_after_first = store.get();
        let second = MessageDecoder::decode(&store, &msg);

        assert_eq!(first.changes.len(), 2);
        assert!(second.changes.is_empty());
        assert_eq!(store.get(), state_after_first);
    }

    #[test]
    fn mode_report_with_single_axis_leaves_other_untouched() {
        let store = StateStore::new();
        store.apply(&[StateChange::OperationMode(OperationMode::Protection)]);

        let result = MessageDecoder::decode(
            &store,
            &InboundMessage::mode_report(zone(), ProtocolCode::new(3)),
        );

        assert!(result.touches(StateField::ThermalFunction));
        assert!(!result.touches(StateField::OperationMode));
        assert_eq!(store.get().operation_mode(), OperationMode::Protection);
        assert_eq!(store.get().thermal_function(), ThermalFunction::Generic);
    }

    #[test]
    fn unknown_code_records_nothing() {
        let store = StateStore::new();
        let result = MessageDecoder::decode(
            &store,
            &InboundMessage::mode_report(zone(), ProtocolCode::new(4242)),
        );

        assert_eq!(result, DecodeResult::default());
        assert_eq!(store.get(), crate::state::DeviceState::new());
    }

    #[test]
    fn report_only_variant_sets_auto() {
        let store = StateStore::new();
        MessageDecoder::decode(
            &store,
            &InboundMessage::mode_report(zone(), ProtocolCode::new(215)),
        );
        assert_eq!(store.get().operation_mode(), OperationMode::Auto);
        assert_eq!(store.get().thermal_function(), ThermalFunction::Cool);
    }

    #[test]
    fn malformed_reading_does_not_abort_the_rest() {
        let store = StateStore::new();
        let msg = InboundMessage::readings(
            zone(),
            vec![
                Reading::new(DimensionTag::Setpoint, "twenty"),
                Reading::new(DimensionTag::ProbeTemperature, "18.0"),
                Reading::new(DimensionTag::LocalOffset, "99"),
            ],
        );

        let result = MessageDecoder::decode(&store, &msg);

        assert_eq!(result.changes, vec![StateChange::AmbientTemperature(18.0)]);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.errors[0].field, StateField::Setpoint);
        assert_eq!(result.errors[1].field, StateField::LocalOffset);
        assert_eq!(store.get().setpoint(), None);
    }

    #[test]
    fn non_finite_temperature_is_malformed() {
        let (update, errors) = MessageDecoder::interpret(&InboundMessage::reading(
            zone(),
            DimensionTag::Temperature,
            "NaN",
        ));
        assert!(update.is_empty());
        assert_eq!(errors[0].field, StateField::AmbientTemperature);
    }

    #[test]
    fn target_feeds_setpoint_and_target() {
        let store = StateStore::new();
        MessageDecoder::decode(
            &store,
            &InboundMessage::reading(zone(), DimensionTag::Target, "22.5"),
        );

        let state = store.get();
        assert_eq!(state.setpoint(), Some(22.5));
        assert_eq!(state.target_temperature(), Some(22.5));
    }

    #[test]
    fn actuator_statuses() {
        let store = StateStore::new();
        let msg = InboundMessage::readings(
            zone(),
            vec![
                Reading::new(DimensionTag::ActuatorStatus(1), "1"),
                Reading::new(DimensionTag::ActuatorStatus(2), "0"),
                Reading::new(DimensionTag::ActuatorStatus(3), "1"),
            ],
        );

        let result = MessageDecoder::decode(&store, &msg);

        assert_eq!(result.changes.len(), 2);
        assert!(result.errors.is_empty());
        assert_eq!(store.get().actuator(Actuator::Heating), Some(true));
        assert_eq!(store.get().actuator(Actuator::Cooling), Some(false));
    }

    #[test]
    fn actuator_status_must_be_numeric() {
        let (_, errors) = MessageDecoder::interpret(&InboundMessage::reading(
            zone(),
            DimensionTag::ActuatorStatus(1),
            "on",
        ));
        assert_eq!(errors[0].field, StateField::Actuator(Actuator::Heating));
    }

    #[test]
    fn local_offset_label() {
        let store = StateStore::new();
        MessageDecoder::decode(
            &store,
            &InboundMessage::reading(zone(), DimensionTag::LocalOffset, "12"),
        );
        assert_eq!(store.get().local_offset(), Some(LocalOffsetMode::Minus2));
    }
}
