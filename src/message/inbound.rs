// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Inbound message types, as delivered by the framing layer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::codes::ProtocolCode;
use crate::types::Address;

/// Classification of a dimension report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DimensionTag {
    /// Measured zone temperature.
    Temperature,
    /// Temperature of an external probe.
    ProbeTemperature,
    /// Setpoint as stored by the central unit.
    Setpoint,
    /// Setpoint currently targeted by the zone (echo of the setpoint).
    Target,
    /// Local trim knob.
    LocalOffset,
    /// Status of the actuator with the given index.
    ActuatorStatus(u8),
}

impl fmt::Display for DimensionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temperature => f.write_str("temperature"),
            Self::ProbeTemperature => f.write_str("probe temperature"),
            Self::Setpoint => f.write_str("setpoint"),
            Self::Target => f.write_str("target"),
            Self::LocalOffset => f.write_str("local offset"),
            Self::ActuatorStatus(index) => write!(f, "actuator {index} status"),
        }
    }
}

/// One tagged value of a dimension report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    /// What the value measures.
    pub tag: DimensionTag,
    /// The raw value, still unparsed.
    pub payload: String,
}

impl Reading {
    /// Creates a reading.
    #[must_use]
    pub fn new(tag: DimensionTag, payload: impl Into<String>) -> Self {
        Self {
            tag,
            payload: payload.into(),
        }
    }
}

/// Content of an inbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageBody {
    /// The device echoes the combined code that is currently active.
    ModeReport(ProtocolCode),
    /// One or more dimension readings.
    Readings(Vec<Reading>),
}

/// A message received from one zone.
///
/// # Examples
///
/// ```
/// use thermoreg_lib::message::{DimensionTag, InboundMessage};
/// use thermoreg_lib::types::Address;
///
/// let zone = Address::new("1").unwrap();
/// let msg = InboundMessage::reading(zone, DimensionTag::Temperature, "20.5");
/// assert!(!msg.is_mode_report());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// The zone that sent the message.
    pub address: Address,
    /// The message content.
    pub body: MessageBody,
}

impl InboundMessage {
    /// Creates a mode report (command echo).
    #[must_use]
    pub fn mode_report(address: Address, code: ProtocolCode) -> Self {
        Self {
            address,
            body: MessageBody::ModeReport(code),
        }
    }

    /// Creates a message with a single reading.
    #[must_use]
    pub fn reading(address: Address, tag: DimensionTag, payload: impl Into<String>) -> Self {
        Self::readings(address, vec![Reading::new(tag, payload)])
    }

    /// Creates a message with several readings.
    #[must_use]
    pub fn readings(address: Address, readings: Vec<Reading>) -> Self {
        Self {
            address,
            body: MessageBody::Readings(readings),
        }
    }

    /// Returns `true` if this is a command echo.
    #[must_use]
    pub fn is_mode_report(&self) -> bool {
        matches!(self.body, MessageBody::ModeReport(_))
    }
}

impl fmt::Display for InboundMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.body {
            MessageBody::ModeReport(code) => write!(f, "[{}] mode {code}", self.address),
            MessageBody::Readings(readings) => {
                write!(f, "[{}]", self.address)?;
                for reading in readings {
                    write!(f, " {}={}", reading.tag, reading.payload)?;
                }
                Ok(())
            }
        }
    }
}
