// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermoregulation command definitions.
//!
//! # Available Commands
//!
//! | Command | Purpose | Frame |
//! |---------|---------|-------|
//! | [`ThermoCommand::SetMode`] | Switch mode/function | `*4*<code>*<where>##` |
//! | [`ThermoCommand::WriteSetpoint`] | Write setpoint with a mode/function code | `*#4*<where>*#14*<TTTT>*<code>##` |
//! | [`ThermoCommand::TurnOff`] | Switch the zone off | `*4*4*<where>##` |
//! | [`ThermoCommand::RequestStatus`] | Ask the zone to report | `*#4*<where>##` |
//!
//! # Examples
//!
//! ```
//! use thermoreg_lib::command::{Command, ThermoCommand};
//! use thermoreg_lib::codes::ProtocolCode;
//! use thermoreg_lib::types::Address;
//!
//! let zone = Address::new("1").unwrap();
//! let cmd = ThermoCommand::WriteSetpoint {
//!     code: ProtocolCode::new(110),
//!     setpoint: 21.5,
//! };
//! assert_eq!(cmd.to_frame(&zone), "*#4*1*#14*0215*110##");
//! ```

mod encoder;

pub use encoder::{encode_command, quantize_setpoint};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::codes::{self, ProtocolCode};
use crate::types::Address;

/// A command that can be sent to a thermoregulation zone.
///
/// Implementors only describe the `WHAT`/`DIM` part; the address is supplied
/// when rendering so the same command can target any zone.
pub trait Command {
    /// Returns the combined protocol code carried by the command, if any.
    fn code(&self) -> Option<ProtocolCode>;

    /// Renders the textual frame for `address`.
    fn to_frame(&self, address: &Address) -> String;
}

/// Outbound thermoregulation commands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ThermoCommand {
    /// Switch to the mode/function pair encoded by `code`.
    SetMode {
        /// The combined code.
        code: ProtocolCode,
    },
    /// Write a setpoint together with the mode/function it applies to.
    WriteSetpoint {
        /// The combined code.
        code: ProtocolCode,
        /// Setpoint in °C.
        setpoint: f64,
    },
    /// Switch the zone off regardless of its function.
    TurnOff,
    /// Ask the zone to report its full status.
    RequestStatus,
}

impl ThermoCommand {
    /// Returns `true` for [`ThermoCommand::RequestStatus`].
    #[must_use]
    pub fn is_status_request(&self) -> bool {
        matches!(self, Self::RequestStatus)
    }

    /// Returns the setpoint carried by the command, if any.
    #[must_use]
    pub fn setpoint(&self) -> Option<f64> {
        match self {
            Self::WriteSetpoint { setpoint, .. } => Some(*setpoint),
            _ => None,
        }
    }
}

impl Command for ThermoCommand {
    fn code(&self) -> Option<ProtocolCode> {
        match self {
            Self::SetMode { code } | Self::WriteSetpoint { code, .. } => Some(*code),
            Self::TurnOff => Some(codes::TURN_OFF),
            Self::RequestStatus => None,
        }
    }

    fn to_frame(&self, address: &Address) -> String {
        match self {
            Self::SetMode { code } => format!("*4*{code}*{address}##"),
            Self::WriteSetpoint { code, setpoint } => {
                format!(
                    "*#4*{address}*#14*{}*{code}##",
                    encode_temperature(*setpoint)
                )
            }
            Self::TurnOff => format!("*4*{}*{address}##", codes::TURN_OFF),
            Self::RequestStatus => format!("*#4*{address}##"),
        }
    }
}

impl fmt::Display for ThermoCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetMode { code } => write!(f, "set mode {code}"),
            Self::WriteSetpoint { code, setpoint } => {
                write!(f, "write setpoint {setpoint} with {code}")
            }
            Self::TurnOff => f.write_str("turn off"),
            Self::RequestStatus => f.write_str("request status"),
        }
    }
}

/// Encodes a temperature as four digits of tenths of a degree.
///
/// The first digit is the sign (`0` positive, `1` negative); the value is
/// rounded to the nearest tenth. [`encode_command`] rejects setpoints beyond
/// `999` tenths; a hand-built command is clamped there.
fn encode_temperature(value: f64) -> String {
    let sign = u8::from(value < 0.0);
    // Clamped to 0..=999 before the cast.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let tenths = (value.abs() * 10.0).round().min(999.0) as u16;
    format!("{sign}{tenths:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone() -> Address {
        Address::new("#2").unwrap()
    }

    #[test]
    fn set_mode_frame() {
        let cmd = ThermoCommand::SetMode {
            code: ProtocolCode::new(202),
        };
        assert_eq!(cmd.to_frame(&zone()), "*4*202*#2##");
        assert_eq!(cmd.code(), Some(ProtocolCode::new(202)));
    }

    #[test]
    fn turn_off_frame() {
        assert_eq!(ThermoCommand::TurnOff.to_frame(&zone()), "*4*4*#2##");
        assert_eq!(ThermoCommand::TurnOff.code(), Some(codes::TURN_OFF));
    }

    #[test]
    fn status_request_frame() {
        let cmd = ThermoCommand::RequestStatus;
        assert_eq!(cmd.to_frame(&zone()), "*#4*#2##");
        assert!(cmd.is_status_request());
        assert_eq!(cmd.code(), None);
    }

    #[test]
    fn temperature_encoding() {
        assert_eq!(encode_temperature(21.5), "0215");
        assert_eq!(encode_temperature(5.0), "0050");
        assert_eq!(encode_temperature(-3.2), "1032");
        assert_eq!(encode_temperature(19.04), "0190");
        assert_eq!(encode_temperature(250.0), "0999");
    }

    #[test]
    fn setpoint_accessor() {
        let cmd = ThermoCommand::WriteSetpoint {
            code: ProtocolCode::new(210),
            setpoint: 19.0,
        };
        assert_eq!(cmd.setpoint(), Some(19.0));
        assert_eq!(ThermoCommand::TurnOff.setpoint(), None);
        assert_eq!(cmd.to_string(), "write setpoint 19 with 210");
    }
}
