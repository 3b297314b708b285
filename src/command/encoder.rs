// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outbound encoding of fully resolved intents.

use crate::codes;
use crate::error::{Error, ValueError};
use crate::types::{OperationMode, ThermalFunction};

use super::ThermoCommand;

/// Largest setpoint magnitude, in tenths, a frame can carry.
const MAX_SETPOINT_TENTHS: f64 = 999.0;

/// Rounds a setpoint to the tenth of a degree that goes on the wire.
///
/// # Errors
///
/// Returns `ValueError::NonFiniteSetpoint` for NaN or infinite values and
/// `ValueError::SetpointOutOfRange` when the rounded value is beyond ±99.9.
///
/// # Examples
///
/// ```
/// use thermoreg_lib::command::quantize_setpoint;
///
/// assert_eq!(quantize_setpoint(21.25), Ok(21.3));
/// assert!(quantize_setpoint(150.0).is_err());
/// ```
pub fn quantize_setpoint(value: f64) -> Result<f64, ValueError> {
    if !value.is_finite() {
        return Err(ValueError::NonFiniteSetpoint(value));
    }
    let tenths = (value * 10.0).round();
    if tenths.abs() > MAX_SETPOINT_TENTHS {
        return Err(ValueError::SetpointOutOfRange(value));
    }
    Ok(tenths / 10.0)
}

/// Encodes a resolved (mode, function, setpoint) triple into a command.
///
/// - with a setpoint: [`ThermoCommand::WriteSetpoint`] carrying the combined
///   code of `mode` and `function`
/// - without a setpoint: [`ThermoCommand::SetMode`], or
///   [`ThermoCommand::TurnOff`] for `Off` with no known function
///
/// # Errors
///
/// Returns `Error::UnsupportedIntent` when the code tables have no entry for
/// the pair (e.g. `Auto`), and a [`ValueError`] for setpoints rejected by
/// [`quantize_setpoint`]. An accepted setpoint is stored rounded to a tenth.
///
/// # Examples
///
/// ```
/// use thermoreg_lib::command::{encode_command, ThermoCommand};
/// use thermoreg_lib::codes::ProtocolCode;
/// use thermoreg_lib::types::{OperationMode, ThermalFunction};
///
/// let cmd = encode_command(OperationMode::Manual, ThermalFunction::Heat, Some(21.5)).unwrap();
/// assert_eq!(
///     cmd,
///     ThermoCommand::WriteSetpoint { code: ProtocolCode::new(110), setpoint: 21.5 }
/// );
///
/// assert!(encode_command(OperationMode::Auto, ThermalFunction::Heat, None).is_err());
/// ```
pub fn encode_command(
    mode: OperationMode,
    function: ThermalFunction,
    setpoint: Option<f64>,
) -> Result<ThermoCommand, Error> {
    match setpoint {
        Some(value) => Ok(ThermoCommand::WriteSetpoint {
            code: codes::encode(mode, function)?,
            setpoint: quantize_setpoint(value)?,
        }),
        None if mode == OperationMode::Off && !function.is_known() => Ok(ThermoCommand::TurnOff),
        None => Ok(ThermoCommand::SetMode {
            code: codes::encode(mode, function)?,
        }),
    }
}
