// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Protocol code tables.
//!
//! Thermoregulation frames carry a single `WHAT` code that entangles the
//! operation mode and the thermal function. This module maps between those
//! flat codes and the orthogonal ([`OperationMode`], [`ThermalFunction`])
//! pair using two plain tables:
//!
//! - the command family (manual/protection/off plus the bare function codes),
//!   used by [`decode`] and [`encode`]
//! - the report-only family (weekly program and holiday variants), added by
//!   [`decode_report`]
//!
//! | Code | Mode | Function | Writable |
//! |------|------|----------|----------|
//! | `0` / `1` / `3` | Manual / Manual / - | Cool / Heat / Generic | no |
//! | `4` | Off | - | turn-off |
//! | `102` / `202` / `302` | Protection | Heat / Cool / Generic | yes |
//! | `103` / `203` / `303` | Off | Heat / Cool / Generic | yes |
//! | `110` / `210` / `310` | Manual | Heat / Cool / Generic | yes |
//! | `111` / `211` / `311` | Auto | Heat / Cool / Generic | no |
//! | `1101`-`1103`, `2101`-`2103`, `3101`-`3103` | Auto | Heat / Cool / Generic | no |
//! | `115` / `215` / `315` | Auto | Heat / Cool / Generic | no |
//!
//! Codes absent from the tables decode to `(None, None)`.
//!
//! # Examples
//!
//! ```
//! use thermoreg_lib::codes::{self, ProtocolCode};
//! use thermoreg_lib::types::{OperationMode, ThermalFunction};
//!
//! let code = codes::encode(OperationMode::Manual, ThermalFunction::Cool).unwrap();
//! assert_eq!(code, ProtocolCode::new(210));
//! assert_eq!(
//!     codes::decode(code),
//!     (Some(OperationMode::Manual), Some(ThermalFunction::Cool))
//! );
//! assert_eq!(codes::decode(ProtocolCode::new(9999)), (None, None));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, ValueError};
use crate::types::{OperationMode, ThermalFunction};

/// An opaque `WHAT` value of a thermoregulation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProtocolCode(u16);

impl ProtocolCode {
    /// Creates a code from its numeric value.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for ProtocolCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProtocolCode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u16>()
            .map(Self)
            .map_err(|_| ValueError::UnknownLabel(s.to_string()))
    }
}

/// Dedicated function-less "turn off" command.
pub const TURN_OFF: ProtocolCode = ProtocolCode(4);

/// One row of a code table.
#[derive(Debug, Clone, Copy)]
struct CodeEntry {
    code: u16,
    mode: Option<OperationMode>,
    function: Option<ThermalFunction>,
    writable: bool,
}

const fn entry(
    code: u16,
    mode: Option<OperationMode>,
    function: Option<ThermalFunction>,
    writable: bool,
) -> CodeEntry {
    CodeEntry {
        code,
        mode,
        function,
        writable,
    }
}

use OperationMode::{Auto, Manual, Off, Protection};
use ThermalFunction::{Cool, Generic, Heat};

const COMMAND_TABLE: &[CodeEntry] = &[
    // Bare function reports
    entry(0, Some(Manual), Some(Cool), false),
    entry(1, Some(Manual), Some(Heat), false),
    entry(3, None, Some(Generic), false),
    entry(TURN_OFF.0, Some(Off), None, false),
    entry(102, Some(Protection), Some(Heat), true),
    entry(202, Some(Protection), Some(Cool), true),
    entry(302, Some(Protection), Some(Generic), true),
    entry(103, Some(Off), Some(Heat), true),
    entry(203, Some(Off), Some(Cool), true),
    entry(303, Some(Off), Some(Generic), true),
    entry(110, Some(Manual), Some(Heat), true),
    entry(210, Some(Manual), Some(Cool), true),
    entry(310, Some(Manual), Some(Generic), true),
];

const REPORT_TABLE: &[CodeEntry] = &[
    // Program
    entry(111, Some(Auto), Some(Heat), false),
    entry(211, Some(Auto), Some(Cool), false),
    entry(311, Some(Auto), Some(Generic), false),
    // Weekly program N
    entry(1101, Some(Auto), Some(Heat), false),
    entry(1102, Some(Auto), Some(Heat), false),
    entry(1103, Some(Auto), Some(Heat), false),
    entry(2101, Some(Auto), Some(Cool), false),
    entry(2102, Some(Auto), Some(Cool), false),
    entry(2103, Some(Auto), Some(Cool), false),
    entry(3101, Some(Auto), Some(Generic), false),
    entry(3102, Some(Auto), Some(Generic), false),
    entry(3103, Some(Auto), Some(Generic), false),
    // Holiday
    entry(115, Some(Auto), Some(Heat), false),
    entry(215, Some(Auto), Some(Cool), false),
    entry(315, Some(Auto), Some(Generic), false),
];

fn lookup(table: &[CodeEntry], code: ProtocolCode) -> Option<&CodeEntry> {
    table.iter().find(|e| e.code == code.0)
}

/// Decodes a command-family code.
///
/// Either side may be `None` when the code only disambiguates one axis;
/// unknown codes yield `(None, None)`.
#[must_use]
pub fn decode(code: ProtocolCode) -> (Option<OperationMode>, Option<ThermalFunction>) {
    lookup(COMMAND_TABLE, code).map_or((None, None), |e| (e.mode, e.function))
}

/// Decodes a code found in a status report.
///
/// Same as [`decode`], plus the program and holiday variants that only
/// devices emit. Variants not listed in the tables yield `(None, None)`.
#[must_use]
pub fn decode_report(code: ProtocolCode) -> (Option<OperationMode>, Option<ThermalFunction>) {
    lookup(COMMAND_TABLE, code)
        .or_else(|| lookup(REPORT_TABLE, code))
        .map_or((None, None), |e| (e.mode, e.function))
}

/// Encodes a writable (mode, function) pair.
///
/// Total over {Manual, Protection, Off} × {Heat, Cool, Generic}. Use
/// [`TURN_OFF`] to switch a zone off without naming a function.
///
/// # Errors
///
/// Returns `Error::UnsupportedIntent` for `Auto`, `Unknown` mode or
/// `Unknown` function.
pub fn encode(mode: OperationMode, function: ThermalFunction) -> Result<ProtocolCode, Error> {
    COMMAND_TABLE
        .iter()
        .find(|e| e.writable && e.mode == Some(mode) && e.function == Some(function))
        .map(|e| ProtocolCode(e.code))
        .ok_or(Error::UnsupportedIntent { mode, function })
}

#[cfg(test)]
mod tests {
    use super::*;

    const WRITABLE_MODES: [OperationMode; 3] = [Manual, Protection, Off];
    const FUNCTIONS: [ThermalFunction; 3] = [Heat, Cool, Generic];

    #[test]
    fn encode_then_decode_is_identity_on_writable_domain() {
        for mode in WRITABLE_MODES {
            for function in FUNCTIONS {
                let code = encode(mode, function).unwrap();
                assert_eq!(decode(code), (Some(mode), Some(function)), "code {code}");
            }
        }
    }

    #[test]
    fn turn_off_decodes_without_function() {
        assert_eq!(decode(TURN_OFF), (Some(Off), None));
    }

    #[test]
    fn auto_is_not_writable() {
        for function in FUNCTIONS {
            assert!(matches!(
                encode(Auto, function),
                Err(Error::UnsupportedIntent { mode: Auto, .. })
            ));
        }
    }

    #[test]
    fn unknown_axes_are_not_writable() {
        assert!(encode(OperationMode::Unknown, Heat).is_err());
        assert!(encode(Manual, ThermalFunction::Unknown).is_err());
    }

    #[test]
    fn unknown_code_yields_no_information() {
        assert_eq!(decode(ProtocolCode::new(999)), (None, None));
        assert_eq!(decode_report(ProtocolCode::new(13_001)), (None, None));
    }

    #[test]
    fn bare_function_codes_decode_one_or_both_axes() {
        assert_eq!(decode(ProtocolCode::new(1)), (Some(Manual), Some(Heat)));
        assert_eq!(decode(ProtocolCode::new(0)), (Some(Manual), Some(Cool)));
        assert_eq!(decode(ProtocolCode::new(3)), (None, Some(Generic)));
    }

    #[test]
    fn report_only_codes_are_invisible_to_command_decode() {
        assert_eq!(decode(ProtocolCode::new(211)), (None, None));
        assert_eq!(decode_report(ProtocolCode::new(211)), (Some(Auto), Some(Cool)));
        assert_eq!(decode_report(ProtocolCode::new(315)), (Some(Auto), Some(Generic)));
        assert_eq!(decode_report(ProtocolCode::new(1102)), (Some(Auto), Some(Heat)));
    }

    #[test]
    fn encoding_is_unique() {
        let mut seen = Vec::new();
        for mode in WRITABLE_MODES {
            for function in FUNCTIONS {
                let code = encode(mode, function).unwrap();
                assert!(!seen.contains(&code));
                seen.push(code);
            }
        }
        assert!(!seen.contains(&TURN_OFF));
    }

    #[test]
    fn code_from_str() {
        assert_eq!("303".parse::<ProtocolCode>().unwrap(), ProtocolCode::new(303));
        assert!("3a".parse::<ProtocolCode>().is_err());
    }
}
