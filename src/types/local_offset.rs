// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Local offset (manual trim knob) reported by a zone probe.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Position of the local trim knob.
///
/// The device reports the knob as a small numeric code: the tens digit is the
/// sign (`0` = plus, `1` = minus) and the units digit the number of degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocalOffsetMode {
    /// +3 degrees.
    Plus3,
    /// +2 degrees.
    Plus2,
    /// +1 degree.
    Plus1,
    /// No offset.
    Normal,
    /// -1 degree.
    Minus1,
    /// -2 degrees.
    Minus2,
    /// -3 degrees.
    Minus3,
    /// Knob forces the zone off.
    Off,
    /// Knob forces protection mode.
    Protection,
}

impl LocalOffsetMode {
    /// Parses the code carried by an offset report.
    ///
    /// Returns `None` for codes the device does not define.
    ///
    /// # Examples
    ///
    /// ```
    /// use thermoreg_lib::types::LocalOffsetMode;
    ///
    /// assert_eq!(LocalOffsetMode::from_code("02"), Some(LocalOffsetMode::Plus2));
    /// assert_eq!(LocalOffsetMode::from_code("13"), Some(LocalOffsetMode::Minus3));
    /// assert_eq!(LocalOffsetMode::from_code("9"), None);
    /// ```
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "0" | "00" => Some(Self::Normal),
            "01" => Some(Self::Plus1),
            "02" => Some(Self::Plus2),
            "03" => Some(Self::Plus3),
            "11" => Some(Self::Minus1),
            "12" => Some(Self::Minus2),
            "13" => Some(Self::Minus3),
            "4" => Some(Self::Off),
            "5" => Some(Self::Protection),
            _ => None,
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Plus3 => "+3",
            Self::Plus2 => "+2",
            Self::Plus1 => "+1",
            Self::Normal => "0",
            Self::Minus1 => "-1",
            Self::Minus2 => "-2",
            Self::Minus3 => "-3",
            Self::Off => "OFF",
            Self::Protection => "PROTECTION",
        }
    }
}

impl fmt::Display for LocalOffsetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_labels() {
        let cases = [
            ("00", "0"),
            ("01", "+1"),
            ("03", "+3"),
            ("11", "-1"),
            ("12", "-2"),
            ("4", "OFF"),
            ("5", "PROTECTION"),
        ];
        for (code, label) in cases {
            assert_eq!(LocalOffsetMode::from_code(code).unwrap().label(), label);
        }
    }

    #[test]
    fn unknown_codes() {
        assert_eq!(LocalOffsetMode::from_code(""), None);
        assert_eq!(LocalOffsetMode::from_code("14"), None);
        assert_eq!(LocalOffsetMode::from_code("x"), None);
    }
}
