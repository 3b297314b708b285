// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zone actuators (valves, pumps, fan coils).

use std::fmt;

use serde::{Deserialize, Serialize};

/// An actuator slot of a zone.
///
/// Actuator `1` drives heating and actuator `2` drives cooling; other indexes
/// are not tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Actuator {
    /// Actuator 1.
    Heating,
    /// Actuator 2.
    Cooling,
}

impl Actuator {
    /// Returns the actuator for a bus index.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(Self::Heating),
            2 => Some(Self::Cooling),
            _ => None,
        }
    }

    /// Returns the bus index.
    #[must_use]
    pub const fn index(&self) -> u8 {
        match self {
            Self::Heating => 1,
            Self::Cooling => 2,
        }
    }
}

impl fmt::Display for Actuator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Heating => f.write_str("heating"),
            Self::Cooling => f.write_str("cooling"),
        }
    }
}
