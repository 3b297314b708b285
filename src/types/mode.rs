// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operation mode and thermal function.
//!
//! The wire protocol entangles these two dimensions into one code; the
//! library keeps them orthogonal and lets [`crate::codes`] translate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// The scheduling/control regime of a thermostat.
///
/// # Examples
///
/// ```
/// use thermoreg_lib::types::OperationMode;
///
/// let mode: OperationMode = "manual".parse().unwrap();
/// assert_eq!(mode, OperationMode::Manual);
/// assert_eq!(mode.as_str(), "MANUAL");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OperationMode {
    /// Not reported yet.
    #[default]
    Unknown,
    /// Weekly program or holiday schedule. Report-only.
    Auto,
    /// Fixed setpoint set by the user.
    Manual,
    /// Antifreeze / thermal protection.
    Protection,
    /// Zone switched off.
    Off,
}

impl OperationMode {
    /// Returns the upper-case label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Auto => "AUTO",
            Self::Manual => "MANUAL",
            Self::Protection => "PROTECTION",
            Self::Off => "OFF",
        }
    }

    /// Returns `true` unless the mode is [`OperationMode::Unknown`].
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for OperationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "AUTO" => Ok(Self::Auto),
            "MANUAL" => Ok(Self::Manual),
            "PROTECTION" => Ok(Self::Protection),
            "OFF" => Ok(Self::Off),
            _ => Err(ValueError::UnknownLabel(s.to_string())),
        }
    }
}

/// The physical effect a thermostat is allowed to produce.
///
/// # Examples
///
/// ```
/// use thermoreg_lib::types::ThermalFunction;
///
/// assert_eq!("cool".parse::<ThermalFunction>().unwrap(), ThermalFunction::Cool);
/// assert_eq!(ThermalFunction::Generic.to_string(), "GENERIC");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ThermalFunction {
    /// Not reported yet.
    #[default]
    Unknown,
    /// Heating only.
    Heat,
    /// Cooling (conditioning) only.
    Cool,
    /// Heating and cooling.
    Generic,
}

impl ThermalFunction {
    /// Returns the upper-case label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Heat => "HEAT",
            Self::Cool => "COOL",
            Self::Generic => "GENERIC",
        }
    }

    /// Returns `true` unless the function is [`ThermalFunction::Unknown`].
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for ThermalFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThermalFunction {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "HEAT" | "HEATING" => Ok(Self::Heat),
            "COOL" | "COOLING" | "CONDITIONING" => Ok(Self::Cool),
            "GENERIC" => Ok(Self::Generic),
            _ => Err(ValueError::UnknownLabel(s.to_string())),
        }
    }
}

/// Combined heating/cooling view of a thermostat, as shown to users.
///
/// Derived from [`OperationMode`] and [`ThermalFunction`]: an `Off` zone is
/// [`HeatingCoolingMode::Off`] whatever its function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HeatingCoolingMode {
    /// Function not reported yet.
    #[default]
    Unknown,
    /// Zone is off.
    Off,
    /// Heating.
    Heat,
    /// Cooling.
    Cool,
    /// Heating and cooling.
    HeatCool,
}

impl HeatingCoolingMode {
    /// Derives the combined mode.
    #[must_use]
    pub const fn derive(mode: OperationMode, function: ThermalFunction) -> Self {
        if matches!(mode, OperationMode::Off) {
            return Self::Off;
        }
        match function {
            ThermalFunction::Unknown => Self::Unknown,
            ThermalFunction::Heat => Self::Heat,
            ThermalFunction::Cool => Self::Cool,
            ThermalFunction::Generic => Self::HeatCool,
        }
    }

    /// Returns the lower-case label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Off => "off",
            Self::Heat => "heat",
            Self::Cool => "cool",
            Self::HeatCool => "heatcool",
        }
    }
}

impl fmt::Display for HeatingCoolingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
