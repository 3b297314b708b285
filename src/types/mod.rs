// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for thermostat control.
//!
//! # Types
//!
//! - [`OperationMode`] - Control regime (Auto/Manual/Protection/Off)
//! - [`ThermalFunction`] - Physical effect (Heat/Cool/Generic)
//! - [`HeatingCoolingMode`] - Combined view derived from the two above
//! - [`Address`] - Bus address of a zone
//! - [`LocalOffsetMode`] - Local trim knob position
//! - [`Actuator`] - Heating or cooling actuator slot

mod actuator;
mod address;
mod local_offset;
mod mode;

pub use actuator::Actuator;
pub use address::Address;
pub use local_offset::LocalOffsetMode;
pub use mode::{HeatingCoolingMode, OperationMode, ThermalFunction};
