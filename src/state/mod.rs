// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state management types.
//!
//! The [`DeviceState`] struct holds the cached view of one zone,
//! [`StateChange`] describes a single field update, and [`StateStore`] owns a
//! state and reports which updates actually changed it.
//!
//! # Examples
//!
//! ```
//! use thermoreg_lib::state::{StateChange, StateStore};
//!
//! let store = StateStore::new();
//! let changes = store.apply(&[StateChange::setpoint(20.0)]);
//! assert_eq!(changes.len(), 1);
//!
//! // Same update again: nothing changed.
//! assert!(store.apply(&[StateChange::setpoint(20.0)]).is_empty());
//! ```

mod device_state;
mod state_change;
mod store;

pub use device_state::DeviceState;
pub use state_change::{StateChange, StateField};
pub use store::StateStore;
