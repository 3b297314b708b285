// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command reconciliation.
//!
//! The protocol has no independent "set function" or "set mode" command:
//! every write carries one combined code for the (mode, function) pair, and
//! setpoint writes additionally need that code. A user intent touching one
//! axis can therefore only be encoded once the other axis is known. The
//! [`Reconciler`] sends what it can and parks the rest behind a status
//! request, in a single [`PendingIntent`] slot.

mod intent;
mod machine;

pub use intent::{Intent, IntentKind, PendingIntent};
pub use machine::{MessageOutcome, ReconcileState, Reconciler, SubmitOutcome};
