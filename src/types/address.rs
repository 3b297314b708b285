// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bus address of a thermoregulation zone.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// The `WHERE` part of a frame, e.g. `"1"`, `"#1"` or `"0#1"`.
///
/// Only the character set is checked; bus topology is left to the gateway.
///
/// # Examples
///
/// ```
/// use thermoreg_lib::types::Address;
///
/// let zone = Address::new("#3").unwrap();
/// assert_eq!(zone.as_str(), "#3");
/// assert!(Address::new("").is_err());
/// assert!(Address::new("zone1").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Creates a validated address.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidAddress` if the string is empty or contains
    /// anything other than digits and `#`.
    pub fn new(value: impl Into<String>) -> Result<Self, ValueError> {
        let value = value.into();
        let valid = !value.is_empty()
            && value.chars().any(|c| c.is_ascii_digit())
            && value.chars().all(|c| c.is_ascii_digit() || c == '#');
        if valid {
            Ok(Self(value))
        } else {
            Err(ValueError::InvalidAddress(value))
        }
    }

    /// Returns the address as written on the bus.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Address {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Address {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}
