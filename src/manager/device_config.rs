// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration types for the thermostat manager.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::event::DEFAULT_EVENT_CAPACITY;
use crate::types::Address;

/// Configuration for one thermostat zone.
///
/// # Examples
///
/// ```
/// use thermoreg_lib::manager::DeviceConfig;
///
/// let config = DeviceConfig::new()
///     .with_address("12")
///     .with_friendly_name("Bathroom");
/// assert_eq!(config.address.as_deref(), Some("12"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Zone address on the bus (`where`). A device without one can be
    /// registered, but every intent for it fails with `NoAddress`.
    #[serde(default)]
    pub address: Option<String>,
    /// Optional friendly name for the zone.
    #[serde(default)]
    pub friendly_name: Option<String>,
}

impl DeviceConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the zone address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Sets a friendly name for the zone.
    #[must_use]
    pub fn with_friendly_name(mut self, name: impl Into<String>) -> Self {
        self.friendly_name = Some(name.into());
        self
    }

    /// Parses the configured address.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if an address is present but is not
    /// a valid zone address.
    pub fn resolve_address(&self) -> Result<Option<Address>, ConfigError> {
        self.address
            .as_deref()
            .map(|raw| {
                Address::new(raw).map_err(|e| ConfigError::InvalidValue {
                    field: "address".to_string(),
                    message: e.to_string(),
                })
            })
            .transpose()
    }
}

/// Configuration for a whole installation.
///
/// # Examples
///
/// ```
/// use thermoreg_lib::manager::ManagerConfig;
///
/// let config = ManagerConfig::from_json(
///     r#"{ "devices": [ { "address": "1", "friendly_name": "Living" }, {} ] }"#,
/// ).unwrap();
/// assert_eq!(config.devices.len(), 2);
/// assert_eq!(config.event_capacity, 256);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// Capacity of the event bus.
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
    /// Zones to register at startup.
    #[serde(default)]
    pub devices: Vec<DeviceConfig>,
}

fn default_event_capacity() -> usize {
    DEFAULT_EVENT_CAPACITY
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            event_capacity: DEFAULT_EVENT_CAPACITY,
            devices: Vec::new(),
        }
    }
}

impl ManagerConfig {
    /// Creates a configuration with default capacity and no devices.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the event bus capacity.
    #[must_use]
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    /// Adds a device.
    #[must_use]
    pub fn with_device(mut self, device: DeviceConfig) -> Self {
        self.devices.push(device);
        self
    }

    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` for malformed JSON and
    /// `ConfigError::InvalidValue` if [`validate`](Self::validate) fails.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the capacity and every configured address.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero capacity or an invalid
    /// address.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.event_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "event_capacity".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        for device in &self.devices {
            device.resolve_address()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let config = DeviceConfig::new().with_address("3#1").with_friendly_name("Kitchen");
        assert_eq!(config.address.as_deref(), Some("3#1"));
        assert_eq!(config.friendly_name.as_deref(), Some("Kitchen"));
        assert_eq!(
            config.resolve_address().unwrap(),
            Some(Address::new("3#1").unwrap())
        );
    }

    #[test]
    fn missing_address_resolves_to_none() {
        assert_eq!(DeviceConfig::new().resolve_address().unwrap(), None);
    }

    #[test]
    fn invalid_address_is_config_error() {
        let err = DeviceConfig::new().with_address("abc").resolve_address().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "address"));
    }

    #[test]
    fn from_json_applies_defaults() {
        let config = ManagerConfig::from_json("{}").unwrap();
        assert_eq!(config, ManagerConfig::default());
    }

    #[test]
    fn from_json_reads_devices() {
        let config = ManagerConfig::from_json(
            r#"{ "event_capacity": 16, "devices": [ { "address": "0#2" } ] }"#,
        )
        .unwrap();
        assert_eq!(config.event_capacity, 16);
        assert_eq!(config.devices[0].address.as_deref(), Some("0#2"));
        assert_eq!(config.devices[0].friendly_name, None);
    }

    #[test]
    fn from_json_rejects_bad_input() {
        assert!(matches!(
            ManagerConfig::from_json("not json"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            ManagerConfig::from_json(r#"{ "event_capacity": 0 }"#),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            ManagerConfig::from_json(r#"{ "devices": [ { "address": "" } ] }"#),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn builder_round_trips_through_json() {
        let config = ManagerConfig::new()
            .with_event_capacity(32)
            .with_device(DeviceConfig::new().with_address("5"));
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(ManagerConfig::from_json(&json).unwrap(), config);
    }
}
