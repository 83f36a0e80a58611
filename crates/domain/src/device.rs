//! Device: a sensor or actuator registered on a farm.
//!
//! The rule editor only reads devices: sensors feed `SENSOR_VALUE`
//! conditions, actuators are the targets of toggle actions.

use serde::{Deserialize, Serialize};

/// Connectivity reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceStatus {
    Online,
    Offline,
    Error,
}

/// What a device can be used for inside a rule, derived from its type string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceRole {
    Sensor,
    Actuator,
    Other,
}

/// A device as listed by `GET /devices?farmId=…`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// Hardware identifier, e.g. `"DHT22-001"`.
    pub device_id: String,
    pub name: String,
    /// Backend type string, e.g. `"SENSOR_DHT22"` or `"ACTUATOR_PUMP"`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DeviceStatus>,
}

impl Device {
    #[must_use]
    pub fn role(&self) -> DeviceRole {
        if self.kind.starts_with("SENSOR") {
            DeviceRole::Sensor
        } else if self.kind.starts_with("ACTUATOR") {
            DeviceRole::Actuator
        } else {
            DeviceRole::Other
        }
    }

    /// Option label shown in selectors: `name (deviceId)`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.device_id)
    }
}

/// A farm's device list split once into sensors and actuators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceCatalog {
    sensors: Vec<Device>,
    actuators: Vec<Device>,
}

impl DeviceCatalog {
    /// Partition `devices` by type prefix, keeping the backend order.
    /// Devices that are neither sensors nor actuators are dropped.
    #[must_use]
    pub fn partition(devices: impl IntoIterator<Item = Device>) -> Self {
        let mut catalog = Self::default();
        for device in devices {
            match device.role() {
                DeviceRole::Sensor => catalog.sensors.push(device),
                DeviceRole::Actuator => catalog.actuators.push(device),
                DeviceRole::Other => {}
            }
        }
        catalog
    }

    #[must_use]
    pub fn sensors(&self) -> &[Device] {
        &self.sensors
    }

    #[must_use]
    pub fn actuators(&self) -> &[Device] {
        &self.actuators
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty() && self.actuators.is_empty()
    }
}
