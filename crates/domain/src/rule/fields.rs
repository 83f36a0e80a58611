//! Field visibility: which sub-fields a condition or action exposes for its type.
//!
//! These tables are pure lookups. Callers re-derive them from the current
//! type on every read; nothing here caches a previous answer.

use crate::device::DeviceRole;

use super::action::ActionType;
use super::condition::{ConditionType, Operator};

/// Editable sub-field of a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionField {
    DeviceId,
    Field,
    Operator,
    Value,
}

impl ConditionField {
    /// JSON field name on the wire.
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::DeviceId => "deviceId",
            Self::Field => "field",
            Self::Operator => "operator",
            Self::Value => "value",
        }
    }
}

/// Editable sub-field of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionField {
    DeviceId,
    DurationSeconds,
    Message,
}

impl ActionField {
    /// JSON field name on the wire.
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::DeviceId => "deviceId",
            Self::DurationSeconds => "durationSeconds",
            Self::Message => "message",
        }
    }
}

/// How a condition's `value` is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueInput {
    /// Free text, e.g. a threshold like `"30"`.
    Text,
    /// One of a fixed list of values.
    Choice(&'static [&'static str]),
    /// Hidden; written from a two-endpoint time control.
    TimeRange,
}

const SENSOR_FIELDS: &[&str] = &[
    "temperature",
    "humidity",
    "soil_moisture",
    "light_intensity",
    "soilPH",
];
const WEATHER_FIELDS: &[&str] = &["temperature", "rain_amount", "humidity"];
const STATUS_FIELD: &str = "status";
const DEVICE_STATES: &[&str] = &["ONLINE", "OFFLINE"];

impl ConditionType {
    /// Sub-fields shown for this type, in display order.
    #[must_use]
    pub fn visible_fields(self) -> &'static [ConditionField] {
        use ConditionField::{DeviceId, Field, Operator, Value};
        match self {
            Self::SensorValue => &[DeviceId, Field, Operator, Value],
            Self::TimeRange => &[Value],
            Self::Weather | Self::DeviceStatus => &[Field, Operator, Value],
        }
    }

    /// Sub-fields that must be filled at submission. Every visible field is required.
    #[must_use]
    pub fn required_fields(self) -> &'static [ConditionField] {
        self.visible_fields()
    }

    #[must_use]
    pub fn is_visible(self, field: ConditionField) -> bool {
        self.visible_fields().contains(&field)
    }

    /// Operators offered by the editor for this type.
    #[must_use]
    pub fn operator_choices(self) -> &'static [Operator] {
        use Operator::{Equals, GreaterThan, LessThan, NotEquals};
        match self {
            Self::SensorValue => &[GreaterThan, LessThan, Equals],
            Self::TimeRange => &[],
            Self::Weather => &[Equals, NotEquals, GreaterThan, LessThan],
            Self::DeviceStatus => &[Equals, NotEquals],
        }
    }

    /// Measured quantities offered for the `field` selector.
    #[must_use]
    pub fn field_choices(self) -> &'static [&'static str] {
        match self {
            Self::SensorValue => SENSOR_FIELDS,
            Self::Weather => WEATHER_FIELDS,
            Self::DeviceStatus => &[STATUS_FIELD],
            Self::TimeRange => &[],
        }
    }

    /// A `field` value the type pins regardless of user input.
    #[must_use]
    pub fn fixed_field(self) -> Option<&'static str> {
        match self {
            Self::DeviceStatus => Some(STATUS_FIELD),
            _ => None,
        }
    }

    #[must_use]
    pub fn value_input(self) -> ValueInput {
        match self {
            Self::SensorValue | Self::Weather => ValueInput::Text,
            Self::TimeRange => ValueInput::TimeRange,
            Self::DeviceStatus => ValueInput::Choice(DEVICE_STATES),
        }
    }

    /// Which device set feeds the `deviceId` selector, if shown.
    #[must_use]
    pub fn device_role(self) -> Option<DeviceRole> {
        match self {
            Self::SensorValue => Some(DeviceRole::Sensor),
            _ => None,
        }
    }
}

impl ActionType {
    /// Sub-fields shown for this type, in display order.
    #[must_use]
    pub fn visible_fields(self) -> &'static [ActionField] {
        use ActionField::{DeviceId, DurationSeconds, Message};
        match self {
            Self::TurnOnDevice => &[DeviceId, DurationSeconds],
            Self::TurnOffDevice => &[DeviceId],
            Self::SendNotification | Self::SendEmail => &[Message],
        }
    }

    /// Sub-fields that must be filled at submission; duration is optional.
    #[must_use]
    pub fn required_fields(self) -> &'static [ActionField] {
        use ActionField::{DeviceId, Message};
        match self {
            Self::TurnOnDevice | Self::TurnOffDevice => &[DeviceId],
            Self::SendNotification | Self::SendEmail => &[Message],
        }
    }

    #[must_use]
    pub fn is_visible(self, field: ActionField) -> bool {
        self.visible_fields().contains(&field)
    }

    /// Which device set feeds the `deviceId` selector, if shown.
    #[must_use]
    pub fn device_role(self) -> Option<DeviceRole> {
        match self {
            Self::TurnOnDevice | Self::TurnOffDevice => Some(DeviceRole::Actuator),
            Self::SendNotification | Self::SendEmail => None,
        }
    }
}
