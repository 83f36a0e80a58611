//! Condition: one predicate the backend evaluates before running a rule's actions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, FieldPath};

use super::fields::{ConditionField, ValueInput};
use super::is_filled;
use super::time_range::TimeRange;

/// What a condition observes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConditionType {
    /// A reading from a specific sensor.
    #[default]
    SensorValue,
    /// The current wall-clock time within a daily window.
    TimeRange,
    /// A weather observation for the farm's location.
    Weather,
    /// A device's connectivity status.
    DeviceStatus,
}

impl ConditionType {
    pub const ALL: [Self; 4] = [
        Self::SensorValue,
        Self::TimeRange,
        Self::Weather,
        Self::DeviceStatus,
    ];

    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::SensorValue => "SENSOR_VALUE",
            Self::TimeRange => "TIME_RANGE",
            Self::Weather => "WEATHER",
            Self::DeviceStatus => "DEVICE_STATUS",
        }
    }
}

impl fmt::Display for ConditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Comparison operator understood by the backend rule engine.
///
/// The editor offers a per-type subset (see
/// [`ConditionType::operator_choices`]); the remaining variants exist so
/// rules authored elsewhere decode and round-trip unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operator {
    Equals,
    NotEquals,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Between,
    InRange,
}

impl Operator {
    /// Short symbol for compact rendering.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::NotEquals => "!=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::Between => "between",
            Self::InRange => "in",
        }
    }
}

/// A single typed predicate.
///
/// Sub-fields are optional because a freshly added row carries only its
/// type; [`Condition::field_errors`] decides what must be filled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type")]
    pub kind: ConditionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,
    /// String-encoded comparison value; `"HH:mm-HH:mm"` for `TIME_RANGE`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Condition {
    /// A new row with only its type set (plus any field the type pins).
    #[must_use]
    pub fn empty(kind: ConditionType) -> Self {
        Self {
            kind,
            field: kind.fixed_field().map(str::to_string),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn sensor_value(
        device_id: impl Into<String>,
        field: impl Into<String>,
        operator: Operator,
        value: impl Into<String>,
    ) -> Self {
        Self {
            kind: ConditionType::SensorValue,
            device_id: Some(device_id.into()),
            field: Some(field.into()),
            operator: Some(operator),
            value: Some(value.into()),
        }
    }

    #[must_use]
    pub fn time_range(range: TimeRange) -> Self {
        Self {
            kind: ConditionType::TimeRange,
            value: Some(range.encode()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn weather(field: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            kind: ConditionType::Weather,
            field: Some(field.into()),
            operator: Some(operator),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn device_status(operator: Operator, status: impl Into<String>) -> Self {
        Self {
            kind: ConditionType::DeviceStatus,
            field: ConditionType::DeviceStatus.fixed_field().map(str::to_string),
            operator: Some(operator),
            value: Some(status.into()),
            ..Self::default()
        }
    }

    /// Switch to another type, dropping sub-field values that no longer apply.
    ///
    /// A field survives only when the new type still shows it and the held
    /// value is still one of its choices; `value` survives only when the
    /// input kind is unchanged. Selecting the current type is a no-op.
    pub fn set_kind(&mut self, kind: ConditionType) {
        if kind == self.kind {
            return;
        }
        let previous = self.kind;
        self.kind = kind;

        if !kind.is_visible(ConditionField::DeviceId) {
            self.device_id = None;
        }
        self.field = match kind.fixed_field() {
            Some(fixed) => Some(fixed.to_string()),
            None => self
                .field
                .take()
                .filter(|f| kind.field_choices().contains(&f.as_str())),
        };
        self.operator = self
            .operator
            .filter(|op| kind.operator_choices().contains(op));
        if previous.value_input() != kind.value_input() {
            self.value = None;
        }
    }

    /// Lenient decode of a `TIME_RANGE` value; `None` when unset or malformed.
    #[must_use]
    pub fn time_window(&self) -> Option<TimeRange> {
        match self.kind {
            ConditionType::TimeRange => self.value.as_deref().and_then(TimeRange::decode),
            _ => None,
        }
    }

    /// Re-serialize both endpoints into `value`.
    pub fn set_time_window(&mut self, range: TimeRange) {
        self.value = Some(range.encode());
    }

    /// Overwrite any field the type pins. Other fields are left as they are.
    pub fn normalize(&mut self) {
        if let Some(fixed) = self.kind.fixed_field() {
            self.field = Some(fixed.to_string());
        }
    }

    /// Inline errors for this row at position `index`.
    #[must_use]
    pub fn field_errors(&self, index: usize) -> Vec<FieldError> {
        let path = |field| FieldPath::Condition { index, field };
        let mut errors = Vec::new();
        for &field in self.kind.required_fields() {
            let present = match field {
                ConditionField::DeviceId => is_filled(self.device_id.as_deref()),
                ConditionField::Field => {
                    self.kind.fixed_field().is_some() || is_filled(self.field.as_deref())
                }
                ConditionField::Operator => self.operator.is_some(),
                ConditionField::Value => is_filled(self.value.as_deref()),
            };
            if !present {
                errors.push(FieldError::required(path(field)));
            }
        }
        if self.kind.value_input() == ValueInput::TimeRange {
            if let Some(value) = self.value.as_deref().filter(|v| !v.trim().is_empty()) {
                if TimeRange::parse(value).is_err() {
                    errors.push(FieldError::malformed_time_range(path(ConditionField::Value)));
                }
            }
        }
        errors
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = self.field.as_deref().unwrap_or("?");
        let op = self.operator.map_or("?", Operator::symbol);
        let value = self.value.as_deref().unwrap_or("?");
        match self.kind {
            ConditionType::SensorValue => {
                let device = self.device_id.as_deref().unwrap_or("?");
                write!(f, "sensor({device}).{field} {op} {value}")
            }
            ConditionType::TimeRange => write!(f, "time_range({value})"),
            ConditionType::Weather => write!(f, "weather.{field} {op} {value}"),
            ConditionType::DeviceStatus => write!(f, "device.{field} {op} {value}"),
        }
    }
}
