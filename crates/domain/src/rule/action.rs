//! Action: the effect the backend performs when all conditions hold.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, FieldPath};

use super::fields::ActionField;
use super::is_filled;

/// What an action does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    /// Switch an actuator on, optionally for a bounded duration.
    #[default]
    TurnOnDevice,
    TurnOffDevice,
    /// In-app notification.
    SendNotification,
    /// Email plus in-app notification.
    SendEmail,
}

impl ActionType {
    pub const ALL: [Self; 4] = [
        Self::TurnOnDevice,
        Self::TurnOffDevice,
        Self::SendNotification,
        Self::SendEmail,
    ];

    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::TurnOnDevice => "TURN_ON_DEVICE",
            Self::TurnOffDevice => "TURN_OFF_DEVICE",
            Self::SendNotification => "SEND_NOTIFICATION",
            Self::SendEmail => "SEND_EMAIL",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Auto-off delay of a `TURN_ON_DEVICE` action.
///
/// Keeps the JSON shape it arrived in: a number fetched from the backend is
/// sent back as a number, text typed into the editor is sent as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(i64),
    Text(String),
}

impl DurationValue {
    /// The value as an input cell shows it.
    #[must_use]
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Seconds(secs) => Cow::Owned(secs.to_string()),
            Self::Text(text) => Cow::Borrowed(text),
        }
    }

    /// Whole non-negative seconds, when the value is one.
    #[must_use]
    pub fn seconds(&self) -> Option<u64> {
        match self {
            Self::Seconds(secs) => u64::try_from(*secs).ok(),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }

    fn is_filled(&self) -> bool {
        match self {
            Self::Seconds(_) => true,
            Self::Text(text) => !text.trim().is_empty(),
        }
    }
}

impl From<String> for DurationValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for DurationValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl fmt::Display for DurationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

/// A single typed effect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: ActionType,
    /// Target actuator for toggle actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    /// Auto-off delay for `TURN_ON_DEVICE`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<DurationValue>,
    /// Body for notification and email actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Action {
    /// A new row with only its type set.
    #[must_use]
    pub fn empty(kind: ActionType) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// A turn-on row as the editor fills it, the duration entered as text.
    #[must_use]
    pub fn turn_on(device_id: impl Into<String>, duration_seconds: Option<u64>) -> Self {
        Self {
            kind: ActionType::TurnOnDevice,
            device_id: Some(device_id.into()),
            duration_seconds: duration_seconds.map(|s| DurationValue::Text(s.to_string())),
            message: None,
        }
    }

    #[must_use]
    pub fn turn_off(device_id: impl Into<String>) -> Self {
        Self {
            kind: ActionType::TurnOffDevice,
            device_id: Some(device_id.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn notify(message: impl Into<String>) -> Self {
        Self {
            kind: ActionType::SendNotification,
            message: Some(message.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn email(message: impl Into<String>) -> Self {
        Self {
            kind: ActionType::SendEmail,
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Switch to another type, dropping sub-field values it does not show.
    pub fn set_kind(&mut self, kind: ActionType) {
        if kind == self.kind {
            return;
        }
        self.kind = kind;
        if !kind.is_visible(ActionField::DeviceId) {
            self.device_id = None;
        }
        if !kind.is_visible(ActionField::DurationSeconds) {
            self.duration_seconds = None;
        }
        if !kind.is_visible(ActionField::Message) {
            self.message = None;
        }
    }

    /// The duration parsed as whole seconds, when it is one.
    #[must_use]
    pub fn duration(&self) -> Option<u64> {
        self.duration_seconds
            .as_ref()
            .and_then(DurationValue::seconds)
    }

    /// Inline errors for this row at position `index`.
    #[must_use]
    pub fn field_errors(&self, index: usize) -> Vec<FieldError> {
        self.kind
            .required_fields()
            .iter()
            .filter(|&&field| {
                let filled = match field {
                    ActionField::DeviceId => is_filled(self.device_id.as_deref()),
                    ActionField::DurationSeconds => self
                        .duration_seconds
                        .as_ref()
                        .is_some_and(DurationValue::is_filled),
                    ActionField::Message => is_filled(self.message.as_deref()),
                };
                !filled
            })
            .map(|&field| FieldError::required(FieldPath::Action { index, field }))
            .collect()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let device = self.device_id.as_deref().unwrap_or("?");
        match self.kind {
            ActionType::TurnOnDevice => match &self.duration_seconds {
                Some(secs) => write!(f, "turn_on({device}, {secs}s)"),
                None => write!(f, "turn_on({device})"),
            },
            ActionType::TurnOffDevice => write!(f, "turn_off({device})"),
            ActionType::SendNotification => write!(f, "notify"),
            ActionType::SendEmail => write!(f, "email"),
        }
    }
}
