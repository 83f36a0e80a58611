//! Rule: a named, farm-scoped automation: conditions → actions.
//!
//! The backend ANDs every [`Condition`] of a rule and, when they all hold,
//! runs its [`Action`]s. Insertion order of both lists is display order.
//! The farm a rule belongs to travels out-of-band (`POST /rules?farmId=…`)
//! and is not part of the editable payload.

mod action;
mod condition;
mod fields;
mod time_range;

pub use action::{Action, ActionType, DurationValue};
pub use condition::{Condition, ConditionType, Operator};
pub use fields::{ActionField, ConditionField, ValueInput};
pub use time_range::{TimeRange, TimeRangeError, parse_endpoint};

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, FieldPath, ValidationErrors};
use crate::id::RuleId;

/// `true` for a present, non-blank string.
pub(crate) fn is_filled(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

fn enabled_by_default() -> bool {
    true
}

/// The wire shape of a rule (`GET /rules/{id}`, `POST /rules`, `PUT /rules/{id}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Server-assigned; absent for rules not yet created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RuleId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Rule {
    /// Create a builder for constructing a [`Rule`].
    #[must_use]
    pub fn builder() -> RuleBuilder {
        RuleBuilder::default()
    }

    /// Check every field required by the selected condition and action types.
    ///
    /// All problems are collected so they can be shown inline at once.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] when the name is blank or any visible
    /// field of a condition or action row is empty or malformed.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if !is_filled(Some(&self.name)) {
            errors.push(FieldError::required(FieldPath::Name));
        }
        for (index, condition) in self.conditions.iter().enumerate() {
            errors.extend(condition.field_errors(index));
        }
        for (index, action) in self.actions.iter().enumerate() {
            errors.extend(action.field_errors(index));
        }
        errors.into_result()
    }

    /// Fill pinned fields on every condition.
    pub fn normalize(&mut self) {
        for condition in &mut self.conditions {
            condition.normalize();
        }
    }
}

/// Step-by-step builder for [`Rule`].
#[derive(Debug, Default)]
pub struct RuleBuilder {
    id: Option<RuleId>,
    name: Option<String>,
    description: Option<String>,
    enabled: Option<bool>,
    conditions: Vec<Condition>,
    actions: Vec<Action>,
}

impl RuleBuilder {
    #[must_use]
    pub fn id(mut self, id: RuleId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    #[must_use]
    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Consume the builder, normalize, validate, and return a [`Rule`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] if required fields are missing or empty.
    pub fn build(self) -> Result<Rule, ValidationErrors> {
        let mut rule = Rule {
            id: self.id,
            name: self.name.unwrap_or_default(),
            description: self.description,
            enabled: self.enabled.unwrap_or(true),
            conditions: self.conditions,
            actions: self.actions,
        };
        rule.normalize();
        rule.validate()?;
        Ok(rule)
    }
}
