//! Rule form: the in-memory, editable rule aggregate.

use farmhub_domain::id::RuleId;
use farmhub_domain::rule::{Action, ActionType, Condition, ConditionType, Rule, TimeRange};

/// Editable state of one rule. `enabled` and `id` are not part of the form;
/// they are supplied when the payload is assembled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleForm {
    pub name: String,
    pub description: Option<String>,
    pub conditions: Vec<Condition>,
    pub actions: Vec<Action>,
}

impl RuleForm {
    /// Populate from a fetched rule, one row per array element.
    #[must_use]
    pub fn from_rule(rule: &Rule) -> Self {
        Self {
            name: rule.name.clone(),
            description: rule.description.clone(),
            conditions: rule.conditions.clone(),
            actions: rule.actions.clone(),
        }
    }

    /// Assemble the outbound payload.
    #[must_use]
    pub fn to_rule(&self, id: Option<RuleId>, enabled: bool) -> Rule {
        let mut rule = Rule {
            id,
            name: self.name.clone(),
            description: self.description.clone(),
            enabled,
            conditions: self.conditions.clone(),
            actions: self.actions.clone(),
        };
        rule.normalize();
        rule
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// An empty description is the same as none.
    pub fn set_description(&mut self, description: impl Into<String>) {
        let description = description.into();
        self.description = Some(description).filter(|d| !d.is_empty());
    }

    /// Append a `SENSOR_VALUE` row and return its index.
    pub fn add_condition(&mut self) -> usize {
        self.conditions.push(Condition::empty(ConditionType::default()));
        self.conditions.len() - 1
    }

    /// Append a `TURN_ON_DEVICE` row and return its index.
    pub fn add_action(&mut self) -> usize {
        self.actions.push(Action::empty(ActionType::default()));
        self.actions.len() - 1
    }

    pub fn remove_condition(&mut self, index: usize) -> Option<Condition> {
        (index < self.conditions.len()).then(|| self.conditions.remove(index))
    }

    pub fn remove_action(&mut self, index: usize) -> Option<Action> {
        (index < self.actions.len()).then(|| self.actions.remove(index))
    }

    pub fn condition_mut(&mut self, index: usize) -> Option<&mut Condition> {
        self.conditions.get_mut(index)
    }

    pub fn action_mut(&mut self, index: usize) -> Option<&mut Action> {
        self.actions.get_mut(index)
    }

    /// Change a condition's type. Returns `false` for an unknown index.
    pub fn set_condition_type(&mut self, index: usize, kind: ConditionType) -> bool {
        let Some(condition) = self.condition_mut(index) else {
            return false;
        };
        condition.set_kind(kind);
        true
    }

    pub fn set_action_type(&mut self, index: usize, kind: ActionType) -> bool {
        let Some(action) = self.action_mut(index) else {
            return false;
        };
        action.set_kind(kind);
        true
    }

    /// Write both time endpoints into the condition's `value`.
    pub fn set_time_window(&mut self, index: usize, range: TimeRange) -> bool {
        let Some(condition) = self.condition_mut(index) else {
            return false;
        };
        condition.set_time_window(range);
        true
    }
}
