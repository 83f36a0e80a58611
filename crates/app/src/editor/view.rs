//! Row views: what the host UI renders for each condition and action.
//!
//! Views borrow the form and the device catalog and are rebuilt on every
//! read, so a type change is reflected by the very next render.

use farmhub_domain::device::{Device, DeviceCatalog, DeviceRole};
use farmhub_domain::error::{FieldError, FieldPath, ValidationErrors};
use farmhub_domain::rule::{
    Action, ActionField, Condition, ConditionField, Operator, TimeRange, ValueInput,
};

fn options_for(catalog: &DeviceCatalog, role: Option<DeviceRole>) -> &[Device] {
    match role {
        Some(DeviceRole::Sensor) => catalog.sensors(),
        Some(DeviceRole::Actuator) => catalog.actuators(),
        Some(DeviceRole::Other) | None => &[],
    }
}

/// Render model of one condition row.
#[derive(Debug)]
pub struct ConditionView<'a> {
    pub index: usize,
    pub condition: &'a Condition,
    pub visible_fields: &'static [ConditionField],
    pub operator_choices: &'static [Operator],
    pub field_choices: &'static [&'static str],
    pub value_input: ValueInput,
    /// Empty while the device list is still loading.
    pub device_options: &'a [Device],
    /// Decoded endpoints of a `TIME_RANGE` value; `None` when unset or malformed.
    pub time_window: Option<TimeRange>,
    pub errors: Vec<FieldError>,
}

impl<'a> ConditionView<'a> {
    pub(crate) fn build(
        index: usize,
        condition: &'a Condition,
        catalog: &'a DeviceCatalog,
        errors: &ValidationErrors,
    ) -> Self {
        let kind = condition.kind;
        Self {
            index,
            condition,
            visible_fields: kind.visible_fields(),
            operator_choices: kind.operator_choices(),
            field_choices: kind.field_choices(),
            value_input: kind.value_input(),
            device_options: options_for(catalog, kind.device_role()),
            time_window: condition.time_window(),
            errors: errors
                .iter()
                .filter(|e| matches!(e.path, FieldPath::Condition { index: i, .. } if i == index))
                .copied()
                .collect(),
        }
    }

    #[must_use]
    pub fn shows(&self, field: ConditionField) -> bool {
        self.visible_fields.contains(&field)
    }
}

/// Render model of one action row.
#[derive(Debug)]
pub struct ActionView<'a> {
    pub index: usize,
    pub action: &'a Action,
    pub visible_fields: &'static [ActionField],
    pub device_options: &'a [Device],
    pub errors: Vec<FieldError>,
}

impl<'a> ActionView<'a> {
    pub(crate) fn build(
        index: usize,
        action: &'a Action,
        catalog: &'a DeviceCatalog,
        errors: &ValidationErrors,
    ) -> Self {
        let kind = action.kind;
        Self {
            index,
            action,
            visible_fields: kind.visible_fields(),
            device_options: options_for(catalog, kind.device_role()),
            errors: errors
                .iter()
                .filter(|e| matches!(e.path, FieldPath::Action { index: i, .. } if i == index))
                .copied()
                .collect(),
        }
    }

    #[must_use]
    pub fn shows(&self, field: ActionField) -> bool {
        self.visible_fields.contains(&field)
    }
}
