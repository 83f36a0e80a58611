//! Farm: the ownership scope of devices and rules, and the caller's role on it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::FarmId;

/// Permission tier of the current user on a farm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FarmRole {
    Owner,
    Operator,
    Viewer,
}

impl FarmRole {
    /// Owners and operators may create and edit automation rules.
    #[must_use]
    pub fn can_manage_rules(self) -> bool {
        matches!(self, Self::Owner | Self::Operator)
    }
}

impl fmt::Display for FarmRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Owner => "OWNER",
            Self::Operator => "OPERATOR",
            Self::Viewer => "VIEWER",
        })
    }
}

/// A farm as listed by `GET /farms`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Farm {
    pub id: FarmId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_user_role: Option<FarmRole>,
}

/// Resolve the caller's role on `farm_id` from a farm-membership list.
///
/// A missing farm id, an unknown farm, or a farm without a role all
/// resolve to [`FarmRole::Viewer`].
#[must_use]
pub fn resolve_role(farms: &[Farm], farm_id: Option<FarmId>) -> FarmRole {
    farm_id
        .and_then(|id| farms.iter().find(|f| f.id == id))
        .and_then(|f| f.current_user_role)
        .unwrap_or(FarmRole::Viewer)
}
