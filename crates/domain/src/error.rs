//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`FarmhubError`] via `From`. The variants follow the editor's error
//! taxonomy: local validation, missing farm context, permission, and
//! remote (network / API) failures.

use std::fmt;

use crate::farm::FarmRole;
use crate::id::FarmId;
use crate::rule::{ActionField, ConditionField};

/// Top-level error shared by ports and services.
#[derive(Debug, thiserror::Error)]
pub enum FarmhubError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    NotFound(#[from] NotFoundError),

    /// A rule was submitted for creation without a selected farm.
    #[error("no farm selected")]
    MissingFarm,

    #[error("{0}")]
    Forbidden(#[from] PermissionError),

    #[error("remote call failed: {0}")]
    Remote(#[from] RemoteError),
}

/// Location of an editable field inside a rule form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath {
    Name,
    Condition { index: usize, field: ConditionField },
    Action { index: usize, field: ActionField },
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => f.write_str("name"),
            Self::Condition { index, field } => {
                write!(f, "conditions[{index}].{}", field.wire_name())
            }
            Self::Action { index, field } => write!(f, "actions[{index}].{}", field.wire_name()),
        }
    }
}

/// Why a single field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// The field is visible for the selected type but empty.
    Required,
    /// A `TIME_RANGE` value is present but is not `HH:mm-HH:mm`.
    MalformedTimeRange,
}

/// One inline field error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub path: FieldPath,
    pub kind: FieldErrorKind,
}

impl FieldError {
    #[must_use]
    pub fn required(path: FieldPath) -> Self {
        Self {
            path,
            kind: FieldErrorKind::Required,
        }
    }

    #[must_use]
    pub fn malformed_time_range(path: FieldPath) -> Self {
        Self {
            path,
            kind: FieldErrorKind::MalformedTimeRange,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FieldErrorKind::Required => write!(f, "{} is required", self.path),
            FieldErrorKind::MalformedTimeRange => {
                write!(f, "{} must be formatted as HH:mm-HH:mm", self.path)
            }
        }
    }
}

/// Every field error found in one validation pass, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn extend(&mut self, errors: impl IntoIterator<Item = FieldError>) {
        self.0.extend(errors);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Return `true` when `path` carries at least one error.
    #[must_use]
    pub fn contains(&self, path: FieldPath) -> bool {
        self.0.iter().any(|e| e.path == path)
    }

    /// `Ok(())` when nothing was collected, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one field error was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self(vec![error])
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            error.fmt(f)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// The requested resource does not exist on the backend.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// The caller's farm role does not allow editing automation rules.
#[derive(Debug, thiserror::Error)]
#[error("role {role} may not manage rules of farm {}", farm_label(.farm_id))]
pub struct PermissionError {
    pub farm_id: Option<FarmId>,
    pub role: FarmRole,
}

fn farm_label(farm_id: &Option<FarmId>) -> String {
    farm_id.map_or_else(|| "<none>".to_string(), |id| id.to_string())
}

/// A non-2xx response or a transport failure.
#[derive(Debug, Default)]
pub struct RemoteError {
    /// HTTP status, absent for transport failures.
    pub status: Option<u16>,
    /// Message supplied by the backend, if any.
    pub message: Option<String>,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl RemoteError {
    #[must_use]
    pub fn status(status: u16, message: Option<String>) -> Self {
        Self {
            status: Some(status),
            message,
            source: None,
        }
    }

    #[must_use]
    pub fn transport(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self {
            status: None,
            message: None,
            source: Some(Box::new(source)),
        }
    }

    /// Backend message when present and non-blank.
    #[must_use]
    pub fn backend_message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.status, self.backend_message()) {
            (Some(status), Some(message)) => write!(f, "HTTP {status}: {message}"),
            (Some(status), None) => write!(f, "HTTP {status}"),
            (None, Some(message)) => f.write_str(message),
            (None, None) => f.write_str("transport failure"),
        }
    }
}

impl std::error::Error for RemoteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_field_paths_with_wire_names() {
        let path = FieldPath::Condition {
            index: 2,
            field: ConditionField::DeviceId,
        };
        assert_eq!(path.to_string(), "conditions[2].deviceId");

        let path = FieldPath::Action {
            index: 0,
            field: ActionField::DurationSeconds,
        };
        assert_eq!(path.to_string(), "actions[0].durationSeconds");
    }

    #[test]
    fn should_join_all_field_errors_in_display() {
        let mut errors = ValidationErrors::new();
        errors.push(FieldError::required(FieldPath::Name));
        errors.push(FieldError::malformed_time_range(FieldPath::Condition {
            index: 0,
            field: ConditionField::Value,
        }));
        assert_eq!(
            errors.to_string(),
            "name is required; conditions[0].value must be formatted as HH:mm-HH:mm"
        );
    }

    #[test]
    fn should_convert_empty_errors_into_ok() {
        assert!(ValidationErrors::new().into_result().is_ok());
        let errors: ValidationErrors = FieldError::required(FieldPath::Name).into();
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn should_display_remote_error_with_and_without_message() {
        let err = RemoteError::status(500, Some("boom".to_string()));
        assert_eq!(err.to_string(), "HTTP 500: boom");

        let err = RemoteError::status(502, Some("  ".to_string()));
        assert_eq!(err.to_string(), "HTTP 502");
        assert!(err.backend_message().is_none());
    }

    #[test]
    fn should_expose_transport_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = RemoteError::transport(io);
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.to_string(), "transport failure");
    }

    #[test]
    fn should_display_permission_error() {
        let err = PermissionError {
            farm_id: Some(FarmId::new(3)),
            role: FarmRole::Viewer,
        };
        assert_eq!(err.to_string(), "role VIEWER may not manage rules of farm 3");
    }
}
