//! Transient user-facing notifications raised by the editor.

use farmhub_domain::error::{FarmhubError, RemoteError};

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A toast-style message for the host UI to display and discard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

/// Text shown to the user for a failed operation.
///
/// `fallback` names the operation ("Could not save the rule") and is used
/// when neither the backend nor the status code says anything better.
pub fn describe_failure(err: &FarmhubError, fallback: &str) -> String {
    match err {
        FarmhubError::Validation(_) => "Please fix the highlighted fields.".to_string(),
        FarmhubError::MissingFarm => "Please select a farm first.".to_string(),
        FarmhubError::Forbidden(_) => "You do not have permission to manage rules on this farm."
            .to_string(),
        FarmhubError::NotFound(inner) => inner.to_string(),
        FarmhubError::Remote(remote) => describe_remote(remote, fallback),
    }
}

fn describe_remote(err: &RemoteError, fallback: &str) -> String {
    match err.status {
        Some(401) => "Your session has expired. Please sign in again.".to_string(),
        Some(403) => "You do not have access to this resource.".to_string(),
        Some(status) if status >= 500 => err
            .backend_message()
            .map_or_else(|| "Server error. Please try again later.".to_string(), str::to_string),
        Some(_) => err
            .backend_message()
            .map_or_else(|| fallback.to_string(), str::to_string),
        None => err.backend_message().map_or_else(
            || "Cannot reach the server. Check your connection.".to_string(),
            str::to_string,
        ),
    }
}
