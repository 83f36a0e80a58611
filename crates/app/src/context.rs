//! Session context: the caller's credentials and selected farm, passed in explicitly.

use std::fmt;

use farmhub_domain::id::FarmId;

/// Who is calling and which farm they are working on.
///
/// Built by the host application and handed to adapters and the editor at
/// construction; nothing in this workspace reads ambient storage.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    auth_token: Option<String>,
    farm_id: Option<FarmId>,
}

impl SessionContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into()).filter(|t| !t.is_empty());
        self
    }

    #[must_use]
    pub fn with_farm(mut self, farm_id: FarmId) -> Self {
        self.farm_id = Some(farm_id);
        self
    }

    /// Bearer token, when signed in.
    #[must_use]
    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    /// The selected farm, when one is selected.
    #[must_use]
    pub fn farm_id(&self) -> Option<FarmId> {
        self.farm_id
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .field("farm_id", &self.farm_id)
            .finish()
    }
}
