//! Permission service: resolves the caller's role on the selected farm.

use farmhub_domain::error::{FarmhubError, PermissionError};
use farmhub_domain::farm::{FarmRole, resolve_role};
use farmhub_domain::id::FarmId;

use crate::ports::FarmGateway;

/// Answers "may this user manage rules on this farm?".
///
/// The farm list is fetched on every call; role changes made elsewhere are
/// picked up the next time an editor opens.
pub struct PermissionService<F> {
    gateway: F,
}

impl<F: FarmGateway> PermissionService<F> {
    pub fn new(gateway: F) -> Self {
        Self { gateway }
    }

    /// Role of the caller on `farm_id`, defaulting to [`FarmRole::Viewer`].
    ///
    /// No farm selected resolves to `Viewer` without contacting the backend.
    ///
    /// # Errors
    ///
    /// Returns a remote error if the farm list cannot be fetched.
    #[tracing::instrument(skip(self))]
    pub async fn role_on(&self, farm_id: Option<FarmId>) -> Result<FarmRole, FarmhubError> {
        let Some(id) = farm_id else {
            return Ok(FarmRole::Viewer);
        };
        let farms = self.gateway.list_farms().await?;
        let role = resolve_role(&farms, Some(id));
        tracing::debug!(%role, "resolved farm role");
        Ok(role)
    }

    /// Resolve the role and refuse anything below `OPERATOR`.
    ///
    /// # Errors
    ///
    /// Returns [`FarmhubError::Forbidden`] for viewers and a remote error if
    /// the farm list cannot be fetched.
    pub async fn authorize_rule_editing(
        &self,
        farm_id: Option<FarmId>,
    ) -> Result<FarmRole, FarmhubError> {
        let role = self.role_on(farm_id).await?;
        if role.can_manage_rules() {
            Ok(role)
        } else {
            Err(PermissionError { farm_id, role }.into())
        }
    }
}
