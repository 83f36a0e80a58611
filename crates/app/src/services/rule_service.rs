//! Rule service: use-cases for managing a farm's automation rules.

use farmhub_domain::error::{FarmhubError, NotFoundError};
use farmhub_domain::id::{FarmId, RuleId};
use farmhub_domain::rule::Rule;

use crate::ports::RuleGateway;

/// Application service for rule CRUD operations.
pub struct RuleService<R> {
    gateway: R,
}

impl<R: RuleGateway> RuleService<R> {
    /// Create a new service backed by the given gateway.
    pub fn new(gateway: R) -> Self {
        Self { gateway }
    }

    /// List every rule of a farm.
    ///
    /// # Errors
    ///
    /// Returns a remote error propagated from the gateway.
    #[tracing::instrument(skip(self))]
    pub async fn list_rules(&self, farm_id: FarmId) -> Result<Vec<Rule>, FarmhubError> {
        self.gateway.list_by_farm(farm_id).await
    }

    /// Look up a rule by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`FarmhubError::NotFound`] when no rule with `id` exists,
    /// or a remote error from the gateway.
    #[tracing::instrument(skip(self))]
    pub async fn get_rule(&self, id: RuleId) -> Result<Rule, FarmhubError> {
        self.gateway.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Rule",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Create a rule on the selected farm after validating it.
    ///
    /// Both checks run before any network call.
    ///
    /// # Errors
    ///
    /// Returns [`FarmhubError::MissingFarm`] when `farm_id` is `None`,
    /// [`FarmhubError::Validation`] if required fields are empty, or a
    /// remote error from the gateway.
    #[tracing::instrument(skip(self, rule), fields(rule_name = %rule.name))]
    pub async fn create_rule(
        &self,
        farm_id: Option<FarmId>,
        mut rule: Rule,
    ) -> Result<Rule, FarmhubError> {
        let farm_id = farm_id.ok_or(FarmhubError::MissingFarm)?;
        rule.id = None;
        rule.normalize();
        rule.validate()?;
        let created = self.gateway.create(farm_id, rule).await?;
        tracing::info!(rule_id = ?created.id, "rule created");
        Ok(created)
    }

    /// Replace an existing rule with a full payload.
    ///
    /// # Errors
    ///
    /// Returns [`FarmhubError::Validation`] if required fields are empty,
    /// or a remote error from the gateway.
    #[tracing::instrument(skip(self, rule), fields(rule_name = %rule.name))]
    pub async fn update_rule(&self, id: RuleId, mut rule: Rule) -> Result<Rule, FarmhubError> {
        rule.id = Some(id);
        rule.normalize();
        rule.validate()?;
        let updated = self.gateway.update(id, rule).await?;
        tracing::info!("rule updated");
        Ok(updated)
    }

    /// Enable or disable a rule without touching the rest of it.
    ///
    /// # Errors
    ///
    /// Returns a remote error propagated from the gateway.
    #[tracing::instrument(skip(self))]
    pub async fn set_enabled(&self, id: RuleId, enabled: bool) -> Result<(), FarmhubError> {
        self.gateway.set_enabled(id, enabled).await
    }

    /// Delete a rule by id.
    ///
    /// # Errors
    ///
    /// Returns a remote error propagated from the gateway.
    #[tracing::instrument(skip(self))]
    pub async fn delete_rule(&self, id: RuleId) -> Result<(), FarmhubError> {
        self.gateway.delete(id).await
    }
}
