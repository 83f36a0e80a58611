//! Rule gateway port: the backend's rule endpoints.

use std::future::Future;

use farmhub_domain::error::FarmhubError;
use farmhub_domain::id::{FarmId, RuleId};
use farmhub_domain::rule::Rule;

/// Remote store of farm-scoped [`Rule`]s.
pub trait RuleGateway {
    /// List every rule of a farm.
    fn list_by_farm(
        &self,
        farm_id: FarmId,
    ) -> impl Future<Output = Result<Vec<Rule>, FarmhubError>> + Send;

    /// Fetch one rule, `None` when the backend does not know it.
    fn get_by_id(
        &self,
        id: RuleId,
    ) -> impl Future<Output = Result<Option<Rule>, FarmhubError>> + Send;

    /// Create `rule` on `farm_id` and return it with its assigned id.
    fn create(
        &self,
        farm_id: FarmId,
        rule: Rule,
    ) -> impl Future<Output = Result<Rule, FarmhubError>> + Send;

    /// Replace the whole rule `id` with `rule`.
    fn update(
        &self,
        id: RuleId,
        rule: Rule,
    ) -> impl Future<Output = Result<Rule, FarmhubError>> + Send;

    /// Flip only the enabled flag.
    fn set_enabled(
        &self,
        id: RuleId,
        enabled: bool,
    ) -> impl Future<Output = Result<(), FarmhubError>> + Send;

    /// Delete a rule.
    fn delete(&self, id: RuleId) -> impl Future<Output = Result<(), FarmhubError>> + Send;
}
