//! Farm gateway port: the caller's farm memberships.

use std::future::Future;

use farmhub_domain::error::FarmhubError;
use farmhub_domain::farm::Farm;

/// Source of the farms visible to the current user, with their role on each.
pub trait FarmGateway {
    fn list_farms(&self) -> impl Future<Output = Result<Vec<Farm>, FarmhubError>> + Send;
}
