//! Device gateway port: read-only access to a farm's devices.

use std::future::Future;

use farmhub_domain::device::Device;
use farmhub_domain::error::FarmhubError;
use farmhub_domain::id::FarmId;

/// Source of a farm's device list.
pub trait DeviceGateway {
    /// List every device registered on `farm_id`.
    fn list_devices(
        &self,
        farm_id: FarmId,
    ) -> impl Future<Output = Result<Vec<Device>, FarmhubError>> + Send;
}
