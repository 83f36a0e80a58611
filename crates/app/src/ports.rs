//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the backend.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod device_gateway;
pub mod farm_gateway;
pub mod rule_gateway;

pub use device_gateway::DeviceGateway;
pub use farm_gateway::FarmGateway;
pub use rule_gateway::RuleGateway;
