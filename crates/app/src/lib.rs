//! # farmhub-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `RuleGateway`: list, fetch, create, replace, toggle and delete rules
//!   - `DeviceGateway`: list the devices of a farm
//!   - `FarmGateway`: list the caller's farms and their role on each
//! - Define **driving/inbound ports** as use-case structs:
//!   - `RuleService`: validated rule CRUD
//!   - `PermissionService`: resolve and enforce the caller's farm role
//!   - `RuleEditor`: the create/edit rule session
//! - Orchestrate domain objects without knowing *how* the backend is reached
//!
//! ## Dependency rule
//! Depends on `farmhub-domain` only (plus `tokio` for joining concurrent loads).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod context;
pub mod editor;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;
