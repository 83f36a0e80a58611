//! # farmhub-domain
//!
//! Pure domain model for farmhub automation rules.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions
//! - Define **Rules** (named condition → action automations, farm-scoped)
//! - Define **Conditions** and **Actions** and which sub-fields each type exposes
//! - Encode and decode the composite `TIME_RANGE` value
//! - Define **Devices** (sensors and actuators a rule may reference)
//! - Define **Farms** and the caller's **role** on them
//! - Contain all invariant enforcement and validation logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod device;
pub mod farm;
pub mod rule;
