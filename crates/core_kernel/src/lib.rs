//! Core Kernel - Foundational types shared by the commerce and inventory crates
//!
//! This crate provides the fundamental building blocks used across the workspace:
//! - Strongly-typed identifiers for commerce entities
//! - Port metadata for correlating remote calls with the records that caused them
//! - Health reporting for adapters that talk to external systems

pub mod identifiers;
pub mod ports;

pub use identifiers::{OrderId, LineItemId, ProductId, VariantId};
pub use ports::{
    AdapterHealth, HealthCheckResult, HealthCheckable, OperationMetadata,
};
