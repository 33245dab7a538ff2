//! Ports and Adapters Infrastructure
//!
//! Shared types for the seam between the commerce domain and the external
//! inventory backend.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Commerce Application                       │
//! │             (orders, variants, fulfilment jobs)              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Session Client                          │
//! │     (infra_inventory: connect, execute, retry, close)        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Connection (port trait)                     │
//! │          TCP transport  |  scripted mock for tests           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The types here carry no knowledge of the backend's operations; they only
//! describe metadata and health, so both the domain and infrastructure crates
//! can depend on them.

use serde::{Deserialize, Serialize};

use crate::identifiers::OrderId;

/// Health status for an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    /// Adapter is healthy and operational
    Healthy,
    /// Adapter is unhealthy and not operational
    Unhealthy,
    /// Health status is unknown (for example, the adapter is not configured)
    Unknown,
}

/// Health check result for an adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    /// Adapter identifier
    pub adapter_id: String,
    /// Current health status
    pub status: AdapterHealth,
    /// Latency of the health check in milliseconds
    pub latency_ms: u64,
    /// Optional message with additional details
    pub message: Option<String>,
    /// Timestamp of the health check
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl HealthCheckResult {
    /// Creates a result stamped with the current time
    pub fn new(adapter_id: impl Into<String>, status: AdapterHealth, latency_ms: u64) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            status,
            latency_ms,
            message: None,
            checked_at: chrono::Utc::now(),
        }
    }

    /// Attaches a message to the result
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Returns true if the adapter reported itself usable
    pub fn is_healthy(&self) -> bool {
        self.status == AdapterHealth::Healthy
    }
}

/// Trait for adapters that support health checks
///
/// Checking health may open a connection, so the adapter is borrowed mutably.
pub trait HealthCheckable {
    /// Performs a health check on the adapter
    fn health_check(&mut self) -> HealthCheckResult;
}

/// Metadata about a port operation for tracing and support tooling
#[derive(Debug, Clone, Default)]
pub struct OperationMetadata {
    /// Correlation ID for tracing across systems
    pub correlation_id: Option<String>,
    /// The commerce order that caused the operation, if any
    pub order_id: Option<OrderId>,
}

impl OperationMetadata {
    /// Creates new metadata with a correlation ID
    pub fn with_correlation_id(correlation_id: impl Into<String>) -> Self {
        Self {
            correlation_id: Some(correlation_id.into()),
            ..Default::default()
        }
    }

    /// Creates metadata correlated with a commerce order
    pub fn for_order(order_id: OrderId) -> Self {
        Self {
            correlation_id: Some(order_id.to_string()),
            order_id: Some(order_id),
            ..Default::default()
        }
    }
}
