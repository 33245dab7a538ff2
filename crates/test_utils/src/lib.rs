//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! inventory session client test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built configs, orders, variants and backend payloads
//! - `builders`: Builder patterns for orders, variants and mock-backed clients
//! - `assertions`: Assertions over the calls a mock backend received
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
