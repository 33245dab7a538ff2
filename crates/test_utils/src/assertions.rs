//! Custom Test Assertions
//!
//! Provides assertion helpers over what a scripted backend observed, with
//! more meaningful failure messages than comparing call logs by hand.

use serde_json::Value;

use infra_inventory::connection::mock::MockBackend;
use infra_inventory::{InventoryError, Operation};

/// Asserts that the backend received exactly these operations, in order
///
/// # Panics
///
/// Panics if the recorded call log differs from `expected`
pub fn assert_operations(backend: &MockBackend, expected: &[Operation]) {
    let actual = backend.operations();
    assert_eq!(
        actual, expected,
        "Call log mismatch: actual={:?}, expected={:?}",
        actual, expected
    );
}

/// Asserts that the backend was never contacted
///
/// # Panics
///
/// Panics if any handle was created, opened or called
pub fn assert_no_network(backend: &MockBackend) {
    assert_eq!(
        backend.handles_created(),
        0,
        "Expected no connection handle to be created"
    );
    assert_eq!(backend.open_count(), 0, "Expected no transport open");
    assert!(
        backend.calls().is_empty(),
        "Expected no calls, got {:?}",
        backend.operations()
    );
}

/// Asserts that the `index`-th call carried `key` with the given value
///
/// # Panics
///
/// Panics if there is no such call or the parameter differs
pub fn assert_call_param(backend: &MockBackend, index: usize, key: &str, expected: Value) {
    let calls = backend.calls();
    let call = calls
        .get(index)
        .unwrap_or_else(|| panic!("Expected a call at index {}, only {} recorded", index, calls.len()));
    assert_eq!(
        call.params.get(key),
        Some(&expected),
        "Parameter {} of {} call: params={}",
        key,
        call.operation,
        call.params
    );
}

/// Asserts that the `index`-th call did not carry `key`
///
/// # Panics
///
/// Panics if there is no such call or the parameter is present
pub fn assert_call_lacks_param(backend: &MockBackend, index: usize, key: &str) {
    let calls = backend.calls();
    let call = calls
        .get(index)
        .unwrap_or_else(|| panic!("Expected a call at index {}, only {} recorded", index, calls.len()));
    assert!(
        call.params.get(key).is_none(),
        "Expected {} call to omit {}, params={}",
        call.operation,
        key,
        call.params
    );
}

/// Asserts that an optional error is present and retryable
///
/// # Panics
///
/// Panics if the error is absent or status-class
pub fn assert_server_error(error: Option<&InventoryError>) {
    match error {
        Some(error) => assert!(error.is_retryable(), "Expected server-class error, got {:?}", error),
        None => panic!("Expected a server-class error, got none"),
    }
}

/// Asserts that an optional error is present and terminal
///
/// # Panics
///
/// Panics if the error is absent or server-class
pub fn assert_status_error(error: Option<&InventoryError>) {
    match error {
        Some(error) => assert!(!error.is_retryable(), "Expected status-class error, got {:?}", error),
        None => panic!("Expected a status-class error, got none"),
    }
}
