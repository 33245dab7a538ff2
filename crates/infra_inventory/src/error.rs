//! Inventory backend error types
//!
//! Every failure the transport can report is mapped onto one of two classes:
//! server-class failures are presumed transient and may be retried after a
//! reconnect, status-class failures are caused by the request itself and are
//! never retried.

use std::io;
use thiserror::Error;

/// Errors raised while talking to the inventory backend
///
/// These never escape the session client's public operations; they are
/// recorded as the client's last error and logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// The transport could not be opened or broke mid-request
    #[error("Connection error: {0}")]
    Connection(String),

    /// The backend refused the session credentials
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The backend failed while processing an otherwise valid request
    #[error("Server error {code}: {message}")]
    Server { code: u16, message: String },

    /// The backend rejected the request (validation or business rule)
    #[error("Request rejected with status {code}: {message}")]
    Status { code: u16, message: String },

    /// No reply arrived within the configured request timeout
    #[error("Timeout after {duration_ms}ms: {operation}")]
    Timeout { operation: String, duration_ms: u64 },

    /// A call was dispatched on a handle that is not connected
    #[error("Not connected to the inventory backend")]
    NotConnected,

    /// The request parameters could not be encoded
    #[error("Failed to encode {operation} request: {message}")]
    Encode { operation: String, message: String },

    /// The reply did not have the shape the operation expects
    #[error("Unexpected {operation} response: {message}")]
    Decode { operation: String, message: String },
}

/// How the session client reacts to an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Transient; reconnect and retry while the retry budget allows
    Server,
    /// Caused by the request; record and give up immediately
    Status,
}

impl InventoryError {
    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        InventoryError::Connection(message.into())
    }

    /// Creates a Server error
    pub fn server(code: u16, message: impl Into<String>) -> Self {
        InventoryError::Server {
            code,
            message: message.into(),
        }
    }

    /// Creates a Status error
    pub fn status(code: u16, message: impl Into<String>) -> Self {
        InventoryError::Status {
            code,
            message: message.into(),
        }
    }

    /// Creates a Decode error for the named operation
    pub fn decode(operation: impl Into<String>, message: impl std::fmt::Display) -> Self {
        InventoryError::Decode {
            operation: operation.into(),
            message: message.to_string(),
        }
    }

    /// Classifies the error for retry decisions
    pub fn class(&self) -> ErrorClass {
        match self {
            InventoryError::Connection(_)
            | InventoryError::Server { .. }
            | InventoryError::Timeout { .. }
            | InventoryError::NotConnected => ErrorClass::Server,
            InventoryError::Authentication(_)
            | InventoryError::Status { .. }
            | InventoryError::Encode { .. }
            | InventoryError::Decode { .. } => ErrorClass::Status,
        }
    }

    /// Returns true if a reconnect-and-retry may succeed
    pub fn is_retryable(&self) -> bool {
        self.class() == ErrorClass::Server
    }
}

impl From<io::Error> for InventoryError {
    fn from(error: io::Error) -> Self {
        InventoryError::Connection(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_errors_are_retryable() {
        assert!(InventoryError::server(1001, "database locked").is_retryable());
        assert!(InventoryError::connection("reset by peer").is_retryable());
        assert!(InventoryError::NotConnected.is_retryable());
        assert!(InventoryError::Timeout {
            operation: "get_part".to_string(),
            duration_ms: 30_000,
        }
        .is_retryable());
    }

    #[test]
    fn test_status_errors_are_terminal() {
        assert_eq!(InventoryError::status(2100, "unknown part").class(), ErrorClass::Status);
        assert!(!InventoryError::Authentication("bad password".to_string()).is_retryable());
        assert!(!InventoryError::decode("get_part", "missing field `num`").is_retryable());
    }

    #[test]
    fn test_display_includes_code() {
        let error = InventoryError::status(2100, "unknown part");
        assert!(error.to_string().contains("2100"));
        assert!(error.to_string().contains("unknown part"));
    }

    #[test]
    fn test_io_error_conversion() {
        let error: InventoryError = io::Error::new(io::ErrorKind::ConnectionReset, "reset").into();
        assert!(matches!(error, InventoryError::Connection(_)));
    }
}
