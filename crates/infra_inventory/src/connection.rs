//! Connection port
//!
//! The session client never speaks the wire protocol itself. It owns one
//! [`Connection`] handle, created by a [`Connector`], and drives it through
//! open → login → call* → close. Implementations:
//!
//! - **TcpConnector**: framed JSON over a blocking TCP socket ([`crate::transport`])
//! - **MockConnector**: scripted in-memory backend for tests (feature `mock`)

use serde_json::Value;

use crate::config::SessionConfig;
use crate::error::InventoryError;
use crate::protocol::Operation;

/// A live (or closable) session with the inventory backend
///
/// `call` is the typed dispatch boundary: `Ok(Some(_))` is a payload,
/// `Ok(None)` is an empty reply, and `Err(_)` carries a classified error.
pub trait Connection {
    /// Opens the underlying transport
    fn open(&mut self) -> Result<(), InventoryError>;

    /// Authenticates an opened transport
    fn login(&mut self, username: &str, password: &str) -> Result<(), InventoryError>;

    /// Whether the handle currently holds an open, authenticated session
    fn is_connected(&self) -> bool;

    /// Sends one operation and waits for its reply
    fn call(&mut self, operation: Operation, params: Value)
        -> Result<Option<Value>, InventoryError>;

    /// Closes the transport; closing a closed handle does nothing
    fn close(&mut self);

    /// Raw text of the most recent request sent on this handle
    fn last_request(&self) -> Option<String>;

    /// Raw text of the most recent reply received on this handle
    fn last_response(&self) -> Option<String>;
}

/// Creates connection handles; no I/O happens until [`Connection::open`]
pub trait Connector {
    type Connection: Connection;

    /// Builds an unopened handle for the configured backend
    fn create(&self, config: &SessionConfig) -> Self::Connection;
}

/// Scripted in-memory backend for testing the session client
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use serde::Serialize;
    use serde_json::json;
    use std::collections::{HashMap, VecDeque};
    use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

    /// What the mock backend answers to one call
    #[derive(Debug, Clone, PartialEq)]
    pub enum MockReply {
        Payload(Value),
        Empty,
        Fail(InventoryError),
    }

    impl MockReply {
        /// Serializes `payload` into a payload reply
        pub fn payload(payload: impl Serialize) -> Self {
            match serde_json::to_value(payload) {
                Ok(value) => MockReply::Payload(value),
                Err(e) => MockReply::Fail(InventoryError::decode("mock", e)),
            }
        }
    }

    /// A call observed by the mock backend
    #[derive(Debug, Clone, PartialEq)]
    pub struct RecordedCall {
        pub operation: Operation,
        pub params: Value,
    }

    #[derive(Debug, Default)]
    struct MockState {
        scripted: HashMap<Operation, VecDeque<MockReply>>,
        fallback: HashMap<Operation, MockReply>,
        calls: Vec<RecordedCall>,
        handles_created: usize,
        opens: usize,
        logins: usize,
        closes: usize,
        connected: bool,
        refuse_connections: bool,
        reject_login: bool,
    }

    /// Shared state behind every mock connection it hands out
    ///
    /// Replies queued with [`MockBackend::respond`] are used once, in order;
    /// a reply set with [`MockBackend::respond_always`] answers whenever the
    /// queue for that operation is empty. Anything else gets an empty reply.
    #[derive(Debug, Clone, Default)]
    pub struct MockBackend {
        state: Arc<Mutex<MockState>>,
    }

    impl MockBackend {
        /// Creates a backend that accepts logins and answers every call empty
        pub fn new() -> Self {
            Self::default()
        }

        fn state(&self) -> MutexGuard<'_, MockState> {
            self.state.lock().unwrap_or_else(PoisonError::into_inner)
        }

        /// Returns a connector whose handles talk to this backend
        pub fn connector(&self) -> MockConnector {
            MockConnector {
                backend: self.clone(),
            }
        }

        /// Queues a one-shot reply for `operation`
        pub fn respond(&self, operation: Operation, reply: MockReply) -> &Self {
            self.state()
                .scripted
                .entry(operation)
                .or_default()
                .push_back(reply);
            self
        }

        /// Sets the reply used once the queue for `operation` is drained
        pub fn respond_always(&self, operation: Operation, reply: MockReply) -> &Self {
            self.state().fallback.insert(operation, reply);
            self
        }

        /// Makes `open` fail until switched back
        pub fn refuse_connections(&self, refuse: bool) {
            self.state().refuse_connections = refuse;
        }

        /// Makes `login` fail until switched back
        pub fn reject_login(&self, reject: bool) {
            self.state().reject_login = reject;
        }

        /// Simulates the backend dropping the session
        pub fn drop_connection(&self) {
            self.state().connected = false;
        }

        /// Every call received, in order
        pub fn calls(&self) -> Vec<RecordedCall> {
            self.state().calls.clone()
        }

        /// Operation names of every call received, in order
        pub fn operations(&self) -> Vec<Operation> {
            self.state().calls.iter().map(|call| call.operation).collect()
        }

        /// Number of calls received for `operation`
        pub fn call_count(&self, operation: Operation) -> usize {
            self.state()
                .calls
                .iter()
                .filter(|call| call.operation == operation)
                .count()
        }

        /// Number of connection handles created
        pub fn handles_created(&self) -> usize {
            self.state().handles_created
        }

        /// Number of transport opens attempted
        pub fn open_count(&self) -> usize {
            self.state().opens
        }

        /// Number of logins attempted
        pub fn login_count(&self) -> usize {
            self.state().logins
        }

        /// Number of times an open session was closed
        pub fn close_count(&self) -> usize {
            self.state().closes
        }

        /// Whether a session is currently open
        pub fn is_connected(&self) -> bool {
            self.state().connected
        }
    }

    /// Connector for [`MockBackend`]
    #[derive(Debug, Clone)]
    pub struct MockConnector {
        backend: MockBackend,
    }

    impl Connector for MockConnector {
        type Connection = MockConnection;

        fn create(&self, _config: &SessionConfig) -> MockConnection {
            self.backend.state().handles_created += 1;
            MockConnection {
                backend: self.backend.clone(),
                last_request: None,
                last_response: None,
            }
        }
    }

    /// Handle onto a [`MockBackend`]
    #[derive(Debug)]
    pub struct MockConnection {
        backend: MockBackend,
        last_request: Option<String>,
        last_response: Option<String>,
    }

    impl Connection for MockConnection {
        fn open(&mut self) -> Result<(), InventoryError> {
            let mut state = self.backend.state();
            state.opens += 1;
            if state.refuse_connections {
                return Err(InventoryError::connection("connection refused"));
            }
            state.connected = true;
            Ok(())
        }

        fn login(&mut self, username: &str, _password: &str) -> Result<(), InventoryError> {
            let mut state = self.backend.state();
            state.logins += 1;
            if state.reject_login {
                return Err(InventoryError::Authentication(format!(
                    "invalid credentials for {}",
                    username
                )));
            }
            Ok(())
        }

        fn is_connected(&self) -> bool {
            self.backend.state().connected
        }

        fn call(
            &mut self,
            operation: Operation,
            params: Value,
        ) -> Result<Option<Value>, InventoryError> {
            let mut state = self.backend.state();
            if !state.connected {
                return Err(InventoryError::NotConnected);
            }

            self.last_request =
                Some(json!({ "operation": operation, "params": &params }).to_string());
            state.calls.push(RecordedCall { operation, params });

            let reply = state
                .scripted
                .get_mut(&operation)
                .and_then(VecDeque::pop_front)
                .or_else(|| state.fallback.get(&operation).cloned())
                .unwrap_or(MockReply::Empty);

            match reply {
                MockReply::Payload(value) => {
                    self.last_response = Some(value.to_string());
                    Ok(Some(value))
                }
                MockReply::Empty => {
                    self.last_response = Some(Value::Null.to_string());
                    Ok(None)
                }
                MockReply::Fail(error) => {
                    self.last_response = Some(json!({ "error": error.to_string() }).to_string());
                    Err(error)
                }
            }
        }

        fn close(&mut self) {
            let mut state = self.backend.state();
            if state.connected {
                state.connected = false;
                state.closes += 1;
            }
        }

        fn last_request(&self) -> Option<String> {
            self.last_request.clone()
        }

        fn last_response(&self) -> Option<String> {
            self.last_response.clone()
        }
    }
}
