//! Session client
//!
//! Owns at most one connection handle to the inventory backend and drives it
//! through the session lifecycle:
//!
//! ```text
//! Disconnected ──connect()──▶ Connecting ──login ok──▶ Connected
//!      ▲                          │                        │
//!      └────── open/login failed ─┘   close / failure ─────┘
//! ```
//!
//! `reconnect()` re-enters Connecting from any state. Failures never escape
//! as errors: connection problems make `connect()` return false, and request
//! failures make `execute()` return `None` with the cause recorded in
//! [`SessionClient::last_error`].

use serde_json::Value;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, debug_span, info, warn};

use core_kernel::{AdapterHealth, HealthCheckResult, HealthCheckable, OperationMetadata};

use crate::adapters::{
    CustomerAdapter, DefaultCustomerAdapter, DefaultSalesOrderAdapter, SalesOrderAdapter,
};
use crate::config::SessionConfig;
use crate::connection::{Connection, Connector};
use crate::error::InventoryError;
use crate::protocol::RemoteOperation;
use crate::transport::TcpConnector;

/// Identifier reported in health checks
pub const ADAPTER_ID: &str = "inventory-session-client";

/// Raw traffic and outcome of the most recent request
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    pub last_request: Option<String>,
    pub last_response: Option<String>,
    pub last_error: Option<InventoryError>,
}

/// Client for one logical session with the inventory backend
///
/// The client is synchronous and takes `&mut self` for anything that may
/// touch the network, so one instance serves one caller at a time. Wrap it in
/// a mutex to share it between threads.
///
/// # Example
///
/// ```rust,ignore
/// use infra_inventory::{SessionClient, SessionConfig};
///
/// let mut client = SessionClient::new(SessionConfig::from_env()?);
/// for carrier in client.carriers() {
///     println!("{carrier}");
/// }
/// if client.has_error() {
///     eprintln!("carrier lookup failed: {:?}", client.last_error());
/// }
/// ```
pub struct SessionClient<C: Connector = TcpConnector> {
    pub(crate) config: SessionConfig,
    connector: C,
    connection: Option<C::Connection>,
    auto_close: bool,
    diagnostics: Diagnostics,
    pub(crate) customer_adapter: Arc<dyn CustomerAdapter>,
    pub(crate) sales_order_adapter: Arc<dyn SalesOrderAdapter>,
}

impl SessionClient<TcpConnector> {
    /// Creates a client that talks to the backend over TCP
    pub fn new(config: SessionConfig) -> Self {
        Self::with_connector(config, TcpConnector)
    }
}

impl<C: Connector> SessionClient<C> {
    /// Creates a client using a custom connector
    pub fn with_connector(config: SessionConfig, connector: C) -> Self {
        let auto_close = config.auto_close;
        Self {
            config,
            connector,
            connection: None,
            auto_close,
            diagnostics: Diagnostics::default(),
            customer_adapter: Arc::new(DefaultCustomerAdapter),
            sales_order_adapter: Arc::new(DefaultSalesOrderAdapter),
        }
    }

    /// Replaces the adapters used to build customer and sales order payloads
    pub fn with_adapters(
        mut self,
        customer: Arc<dyn CustomerAdapter>,
        sales_order: Arc<dyn SalesOrderAdapter>,
    ) -> Self {
        self.customer_adapter = customer;
        self.sales_order_adapter = sales_order;
        self
    }

    /// Enables or disables closing the connection after every request
    ///
    /// With auto-close off the session stays open between requests and the
    /// caller must call [`SessionClient::disconnect`] when done.
    pub fn set_auto_close(&mut self, auto_close: bool) {
        self.auto_close = auto_close;
    }

    /// Whether connections close after every request
    pub fn auto_close(&self) -> bool {
        self.auto_close
    }

    /// The session configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// True when enabled and host, username and password are present
    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// True when a handle exists and reports itself connected
    pub fn is_connected(&self) -> bool {
        self.connection
            .as_ref()
            .is_some_and(|connection| connection.is_connected())
    }

    /// Opens and authenticates the session if it is not already open
    ///
    /// An existing but disconnected handle is re-opened rather than replaced.
    /// Failures are logged and reported through the return value only.
    pub fn connect(&mut self) -> bool {
        if !self.is_configured() {
            debug!("Inventory backend not configured, skipping connect");
            return false;
        }

        let config = &self.config;
        let connector = &self.connector;
        let connection = self
            .connection
            .get_or_insert_with(|| connector.create(config));
        let result = if connection.is_connected() {
            Ok(())
        } else {
            open_session(connection, config)
        };

        match result {
            Ok(()) => debug!(address = %self.config.address(), "Inventory session connected"),
            Err(e) => warn!(
                address = %self.config.address(),
                error = %e,
                "Failed to connect to inventory backend"
            ),
        }

        self.is_connected()
    }

    /// Closes the session if it is open; always returns true
    pub fn disconnect(&mut self) -> bool {
        if let Some(connection) = self.connection.as_mut() {
            if connection.is_connected() {
                connection.close();
            }
        }
        true
    }

    /// Closes and re-opens the session, returning the resulting connectivity
    pub fn reconnect(&mut self) -> bool {
        self.disconnect() && self.connect()
    }

    /// Error recorded by the most recent request, if it failed
    pub fn last_error(&self) -> Option<&InventoryError> {
        self.diagnostics.last_error.as_ref()
    }

    /// Whether the most recent request failed
    pub fn has_error(&self) -> bool {
        self.diagnostics.last_error.is_some()
    }

    /// Raw text of the most recent request
    pub fn last_request(&self) -> Option<&str> {
        self.diagnostics.last_request.as_deref()
    }

    /// Raw text of the most recent reply
    pub fn last_response(&self) -> Option<&str> {
        self.diagnostics.last_response.as_deref()
    }

    /// Snapshot of all diagnostic state
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Executes one remote operation
    ///
    /// Returns `Some(payload)` on success and `None` when the backend had no
    /// data or the request failed; check [`SessionClient::has_error`] to tell
    /// the two apart. Server-class failures are retried after a reconnect, up
    /// to `max_retries` times; status-class failures are never retried.
    pub fn execute<O: RemoteOperation>(
        &mut self,
        request: &O,
        metadata: Option<&OperationMetadata>,
    ) -> Option<O::Output> {
        let correlation_id = metadata.and_then(|m| m.correlation_id.as_deref());
        let order_id = metadata
            .and_then(|m| m.order_id)
            .map(|id| id.to_string());
        let span = debug_span!(
            "inventory_request",
            operation = %O::OPERATION,
            correlation_id = correlation_id.unwrap_or("-"),
            order_id = order_id.as_deref().unwrap_or("-")
        );
        let _entered = span.enter();

        if !self.is_connected() && !self.connect() {
            return None;
        }

        let mut scope = RequestScope { client: self };
        scope.run(request)
    }

    fn record_error(&mut self, error: InventoryError) {
        warn!(error = %error, "Inventory request failed");
        self.diagnostics.last_error = Some(error);
    }

    /// Captures raw traffic and closes the session when auto-close is on
    fn finish_request(&mut self) {
        if let Some(connection) = self.connection.as_mut() {
            self.diagnostics.last_request = connection.last_request();
            self.diagnostics.last_response = connection.last_response();
            if self.auto_close {
                connection.close();
            }
        }
    }
}

fn open_session<T: Connection>(
    connection: &mut T,
    config: &SessionConfig,
) -> Result<(), InventoryError> {
    connection.open()?;
    if let Err(e) = connection.login(&config.username, &config.password) {
        connection.close();
        return Err(e);
    }
    Ok(())
}

/// Borrow of the client for the duration of one `execute` call
///
/// Dropping the scope runs the diagnostic capture and conditional close, so
/// every exit path (success, exhausted retries, terminal error) shares it.
struct RequestScope<'a, C: Connector> {
    client: &'a mut SessionClient<C>,
}

impl<C: Connector> RequestScope<'_, C> {
    fn run<O: RemoteOperation>(&mut self, request: &O) -> Option<O::Output> {
        let params = match serde_json::to_value(request) {
            Ok(params) => params,
            Err(e) => {
                self.record_error(InventoryError::Encode {
                    operation: O::OPERATION.to_string(),
                    message: e.to_string(),
                });
                return None;
            }
        };

        let mut failures: u32 = 0;
        loop {
            self.diagnostics.last_error = None;

            match self.dispatch::<O>(params.clone()) {
                Ok(payload) => return payload,
                Err(e) if e.is_retryable() => {
                    failures += 1;
                    debug!(attempt = failures, error = %e, "Server-class failure");
                    if failures <= self.config.max_retries && self.reconnect() {
                        info!(attempt = failures + 1, "Retrying inventory request");
                        continue;
                    }
                    self.record_error(e);
                    return None;
                }
                Err(e) => {
                    self.record_error(e);
                    return None;
                }
            }
        }
    }

    fn dispatch<O: RemoteOperation>(&mut self, params: Value) -> Result<Option<O::Output>, InventoryError> {
        let connection = self
            .connection
            .as_mut()
            .ok_or(InventoryError::NotConnected)?;

        match connection.call(O::OPERATION, params)? {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| InventoryError::decode(O::OPERATION.as_str(), e)),
        }
    }
}

impl<C: Connector> Deref for RequestScope<'_, C> {
    type Target = SessionClient<C>;

    fn deref(&self) -> &Self::Target {
        self.client
    }
}

impl<C: Connector> DerefMut for RequestScope<'_, C> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.client
    }
}

impl<C: Connector> Drop for RequestScope<'_, C> {
    fn drop(&mut self) {
        self.client.finish_request();
    }
}

impl<C: Connector> HealthCheckable for SessionClient<C> {
    /// Opens a session and reports how long it took
    ///
    /// Reports `Unknown` without touching the network when unconfigured.
    fn health_check(&mut self) -> HealthCheckResult {
        if !self.is_configured() {
            return HealthCheckResult::new(ADAPTER_ID, AdapterHealth::Unknown, 0)
                .with_message("inventory backend is not configured");
        }

        let start = Instant::now();
        let connected = self.connect();
        let latency_ms = start.elapsed().as_millis() as u64;

        if self.auto_close {
            self.disconnect();
        }

        if connected {
            HealthCheckResult::new(ADAPTER_ID, AdapterHealth::Healthy, latency_ms)
        } else {
            HealthCheckResult::new(ADAPTER_ID, AdapterHealth::Unhealthy, latency_ms)
                .with_message(format!("unable to open a session with {}", self.config.address()))
        }
    }
}
