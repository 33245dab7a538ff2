//! Inventory Backend Session Client
//!
//! This crate connects the commerce domain to an external warehouse and
//! inventory service. It owns one authenticated session with the backend,
//! executes the backend's named operations, retries transient failures and
//! records the raw traffic of the last request for support tooling.
//!
//! # Architecture
//!
//! - [`SessionClient`]: session lifecycle, request execution and the
//!   higher-level catalog/order operations
//! - [`Connection`] / [`Connector`]: the port between the client and the wire;
//!   [`TcpConnector`] is the production transport
//! - [`protocol`]: the closed set of remote operations and their reply types
//! - [`adapters`]: storefront order → backend customer / sales order
//!
//! # Error Handling
//!
//! No public operation returns an error. Connection failures make `connect()`
//! return false; request failures return `None` (or an empty `Vec`) and leave
//! the cause in [`SessionClient::last_error`].
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_inventory::{SessionClient, SessionConfig};
//!
//! let mut client = SessionClient::new(SessionConfig::from_env()?);
//! client.set_auto_close(false);
//! for (variant, available) in client.all_available_inventory(variants) {
//!     println!("{} {:?}", variant.sku, available);
//! }
//! client.disconnect();
//! ```

pub mod adapters;
pub mod client;
pub mod config;
pub mod connection;
pub mod error;
pub mod orders;
pub mod protocol;
pub mod queries;
pub mod transport;
pub mod wire;

pub use adapters::{CustomerAdapter, DefaultCustomerAdapter, DefaultSalesOrderAdapter, SalesOrderAdapter};
pub use client::{Diagnostics, SessionClient};
pub use config::SessionConfig;
pub use connection::{Connection, Connector};
pub use error::{ErrorClass, InventoryError};
pub use protocol::{Operation, RemoteOperation};
pub use transport::{TcpConnection, TcpConnector};
