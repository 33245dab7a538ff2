//! Commerce Domain
//!
//! Read-only views of the storefront records that the inventory client
//! consumes: orders with their addresses and line items, and the product
//! variants whose stock is mirrored from the inventory backend.
//!
//! Nothing in this crate talks to the backend. The session client reads these
//! types and never mutates them.
//!
//! # Examples
//!
//! ```rust
//! use domain_commerce::{Address, Order, Product, Variant};
//!
//! let shirt = Product::new("T-Shirt").with_variants(true);
//! let master = Variant::master(&shirt, "TS-MASTER");
//! let small = Variant::new(&shirt, "TS-S");
//!
//! assert!(!master.tracks_inventory());
//! assert!(small.tracks_inventory());
//!
//! let order = Order::new("R100200300")
//!     .with_so_number("SO-1042")
//!     .with_bill_address(Address::new("Ada", "Lovelace", "12 Analytical Way", "London", "N1 9GU", "GB"));
//!
//! assert_eq!(order.so_number.as_deref(), Some("SO-1042"));
//! ```

pub mod address;
pub mod catalog;
pub mod order;

pub use address::Address;
pub use catalog::{Product, Variant};
pub use order::{LineItem, Order};
