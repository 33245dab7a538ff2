//! Order Adapters
//!
//! Adapters translate storefront orders into the backend's wire payloads.
//! The session client calls them when creating customers and sales orders;
//! applications with their own naming rules can supply replacements through
//! [`crate::SessionClient::with_adapters`].
//!
//! # Customer naming
//!
//! Both default adapters resolve the backend customer name the same way, so a
//! sales order always refers to the customer record created for its order:
//!
//! 1. the billing address company, if any
//! 2. otherwise the billing addressee's full name
//! 3. otherwise the order email

pub mod customer;
pub mod sales_order;

pub use customer::{CustomerAdapter, DefaultCustomerAdapter};
pub use sales_order::{DefaultSalesOrderAdapter, SalesOrderAdapter};

use domain_commerce::{Address, Order};

use crate::wire::{AddressKind, WireAddress};

/// Resolves the backend customer name for an order
pub fn customer_name(order: &Order) -> Option<String> {
    let from_address = order.bill_address.as_ref().and_then(|address| {
        address
            .company_name()
            .map(str::to_string)
            .or_else(|| Some(address.full_name()).filter(|name| !name.is_empty()))
    });

    from_address.or_else(|| {
        order
            .email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .map(str::to_string)
    })
}

/// Converts a storefront address into the backend's address record
pub fn wire_address(address: &Address, kind: AddressKind) -> WireAddress {
    let full_name = address.full_name();
    let (name, attention) = match address.company_name() {
        Some(company) => (
            company.to_string(),
            Some(full_name).filter(|name| !name.is_empty()),
        ),
        None => (full_name, None),
    };

    WireAddress {
        kind,
        name,
        attention,
        street: address.street(),
        city: address.city.clone(),
        state: address.state.clone(),
        zip: address.zipcode.clone(),
        country: address.country.clone(),
        is_default: true,
    }
}
