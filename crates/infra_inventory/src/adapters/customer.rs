//! Customer adapter

use domain_commerce::Order;

use crate::adapters::{customer_name, wire_address};
use crate::wire::{AddressKind, Customer};

/// Status given to customers created from storefront orders
pub const DEFAULT_CUSTOMER_STATUS: &str = "Normal";

/// Builds the backend customer record for an order
pub trait CustomerAdapter: Send + Sync {
    fn adapt(&self, order: &Order) -> Customer;
}

/// Customer built from the order's billing and shipping details
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCustomerAdapter;

impl CustomerAdapter for DefaultCustomerAdapter {
    fn adapt(&self, order: &Order) -> Customer {
        let mut addresses = Vec::new();
        if let Some(bill) = &order.bill_address {
            addresses.push(wire_address(bill, AddressKind::Billing));
        }
        if let Some(ship) = order.effective_ship_address() {
            addresses.push(wire_address(ship, AddressKind::Shipping));
        }

        Customer {
            name: customer_name(order).unwrap_or_default(),
            number: None,
            status: DEFAULT_CUSTOMER_STATUS.to_string(),
            active: true,
            email: order.email.clone(),
            phone: order
                .bill_address
                .as_ref()
                .and_then(|address| address.phone.clone()),
            default_carrier: order.shipping_method.clone(),
            addresses,
        }
    }
}
