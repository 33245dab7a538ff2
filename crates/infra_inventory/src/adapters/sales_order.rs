//! Sales order adapter

use rust_decimal::Decimal;

use domain_commerce::{LineItem, Order};

use crate::adapters::{customer_name, wire_address};
use crate::wire::{AddressKind, SalesOrder, SalesOrderItem};

/// Status of a sales order before it is issued
pub const ESTIMATE_STATUS: &str = "Estimate";

/// Unit of measure for storefront line items
pub const EACH_UOM: &str = "ea";

/// Builds the backend sales order for an order
///
/// The returned order's `customer_name` is what the client looks up (and,
/// if missing, creates) before submitting the sales order.
pub trait SalesOrderAdapter: Send + Sync {
    fn adapt(&self, order: &Order) -> SalesOrder;
}

/// Sales order with one item per storefront line item
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSalesOrderAdapter;

impl SalesOrderAdapter for DefaultSalesOrderAdapter {
    fn adapt(&self, order: &Order) -> SalesOrder {
        SalesOrder {
            number: order.so_number().map(str::to_string),
            customer_name: customer_name(order),
            customer_contact: order
                .bill_address
                .as_ref()
                .map(|address| address.full_name())
                .filter(|name| !name.is_empty()),
            customer_po: Some(order.number.clone()),
            email: order.email.clone(),
            status: ESTIMATE_STATUS.to_string(),
            carrier: order.shipping_method.clone(),
            location_group: None,
            bill_to: order
                .bill_address
                .as_ref()
                .map(|address| wire_address(address, AddressKind::Billing)),
            ship_to: order
                .effective_ship_address()
                .map(|address| wire_address(address, AddressKind::Shipping)),
            items: order.line_items.iter().map(sales_order_item).collect(),
            currency: Some(order.currency.clone()),
            total: order.item_total(),
        }
    }
}

fn sales_order_item(item: &LineItem) -> SalesOrderItem {
    SalesOrderItem {
        product_number: item.variant.sku.trim().to_string(),
        description: Some(item.variant.product.name.clone()),
        quantity: Decimal::from(item.quantity),
        unit_price: item.price,
        total_price: item.amount(),
        uom: EACH_UOM.to_string(),
    }
}
