//! Orders and line items

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{LineItemId, OrderId};

use crate::address::Address;
use crate::catalog::Variant;

/// A single purchased variant on an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: LineItemId,
    pub variant: Variant,
    pub quantity: u32,
    /// Unit price charged on this order
    pub price: Decimal,
}

impl LineItem {
    /// Creates a line item priced at the variant's current price
    pub fn new(variant: Variant, quantity: u32) -> Self {
        let price = variant.price;
        Self {
            id: LineItemId::new(),
            variant,
            quantity,
            price,
        }
    }

    /// Overrides the unit price
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = price;
        self
    }

    /// Quantity times unit price
    pub fn amount(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// A completed storefront order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Storefront order number, e.g. "R123456789"
    pub number: String,
    /// Sales order number assigned in the inventory backend
    pub so_number: Option<String>,
    pub email: Option<String>,
    pub bill_address: Option<Address>,
    pub ship_address: Option<Address>,
    pub line_items: Vec<LineItem>,
    /// Name of the shipping method chosen at checkout
    pub shipping_method: Option<String>,
    pub currency: String,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Creates an empty order with the given storefront number
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            id: OrderId::new(),
            number: number.into(),
            so_number: None,
            email: None,
            bill_address: None,
            ship_address: None,
            line_items: Vec::new(),
            shipping_method: None,
            currency: "USD".to_string(),
            completed_at: None,
        }
    }

    /// Sets the backend sales order number
    pub fn with_so_number(mut self, so_number: impl Into<String>) -> Self {
        self.so_number = Some(so_number.into());
        self
    }

    /// Sets the contact email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the billing address
    pub fn with_bill_address(mut self, address: Address) -> Self {
        self.bill_address = Some(address);
        self
    }

    /// Sets the shipping address
    pub fn with_ship_address(mut self, address: Address) -> Self {
        self.ship_address = Some(address);
        self
    }

    /// Sets the shipping method name
    pub fn with_shipping_method(mut self, method: impl Into<String>) -> Self {
        self.shipping_method = Some(method.into());
        self
    }

    /// Appends a line item
    pub fn with_line_item(mut self, item: LineItem) -> Self {
        self.line_items.push(item);
        self
    }

    /// Sum of all line item amounts
    pub fn item_total(&self) -> Decimal {
        self.line_items.iter().map(LineItem::amount).sum()
    }

    /// The sales order number, if one is set and not blank
    pub fn so_number(&self) -> Option<&str> {
        self.so_number
            .as_deref()
            .map(str::trim)
            .filter(|number| !number.is_empty())
    }

    /// Shipping address, falling back to the billing address
    pub fn effective_ship_address(&self) -> Option<&Address> {
        self.ship_address.as_ref().or(self.bill_address.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use rust_decimal_macros::dec;

    #[test]
    fn test_item_total() {
        let mug = Product::new("Mug");
        let order = Order::new("R1")
            .with_line_item(LineItem::new(Variant::master(&mug, "MUG").with_price(dec!(8.50)), 2))
            .with_line_item(LineItem::new(Variant::master(&mug, "MUG").with_price(dec!(1.25)), 4));

        assert_eq!(order.item_total(), dec!(22.00));
    }

    #[test]
    fn test_blank_so_number_is_none() {
        let order = Order::new("R1").with_so_number("  ");
        assert_eq!(order.so_number(), None);
    }

    #[test]
    fn test_ship_address_falls_back_to_billing() {
        let bill = Address::new("A", "B", "1 Road", "Town", "00001", "US");
        let order = Order::new("R1").with_bill_address(bill.clone());
        assert_eq!(order.effective_ship_address(), Some(&bill));
    }
}
