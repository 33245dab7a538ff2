//! Wire-level payloads exchanged with the inventory backend
//!
//! These mirror the backend's record shapes, not the storefront's. The
//! adapters in [`crate::adapters`] build the outbound ones from commerce
//! orders; the inbound ones are returned to callers unchanged.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Status the backend reports for a shipment that has left the warehouse
pub const SHIPPED_STATUS: &str = "Shipped";

/// Whether an address is used for billing or shipping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressKind {
    Billing,
    Shipping,
}

/// A customer or order address as the backend stores it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireAddress {
    pub kind: AddressKind,
    /// Addressee shown on labels
    pub name: String,
    pub attention: Option<String>,
    pub street: String,
    pub city: String,
    pub state: Option<String>,
    pub zip: String,
    pub country: String,
    #[serde(default)]
    pub is_default: bool,
}

/// A backend customer record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub number: Option<String>,
    pub status: String,
    #[serde(default = "default_true")]
    pub active: bool,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub default_carrier: Option<String>,
    #[serde(default)]
    pub addresses: Vec<WireAddress>,
}

/// One line of a backend sales order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesOrderItem {
    pub product_number: String,
    pub description: Option<String>,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub uom: String,
}

/// A backend sales order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesOrder {
    /// Sales order number; assigned by the backend when absent
    pub number: Option<String>,
    pub customer_name: Option<String>,
    pub customer_contact: Option<String>,
    pub customer_po: Option<String>,
    pub email: Option<String>,
    pub status: String,
    pub carrier: Option<String>,
    pub location_group: Option<String>,
    pub bill_to: Option<WireAddress>,
    pub ship_to: Option<WireAddress>,
    #[serde(default)]
    pub items: Vec<SalesOrderItem>,
    pub currency: Option<String>,
    pub total: Decimal,
}

impl SalesOrder {
    /// The customer name, if present and not blank
    pub fn customer_name(&self) -> Option<&str> {
        self.customer_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// A stocked part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub num: String,
    pub description: Option<String>,
    pub uom: Option<String>,
    pub upc: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

/// A sellable product, linked to the part that holds its stock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub num: String,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub part: Option<Part>,
}

/// Summary row from the light part list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightPart {
    pub num: String,
    pub description: Option<String>,
    pub uom: Option<String>,
}

/// Stock levels for one part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryQuantity {
    pub part_number: String,
    pub location_group: Option<String>,
    pub qty_on_hand: Decimal,
    pub qty_allocated: Decimal,
    pub qty_available: Decimal,
}

/// Summary row from the ship list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipResult {
    pub ship_id: i64,
    pub ship_number: Option<String>,
    pub order_number: String,
    pub status: String,
    pub carrier: Option<String>,
}

impl ShipResult {
    /// True if the entry belongs to `order_number` and has shipped
    pub fn is_shipped_for(&self, order_number: &str) -> bool {
        self.order_number == order_number && self.status == SHIPPED_STATUS
    }
}

/// One packed line of a shipment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentItem {
    pub product_number: String,
    pub quantity: Decimal,
}

/// Full shipment detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    pub id: i64,
    pub number: Option<String>,
    pub order_number: String,
    pub status: String,
    pub carrier: Option<String>,
    #[serde(default)]
    pub tracking_numbers: Vec<String>,
    pub date_shipped: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items: Vec<ShipmentItem>,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ship_result_filter() {
        let entry = ShipResult {
            ship_id: 7,
            ship_number: Some("S-7".to_string()),
            order_number: "SO-1".to_string(),
            status: SHIPPED_STATUS.to_string(),
            carrier: None,
        };
        assert!(entry.is_shipped_for("SO-1"));
        assert!(!entry.is_shipped_for("SO-2"));

        let packed = ShipResult {
            status: "Packed".to_string(),
            ..entry
        };
        assert!(!packed.is_shipped_for("SO-1"));
    }

    #[test]
    fn test_product_without_part_decodes() {
        let product: Product = serde_json::from_value(json!({
            "num": "HOODIE-L",
            "description": "Hoodie, large"
        }))
        .unwrap();
        assert!(product.part.is_none());
        assert!(product.price.is_none());
    }

    #[test]
    fn test_customer_defaults_active() {
        let customer: Customer = serde_json::from_value(json!({
            "name": "Ada Lovelace",
            "status": "Normal"
        }))
        .unwrap();
        assert!(customer.active);
        assert!(customer.addresses.is_empty());
    }
}
