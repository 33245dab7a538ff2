//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for session configs, storefront records and
//! backend payloads. These fixtures are consistent and predictable so tests can
//! assert on exact values.

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use domain_commerce::{Address, LineItem, Order, Product, Variant};
use infra_inventory::wire::{
    Customer, InventoryQuantity, Part, Product as WireProduct, SalesOrder, ShipResult, Shipment,
    ShipmentItem, SHIPPED_STATUS,
};
use infra_inventory::SessionConfig;

/// Fixture for session configuration
pub struct ConfigFixtures;

impl ConfigFixtures {
    /// Default location group used by the configured fixture
    pub const LOCATION_GROUP: &'static str = "Main Warehouse";

    /// A fully configured session
    pub fn configured() -> SessionConfig {
        SessionConfig::new("inventory.test", "admin", "secret")
            .with_location_group(Self::LOCATION_GROUP)
    }

    /// Configured session with a specific retry budget
    pub fn with_retries(max_retries: u32) -> SessionConfig {
        Self::configured().with_max_retries(max_retries)
    }

    /// Sessions that must never reach the network
    pub fn unconfigured() -> Vec<SessionConfig> {
        vec![
            SessionConfig::default(),
            SessionConfig::new("", "admin", "secret"),
            SessionConfig::new("inventory.test", "", "secret"),
            SessionConfig::new("inventory.test", "admin", ""),
            SessionConfig::new("  ", "admin", "secret"),
            Self::configured().with_enabled(false),
        ]
    }
}

/// Fixture for storefront catalog data
pub struct CatalogFixtures;

impl CatalogFixtures {
    /// A product without option variants
    pub fn mug() -> Product {
        Product::new("Enamel Mug")
    }

    /// A product with size variants
    pub fn hoodie() -> Product {
        Product::new("Zip Hoodie").with_variants(true)
    }

    /// Mixed variants: the eligible ones are `MUG-01`, `HOODIE-S` and `HOODIE-L`
    pub fn mixed_variants() -> Vec<Variant> {
        let mug = Self::mug();
        let hoodie = Self::hoodie();
        vec![
            Variant::master(&mug, "MUG-01").with_price(dec!(12.00)),
            Variant::master(&hoodie, "HOODIE").with_price(dec!(45.00)),
            Variant::new(&hoodie, "HOODIE-S").with_price(dec!(45.00)),
            Variant::new(&hoodie, "").with_price(dec!(45.00)),
            Variant::new(&hoodie, "HOODIE-L").with_price(dec!(48.00)),
        ]
    }

    /// SKUs of the eligible entries of `mixed_variants`, in order
    pub fn mixed_eligible_skus() -> Vec<&'static str> {
        vec!["MUG-01", "HOODIE-S", "HOODIE-L"]
    }
}

/// Fixture for storefront orders
pub struct OrderFixtures;

impl OrderFixtures {
    /// Sales order number of `standard_order`
    pub const SO_NUMBER: &'static str = "SO-1042";

    /// Customer name resolved for `standard_order`
    pub const CUSTOMER_NAME: &'static str = "Ada Lovelace";

    /// Billing address for Ada Lovelace
    pub fn bill_address() -> Address {
        Address::new("Ada", "Lovelace", "12 Analytical Way", "London", "N1 9GU", "GB")
            .with_phone("+44 20 7946 0000")
    }

    /// A complete order with a sales order number and two line items
    pub fn standard_order() -> Order {
        let hoodie = CatalogFixtures::hoodie();
        let mug = CatalogFixtures::mug();
        let mut order = Order::new("R100200300")
            .with_so_number(Self::SO_NUMBER)
            .with_email("ada@example.com")
            .with_bill_address(Self::bill_address())
            .with_shipping_method("UPS Ground")
            .with_line_item(LineItem::new(
                Variant::new(&hoodie, "HOODIE-L").with_price(dec!(48.00)),
                1,
            ))
            .with_line_item(LineItem::new(
                Variant::master(&mug, "MUG-01").with_price(dec!(12.00)),
                3,
            ));
        order.completed_at = Some(Utc.with_ymd_and_hms(2024, 3, 14, 9, 30, 0).unwrap());
        order
    }

    /// An order without any details to derive a customer name from
    pub fn anonymous_order() -> Order {
        Order::new("R900000001").with_so_number("SO-9001")
    }
}

/// Fixture for backend payloads
pub struct WireFixtures;

impl WireFixtures {
    /// An existing backend customer
    pub fn customer(name: &str) -> Customer {
        Customer {
            name: name.to_string(),
            number: Some("C-100".to_string()),
            status: "Normal".to_string(),
            active: true,
            email: None,
            phone: None,
            default_carrier: None,
            addresses: Vec::new(),
        }
    }

    /// A stocked part
    pub fn part(num: &str) -> Part {
        Part {
            num: num.to_string(),
            description: Some(format!("Part {}", num)),
            uom: Some("ea".to_string()),
            upc: None,
            active: true,
        }
    }

    /// A product backed by part `part_num`
    pub fn product(sku: &str, part_num: &str) -> WireProduct {
        WireProduct {
            num: sku.to_string(),
            description: None,
            price: None,
            part: Some(Self::part(part_num)),
        }
    }

    /// A product with no part behind it
    pub fn product_without_part(sku: &str) -> WireProduct {
        WireProduct {
            part: None,
            ..Self::product(sku, "")
        }
    }

    /// Stock levels with `available` units free
    pub fn inventory(part_num: &str, available: Decimal) -> InventoryQuantity {
        InventoryQuantity {
            part_number: part_num.to_string(),
            location_group: Some(ConfigFixtures::LOCATION_GROUP.to_string()),
            qty_on_hand: available + dec!(2),
            qty_allocated: dec!(2),
            qty_available: available,
        }
    }

    /// A ship list entry
    pub fn ship_result(ship_id: i64, order_number: &str, status: &str) -> ShipResult {
        ShipResult {
            ship_id,
            ship_number: Some(format!("S{}", ship_id)),
            order_number: order_number.to_string(),
            status: status.to_string(),
            carrier: Some("UPS".to_string()),
        }
    }

    /// Full detail of a shipped shipment
    pub fn shipment(id: i64, order_number: &str) -> Shipment {
        Shipment {
            id,
            number: Some(format!("S{}", id)),
            order_number: order_number.to_string(),
            status: SHIPPED_STATUS.to_string(),
            carrier: Some("UPS".to_string()),
            tracking_numbers: vec![format!("1Z{:08}", id)],
            date_shipped: Some(Utc.with_ymd_and_hms(2024, 3, 15, 16, 0, 0).unwrap()),
            items: vec![ShipmentItem {
                product_number: "HOODIE-L".to_string(),
                quantity: dec!(1),
            }],
        }
    }

    /// The sales order the backend echoes back after saving
    pub fn saved_sales_order(number: &str, customer_name: &str) -> SalesOrder {
        SalesOrder {
            number: Some(number.to_string()),
            customer_name: Some(customer_name.to_string()),
            customer_contact: None,
            customer_po: None,
            email: None,
            status: "Issued".to_string(),
            carrier: None,
            location_group: Some(ConfigFixtures::LOCATION_GROUP.to_string()),
            bill_to: None,
            ship_to: None,
            items: Vec::new(),
            currency: Some("USD".to_string()),
            total: dec!(84.00),
        }
    }
}
