//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use domain_commerce::{Address, LineItem, Order, Product, Variant};
use infra_inventory::connection::mock::{MockBackend, MockConnector};
use infra_inventory::{SessionClient, SessionConfig};

use crate::fixtures::{CatalogFixtures, ConfigFixtures};

/// Builder for storefront orders
pub struct TestOrderBuilder {
    number: String,
    so_number: Option<String>,
    email: Option<String>,
    bill_address: Option<Address>,
    ship_address: Option<Address>,
    shipping_method: Option<String>,
    line_items: Vec<LineItem>,
}

impl Default for TestOrderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestOrderBuilder {
    /// Creates a builder for an order with a random customer and one line item
    pub fn new() -> Self {
        let firstname: String = FirstName().fake();
        let lastname: String = LastName().fake();
        let bill_address = Address::new(firstname, lastname, "1 Test Street", "Springfield", "12345", "US");
        Self {
            number: format!("R{:09}", (1..999_999_999u32).fake::<u32>()),
            so_number: Some("SO-5000".to_string()),
            email: Some(SafeEmail().fake()),
            bill_address: Some(bill_address),
            ship_address: None,
            shipping_method: Some("UPS Ground".to_string()),
            line_items: vec![LineItem::new(TestVariantBuilder::new().build(), 1)],
        }
    }

    /// Sets the storefront order number
    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = number.into();
        self
    }

    /// Sets the sales order number, `None` for an order not yet submitted
    pub fn with_so_number(mut self, so_number: Option<&str>) -> Self {
        self.so_number = so_number.map(str::to_string);
        self
    }

    /// Sets the contact email
    pub fn with_email(mut self, email: Option<&str>) -> Self {
        self.email = email.map(str::to_string);
        self
    }

    /// Sets the billing address
    pub fn with_bill_address(mut self, address: Option<Address>) -> Self {
        self.bill_address = address;
        self
    }

    /// Sets the shipping address
    pub fn with_ship_address(mut self, address: Address) -> Self {
        self.ship_address = Some(address);
        self
    }

    /// Sets the billing company
    pub fn with_company(mut self, company: &str) -> Self {
        if let Some(address) = self.bill_address.take() {
            self.bill_address = Some(address.with_company(company));
        }
        self
    }

    /// Sets the shipping method
    pub fn with_shipping_method(mut self, method: Option<&str>) -> Self {
        self.shipping_method = method.map(str::to_string);
        self
    }

    /// Replaces the line items
    pub fn with_line_items(mut self, items: Vec<LineItem>) -> Self {
        self.line_items = items;
        self
    }

    /// Builds the order
    pub fn build(self) -> Order {
        let mut order = Order::new(self.number);
        order.so_number = self.so_number;
        order.email = self.email;
        order.bill_address = self.bill_address;
        order.ship_address = self.ship_address;
        order.shipping_method = self.shipping_method;
        order.line_items = self.line_items;
        order
    }
}

/// Builder for storefront variants
pub struct TestVariantBuilder {
    product: Product,
    sku: String,
    is_master: bool,
    price: Decimal,
}

impl Default for TestVariantBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestVariantBuilder {
    /// Creates a builder for a master variant of a product without options
    pub fn new() -> Self {
        Self {
            product: CatalogFixtures::mug(),
            sku: "MUG-01".to_string(),
            is_master: true,
            price: dec!(12.00),
        }
    }

    /// Sets the SKU
    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = sku.into();
        self
    }

    /// Sets whether this is the product's master variant
    pub fn master(mut self, is_master: bool) -> Self {
        self.is_master = is_master;
        self
    }

    /// Sets whether the product has option variants
    pub fn product_has_variants(mut self, has_variants: bool) -> Self {
        self.product = self.product.with_variants(has_variants);
        self
    }

    /// Sets the price
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = price;
        self
    }

    /// Builds the variant
    pub fn build(self) -> Variant {
        let variant = if self.is_master {
            Variant::master(&self.product, self.sku)
        } else {
            Variant::new(&self.product, self.sku)
        };
        variant.with_price(self.price)
    }
}

/// Builder for a session client wired to a scripted backend
pub struct TestClientBuilder {
    config: SessionConfig,
    backend: MockBackend,
}

impl Default for TestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClientBuilder {
    /// Creates a builder using the configured fixture and a fresh backend
    pub fn new() -> Self {
        Self {
            config: ConfigFixtures::configured(),
            backend: MockBackend::new(),
        }
    }

    /// Replaces the session configuration
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the retry budget
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.config = self.config.with_max_retries(max_retries);
        self
    }

    /// Sets whether connections close after every request
    pub fn with_auto_close(mut self, auto_close: bool) -> Self {
        self.config = self.config.with_auto_close(auto_close);
        self
    }

    /// Uses an existing backend, so its script can be set up first
    pub fn with_backend(mut self, backend: MockBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Builds the client, returning the backend that observes it
    pub fn build(self) -> (MockBackend, SessionClient<MockConnector>) {
        let client = SessionClient::with_connector(self.config, self.backend.connector());
        (self.backend, client)
    }
}
