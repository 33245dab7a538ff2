//! Products and variants
//!
//! A product always has a master variant. Products with options also have
//! "true" variants; for those the master only carries shared attributes and
//! has no stock of its own.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{ProductId, VariantId};

/// A storefront product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// True when the product has variants other than its master
    pub has_variants: bool,
}

impl Product {
    /// Creates a product without option variants
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ProductId::new(),
            name: name.into(),
            has_variants: false,
        }
    }

    /// Marks whether the product has option variants
    pub fn with_variants(mut self, has_variants: bool) -> Self {
        self.has_variants = has_variants;
        self
    }
}

/// A purchasable variant of a product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub id: VariantId,
    pub sku: String,
    pub is_master: bool,
    pub price: Decimal,
    pub product: Product,
}

impl Variant {
    /// Creates a non-master variant of `product`
    pub fn new(product: &Product, sku: impl Into<String>) -> Self {
        Self {
            id: VariantId::new(),
            sku: sku.into(),
            is_master: false,
            price: Decimal::ZERO,
            product: product.clone(),
        }
    }

    /// Creates the master variant of `product`
    pub fn master(product: &Product, sku: impl Into<String>) -> Self {
        Self {
            is_master: true,
            ..Self::new(product, sku)
        }
    }

    /// Sets the unit price
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = price;
        self
    }

    /// Returns true if the SKU is empty or whitespace
    pub fn sku_is_blank(&self) -> bool {
        self.sku.trim().is_empty()
    }

    /// Whether stock for this variant is held in the inventory backend
    ///
    /// Variants without a SKU cannot be matched to a part, and the master of a
    /// product with option variants never holds stock itself.
    pub fn tracks_inventory(&self) -> bool {
        !self.sku_is_blank() && !(self.is_master && self.product.has_variants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_master_of_simple_product_tracks_inventory() {
        let mug = Product::new("Mug");
        let master = Variant::master(&mug, "MUG-1");
        assert!(master.tracks_inventory());
    }

    #[test]
    fn test_master_of_product_with_variants_is_skipped() {
        let shirt = Product::new("Shirt").with_variants(true);
        assert!(!Variant::master(&shirt, "SHIRT").tracks_inventory());
        assert!(Variant::new(&shirt, "SHIRT-M").tracks_inventory());
    }

    #[test]
    fn test_blank_sku_is_skipped() {
        let mug = Product::new("Mug");
        assert!(!Variant::new(&mug, " ").tracks_inventory());
    }
}
