//! Catalog and stock lookups
//!
//! Thin wrappers over [`SessionClient::execute`]. Object lookups return
//! `None` when the backend has nothing (or the request failed); list lookups
//! return an empty `Vec` instead.

use rust_decimal::Decimal;
use tracing::debug;

use domain_commerce::Variant;

use crate::client::SessionClient;
use crate::connection::Connector;
use crate::protocol::{
    GetCarrierList, GetCustomer, GetInventoryQuantity, GetLightPartList, GetLocationGroupList,
    GetPart, GetProduct,
};
use crate::wire::{Customer, LightPart, Part, Product};

impl<C: Connector> SessionClient<C> {
    /// Looks up a customer by exact name
    pub fn customer(&mut self, name: &str) -> Option<Customer> {
        self.execute(
            &GetCustomer {
                name: name.to_string(),
            },
            None,
        )
    }

    /// Names of all carriers
    pub fn carriers(&mut self) -> Vec<String> {
        self.execute(&GetCarrierList {}, None).unwrap_or_default()
    }

    /// Names of all location groups
    pub fn location_groups(&mut self) -> Vec<String> {
        self.execute(&GetLocationGroupList {}, None)
            .unwrap_or_default()
    }

    /// Fetches a part by SKU, in the given or configured location group
    pub fn part(&mut self, sku: &str, location_group: Option<&str>) -> Option<Part> {
        let location_group = self.resolve_location_group(location_group);
        self.execute(
            &GetPart {
                part_num: sku.to_string(),
                location_group,
            },
            None,
        )
    }

    /// Fetches a product by SKU
    pub fn product(&mut self, sku: &str) -> Option<Product> {
        self.execute(
            &GetProduct {
                product_num: sku.to_string(),
            },
            None,
        )
    }

    /// Summary of every part
    pub fn parts(&mut self) -> Vec<LightPart> {
        self.execute(&GetLightPartList {}, None).unwrap_or_default()
    }

    /// Quantity available for a variant
    ///
    /// Resolves the variant's product first, then asks for the stock of the
    /// part behind it. Returns `None` for blank SKUs, unknown products,
    /// products without a part, and failed requests.
    pub fn available_inventory(
        &mut self,
        variant: &Variant,
        location_group: Option<&str>,
    ) -> Option<Decimal> {
        if variant.sku_is_blank() {
            return None;
        }
        let location_group = self.resolve_location_group(location_group);

        let product = self.product(variant.sku.trim())?;
        let Some(part) = product.part else {
            debug!(sku = %variant.sku, "Product has no part, no stock to report");
            return None;
        };

        self.execute(
            &GetInventoryQuantity {
                part_number: part.num,
                location_group,
            },
            None,
        )
        .map(|quantity| quantity.qty_available)
    }

    /// Available inventory for every variant whose stock the backend holds
    ///
    /// Skips variants with a blank SKU and masters of products that have
    /// option variants. Requests are made lazily, one variant at a time, as
    /// the iterator is advanced.
    pub fn all_available_inventory<'a, I>(
        &'a mut self,
        variants: I,
    ) -> impl Iterator<Item = (Variant, Option<Decimal>)> + 'a
    where
        I: IntoIterator<Item = Variant>,
        I::IntoIter: 'a,
    {
        variants
            .into_iter()
            .filter(Variant::tracks_inventory)
            .map(move |variant| {
                let inventory = self.available_inventory(&variant, None);
                (variant, inventory)
            })
    }

    fn resolve_location_group(&self, location_group: Option<&str>) -> Option<String> {
        location_group
            .map(str::to_string)
            .or_else(|| self.config.location_group.clone())
    }
}
