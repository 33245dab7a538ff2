//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use proptest::prelude::*;
use rust_decimal::Decimal;

use domain_commerce::{Product, Variant};
use infra_inventory::wire::{ShipResult, SHIPPED_STATUS};
use infra_inventory::InventoryError;

/// Strategy for generating non-blank SKUs
pub fn sku_strategy() -> impl Strategy<Value = String> {
    "[A-Z]{2,6}-[0-9]{1,4}"
}

/// Strategy for generating SKUs that may be blank or whitespace
pub fn maybe_blank_sku_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => sku_strategy(),
        1 => Just(String::new()),
        1 => Just("   ".to_string()),
    ]
}

/// Strategy for generating stock quantities (0 to 10000, two decimal places)
pub fn quantity_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for generating variants of every eligibility shape
///
/// Covers masters and non-masters, products with and without option
/// variants, and blank SKUs.
pub fn variant_strategy() -> impl Strategy<Value = Variant> {
    (maybe_blank_sku_strategy(), any::<bool>(), any::<bool>()).prop_map(
        |(sku, is_master, has_variants)| {
            let product = Product::new("Generated").with_variants(has_variants);
            if is_master {
                Variant::master(&product, sku)
            } else {
                Variant::new(&product, sku)
            }
        },
    )
}

/// Strategy for generating lists of variants
pub fn variants_strategy(max_len: usize) -> impl Strategy<Value = Vec<Variant>> {
    proptest::collection::vec(variant_strategy(), 0..=max_len)
}

/// Strategy for generating ship list entries, some for `order_number`
///
/// Entries get distinct ascending ids; statuses and order numbers vary so
/// that only part of the list is shipped for the order.
pub fn ship_results_strategy(
    order_number: &'static str,
    max_len: usize,
) -> impl Strategy<Value = Vec<ShipResult>> {
    let status = prop_oneof![
        Just(SHIPPED_STATUS.to_string()),
        Just("Packed".to_string()),
        Just("Entered".to_string()),
    ];
    let number = prop_oneof![
        3 => Just(order_number.to_string()),
        1 => Just(format!("{}-B", order_number)),
    ];
    proptest::collection::vec((status, number), 0..=max_len).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(index, (status, order_number))| ShipResult {
                ship_id: index as i64 + 1,
                ship_number: None,
                order_number,
                status,
                carrier: None,
            })
            .collect()
    })
}

/// Strategy for generating server-class (retryable) errors
pub fn server_error_strategy() -> impl Strategy<Value = InventoryError> {
    prop_oneof![
        (1001u16..1100u16).prop_map(|code| InventoryError::server(code, "server busy")),
        Just(InventoryError::connection("connection reset by peer")),
        Just(InventoryError::Timeout {
            operation: "get_part".to_string(),
            duration_ms: 30_000,
        }),
    ]
}

/// Strategy for generating status-class (terminal) errors
pub fn status_error_strategy() -> impl Strategy<Value = InventoryError> {
    prop_oneof![
        (2000u16..4000u16).prop_map(|code| InventoryError::status(code, "rejected")),
        Just(InventoryError::Authentication("ticket expired".to_string())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn generated_skus_are_not_blank(sku in sku_strategy()) {
            prop_assert!(!sku.trim().is_empty());
        }

        #[test]
        fn generated_ship_ids_are_unique(results in ship_results_strategy("SO-1", 20)) {
            let mut ids: Vec<i64> = results.iter().map(|r| r.ship_id).collect();
            ids.dedup();
            prop_assert_eq!(ids.len(), results.len());
        }

        #[test]
        fn generated_error_classes(server in server_error_strategy(), status in status_error_strategy()) {
            prop_assert!(server.is_retryable());
            prop_assert!(!status.is_retryable());
        }
    }
}
