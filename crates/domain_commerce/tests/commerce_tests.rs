//! Tests for the commerce records consumed by the inventory client

use rust_decimal_macros::dec;

use domain_commerce::{Address, LineItem, Order, Product, Variant};

// ============================================================================
// Variant Tests
// ============================================================================

mod variant_tests {
    use super::*;

    #[test]
    fn test_eligibility_matrix() {
        let simple = Product::new("Poster");
        let with_options = Product::new("Hoodie").with_variants(true);

        let cases = vec![
            (Variant::master(&simple, "POSTER"), true),
            (Variant::master(&simple, ""), false),
            (Variant::master(&with_options, "HOODIE"), false),
            (Variant::new(&with_options, "HOODIE-L"), true),
            (Variant::new(&with_options, "\t"), false),
        ];

        for (variant, expected) in cases {
            assert_eq!(
                variant.tracks_inventory(),
                expected,
                "sku={:?} master={} has_variants={}",
                variant.sku,
                variant.is_master,
                variant.product.has_variants
            );
        }
    }

    #[test]
    fn test_variant_json_shape() {
        let product = Product::new("Hoodie").with_variants(true);
        let variant = Variant::new(&product, "HOODIE-L").with_price(dec!(49.00));

        let json = serde_json::to_value(&variant).unwrap();
        assert_eq!(json["sku"], "HOODIE-L");
        assert_eq!(json["is_master"], false);
        assert_eq!(json["product"]["has_variants"], true);

        let parsed: Variant = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, variant);
    }
}

// ============================================================================
// Order Tests
// ============================================================================

mod order_tests {
    use super::*;

    fn sample_order() -> Order {
        let product = Product::new("Hoodie").with_variants(true);
        Order::new("R100200300")
            .with_so_number("SO-77")
            .with_email("ada@example.com")
            .with_bill_address(
                Address::new("Ada", "Lovelace", "12 Analytical Way", "London", "N1 9GU", "GB")
                    .with_phone("+44 20 7946 0000"),
            )
            .with_shipping_method("UPS Ground")
            .with_line_item(LineItem::new(
                Variant::new(&product, "HOODIE-L").with_price(dec!(49.00)),
                2,
            ))
    }

    #[test]
    fn test_new_order_defaults() {
        let order = Order::new("R1");
        assert!(order.line_items.is_empty());
        assert_eq!(order.currency, "USD");
        assert_eq!(order.so_number(), None);
        assert_eq!(order.effective_ship_address(), None);
    }

    #[test]
    fn test_sample_order_totals() {
        let order = sample_order();
        assert_eq!(order.item_total(), dec!(98.00));
        assert_eq!(order.so_number(), Some("SO-77"));
    }

    #[test]
    fn test_line_item_price_override() {
        let product = Product::new("Mug");
        let item = LineItem::new(Variant::master(&product, "MUG").with_price(dec!(10)), 3)
            .with_price(dec!(7.50));
        assert_eq!(item.amount(), dec!(22.50));
    }

    #[test]
    fn test_order_round_trips_through_json() {
        let order = sample_order();
        let json = serde_json::to_string(&order).unwrap();
        let parsed: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, order);
    }
}
