//! Tests for the identifier newtypes
//!
//! Covers creation, prefix handling, UUID conversion and serialization for
//! the identifiers that flow from the commerce side into inventory requests.

use core_kernel::{LineItemId, OrderId, ProductId, VariantId};
use std::collections::HashSet;
use uuid::Uuid;

mod order_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let id1 = OrderId::new();
        let id2 = OrderId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_new_v7_generates_time_ordered_ids() {
        let id1 = OrderId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let id2 = OrderId::new_v7();
        let uuid1: Uuid = id1.into();
        let uuid2: Uuid = id2.into();
        assert!(uuid1 < uuid2);
    }

    #[test]
    fn test_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = OrderId::from_uuid(uuid);
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn test_display_format() {
        let id = OrderId::new();
        assert!(id.to_string().starts_with("ORD-"));
    }

    #[test]
    fn test_from_str_with_prefix() {
        let original = OrderId::new();
        let parsed: OrderId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        assert!("ORD-not-a-uuid".parse::<OrderId>().is_err());
    }

    #[test]
    fn test_json_is_bare_uuid() {
        let uuid = Uuid::new_v4();
        let id = OrderId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
    }
}

mod prefix_tests {
    use super::*;

    #[test]
    fn test_prefixes_are_distinct() {
        let prefixes: HashSet<&str> = [
            OrderId::prefix(),
            LineItemId::prefix(),
            ProductId::prefix(),
            VariantId::prefix(),
        ]
        .into_iter()
        .collect();

        assert_eq!(prefixes.len(), 4);
    }

    #[test]
    fn test_variant_display() {
        let id = VariantId::new();
        assert!(id.to_string().starts_with("VAR-"));
    }

    #[test]
    fn test_default_is_random() {
        assert_ne!(ProductId::default(), ProductId::default());
    }
}
