//! Unit tests for the identifier types
//!
//! Covers creation, prefixed display, parsing, UUID conversion, and the
//! serde representation (a bare UUID on the wire).

use core_kernel::{CustomerId, ExpenseId, InvoiceId, MeterId, PaymentId, ReadingId};
use std::collections::HashSet;
use uuid::Uuid;

mod creation {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let ids: HashSet<_> = (0..100).map(|_| CustomerId::new()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_new_v7_is_time_ordered() {
        let first = ReadingId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = ReadingId::new_v7();
        assert!(second.as_uuid() > first.as_uuid());
    }

    #[test]
    fn test_from_uuid_preserves_the_value() {
        let uuid = Uuid::new_v4();
        assert_eq!(*MeterId::from_uuid(uuid).as_uuid(), uuid);
    }
}

mod display {
    use super::*;

    #[test]
    fn test_each_kind_has_its_own_prefix() {
        assert_eq!(CustomerId::prefix(), "CUS");
        assert_eq!(MeterId::prefix(), "MTR");
        assert_eq!(ReadingId::prefix(), "RDG");
        assert_eq!(InvoiceId::prefix(), "INV");
        assert_eq!(PaymentId::prefix(), "PAY");
        assert_eq!(ExpenseId::prefix(), "EXP");
    }

    #[test]
    fn test_display_prefixes_the_uuid() {
        let uuid = Uuid::new_v4();
        let id = CustomerId::from_uuid(uuid);
        assert_eq!(id.to_string(), format!("CUS-{uuid}"));
    }

    #[test]
    fn test_same_uuid_renders_differently_per_kind() {
        let uuid = Uuid::new_v4();
        let as_customer = CustomerId::from_uuid(uuid).to_string();
        let as_meter = MeterId::from_uuid(uuid).to_string();
        assert_ne!(as_customer, as_meter);
    }
}

mod parsing {
    use super::*;

    #[test]
    fn test_parse_roundtrips_the_display_form() {
        let original = PaymentId::new();
        let parsed: PaymentId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_parse_accepts_a_bare_uuid() {
        let uuid = Uuid::new_v4();
        let parsed: ExpenseId = uuid.to_string().parse().unwrap();
        assert_eq!(parsed, ExpenseId::from(uuid));
    }

    #[test]
    fn test_parse_rejects_a_foreign_prefix() {
        let rendered = MeterId::new().to_string();
        assert!(rendered.parse::<CustomerId>().is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("not-a-uuid".parse::<InvoiceId>().is_err());
    }
}

mod conversion {
    use super::*;

    #[test]
    fn test_uuid_conversion_roundtrip() {
        let uuid = Uuid::new_v4();
        let id = InvoiceId::from(uuid);
        let back: Uuid = id.into();
        assert_eq!(uuid, back);
    }
}

mod serde_representation {
    use super::*;

    #[test]
    fn test_serializes_as_bare_uuid() {
        let uuid = Uuid::new_v4();
        let json = serde_json::to_string(&MeterId::from_uuid(uuid)).unwrap();
        assert_eq!(json, format!("\"{uuid}\""));
    }

    #[test]
    fn test_deserializes_from_bare_uuid() {
        let uuid = Uuid::new_v4();
        let id: CustomerId = serde_json::from_str(&format!("\"{uuid}\"")).unwrap();
        assert_eq!(id, CustomerId::from(uuid));
    }
}
