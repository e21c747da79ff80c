//! Unit tests for the identifier types
//!
//! Tests cover creation, parsing, conversion, and display formatting for
//! every identifier used by the claim and ownership domains.

use core_kernel::{ClaimRequestId, ContactId, OwnershipId, UserId};
use uuid::Uuid;

mod user_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let id1 = UserId::new();
        let id2 = UserId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_new_v7_generates_time_ordered_ids() {
        let id1 = UserId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let id2 = UserId::new_v7();
        let uuid1: Uuid = id1.into();
        let uuid2: Uuid = id2.into();
        assert!(uuid1 < uuid2);
    }

    #[test]
    fn test_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = UserId::from_uuid(uuid);
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn test_display_format() {
        let id = UserId::new();
        let display = id.to_string();
        assert!(display.starts_with("USR-"));
    }

    #[test]
    fn test_from_str_with_prefix() {
        let original = UserId::new();
        let string = original.to_string();
        let parsed: UserId = string.parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_json_serialization() {
        let id = UserId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}

mod claim_request_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let id1 = ClaimRequestId::new();
        let id2 = ClaimRequestId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_display_format() {
        let id = ClaimRequestId::new();
        let display = id.to_string();
        assert!(display.starts_with("CRQ-"));
    }

    #[test]
    fn test_roundtrip() {
        let original = ClaimRequestId::new();
        let string = original.to_string();
        let parsed: ClaimRequestId = string.parse().unwrap();
        assert_eq!(original, parsed);
    }
}

mod ownership_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let id1 = OwnershipId::new();
        let id2 = OwnershipId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_display_format() {
        let id = OwnershipId::new();
        let display = id.to_string();
        assert!(display.starts_with("OWN-"));
    }
}

mod cross_type_tests {
    use super::*;

    #[test]
    fn test_different_id_types_are_distinct() {
        // Same UUID wrapped in different identifier types stays type-safe
        // (a ContactId can never be passed where a UserId is expected)
        let uuid = Uuid::new_v4();
        let contact_id = ContactId::from_uuid(uuid);
        let user_id = UserId::from_uuid(uuid);

        // They contain the same UUID but are different types
        assert_eq!(*contact_id.as_uuid(), *user_id.as_uuid());
    }

    #[test]
    fn test_display_prefixes_are_unique() {
        let uuid = Uuid::new_v4();
        let prefixes = vec![
            UserId::from_uuid(uuid).to_string(),
            ContactId::from_uuid(uuid).to_string(),
            ClaimRequestId::from_uuid(uuid).to_string(),
            OwnershipId::from_uuid(uuid).to_string(),
        ];

        let mut unique_prefixes = prefixes.clone();
        unique_prefixes.sort();
        unique_prefixes.dedup();

        assert_eq!(
            prefixes.len(),
            unique_prefixes.len(),
            "All identifier prefixes should be unique"
        );
    }
}

mod edge_cases {
    use super::*;

    #[test]
    fn test_nil_uuid() {
        let nil_uuid = Uuid::nil();
        let id = ContactId::from_uuid(nil_uuid);
        assert!(id.as_uuid().is_nil());
    }

    #[test]
    fn test_max_uuid() {
        let max_uuid = Uuid::max();
        let id = ContactId::from_uuid(max_uuid);
        assert_eq!(*id.as_uuid(), max_uuid);
    }
}
