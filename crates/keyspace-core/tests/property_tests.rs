//! Property-based tests for keyspace-core using proptest
//!
//! These tests verify invariants that should hold for all valid inputs.

use proptest::prelude::*;
use keyspace_core::{ConfigData, Error, Hash32, HexBytes, Key, Owner, OWNER_SIZE};

// ============================================
// Arbitrary Implementations
// ============================================

fn arb_owner() -> impl Strategy<Value = Owner> {
    (any::<[u8; 32]>(), any::<[u8; 32]>())
        .prop_map(|(x, y)| Owner::from_coordinates(&x, &y).unwrap())
}

fn arb_config() -> impl Strategy<Value = ConfigData> {
    prop::collection::vec(arb_owner(), 1..8).prop_map(|owners| ConfigData::new(owners).unwrap())
}

fn arb_bad_coordinate_len() -> impl Strategy<Value = usize> {
    (0usize..96).prop_filter("must not be 32", |len| *len != 32)
}

// ============================================
// Owner Properties
// ============================================

proptest! {
    #[test]
    fn owner_roundtrip(x in any::<[u8; 32]>(), y in any::<[u8; 32]>()) {
        let owner = Owner::from_coordinates(&x, &y).unwrap();
        prop_assert_eq!(owner.as_bytes().len(), 64);
        prop_assert_eq!(owner.coordinates(), (x, y));
    }

    #[test]
    fn owner_rejects_bad_x(len in arb_bad_coordinate_len(), y in any::<[u8; 32]>()) {
        let x = vec![0u8; len];
        prop_assert_eq!(
            Owner::from_coordinates(&x, &y),
            Err(Error::InvalidCoordinateLength { coordinate: "x", len })
        );
    }

    #[test]
    fn owner_rejects_bad_y(x in any::<[u8; 32]>(), len in arb_bad_coordinate_len()) {
        let y = vec![0u8; len];
        prop_assert_eq!(
            Owner::from_coordinates(&x, &y),
            Err(Error::InvalidCoordinateLength { coordinate: "y", len })
        );
    }
}

// ============================================
// Config Data Properties
// ============================================

proptest! {
    #[test]
    fn config_roundtrip(config in arb_config()) {
        let bytes = config.encode();
        prop_assert_eq!(bytes.len(), OWNER_SIZE * config.len());
        prop_assert_eq!(ConfigData::decode(&bytes).unwrap(), config);
    }

    #[test]
    fn config_bytes_roundtrip(count in 1usize..8, seed in any::<u8>()) {
        let bytes: Vec<u8> = (0..count * OWNER_SIZE)
            .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
            .collect();
        let decoded = ConfigData::decode(&bytes).unwrap();
        prop_assert_eq!(decoded.len(), count);
        prop_assert_eq!(decoded.encode(), bytes);
    }

    #[test]
    fn config_rejects_non_multiple(len in 0usize..512) {
        prop_assume!(len == 0 || len % OWNER_SIZE != 0);
        let bytes = vec![0u8; len];
        prop_assert_eq!(ConfigData::decode(&bytes), Err(Error::MalformedConfigData { len }));
    }

    #[test]
    fn config_hex_roundtrip(config in arb_config()) {
        prop_assert_eq!(ConfigData::from_hex(&config.to_hex()).unwrap(), config);
    }

    #[test]
    fn owner_indices_stable(config in arb_config()) {
        let bytes = config.encode();
        for (i, owner) in config.owners().iter().enumerate() {
            prop_assert_eq!(&bytes[i * OWNER_SIZE..(i + 1) * OWNER_SIZE], &owner.as_bytes()[..]);
        }
    }
}

// ============================================
// Wire Primitive Properties
// ============================================

proptest! {
    #[test]
    fn opaque_bytes_survive_json(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let blob = HexBytes::new(bytes.clone());
        let json = serde_json::to_string(&blob).unwrap();
        let back: HexBytes = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back.into_inner(), bytes);
    }

    #[test]
    fn key_hex_roundtrip(bytes in prop::collection::vec(any::<u8>(), 1..64)) {
        let key = Key::new(bytes);
        prop_assert_eq!(Key::from_hex(&key.to_hex()).unwrap(), key);
    }

    #[test]
    fn hash_rejects_wrong_length(len in 0usize..64) {
        prop_assume!(len != 32);
        prop_assert_eq!(Hash32::from_slice(&vec![0u8; len]), Err(Error::InvalidHashLength(len)));
    }
}
