#![no_main]

use keyspace_core::{Owner, SignatureScheme};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Split anywhere: only a 32/32 split may encode
    if let Some((&split, rest)) = data.split_first() {
        let split = (split as usize).min(rest.len());
        let (x, y) = rest.split_at(split);
        match Owner::from_coordinates(x, y) {
            Ok(owner) => {
                assert_eq!((x.len(), y.len()), (32, 32));
                let (ox, oy) = owner.coordinates();
                assert_eq!(&ox[..], x);
                assert_eq!(&oy[..], y);
            }
            Err(_) => assert!(x.len() != 32 || y.len() != 32),
        }
    }

    // Arbitrary SEC1 input must be rejected cleanly or produce a 64-byte owner
    for scheme in SignatureScheme::ALL {
        if let Ok(owner) = Owner::from_sec1_bytes(scheme, data) {
            assert_eq!(owner.as_bytes().len(), 64);
        }
    }
});
