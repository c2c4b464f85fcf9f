#![no_main]

use keyspace_core::{ConfigData, OWNER_SIZE};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    match ConfigData::decode(data) {
        Ok(config) => {
            assert!(!data.is_empty());
            assert_eq!(data.len() % OWNER_SIZE, 0);
            assert_eq!(config.len(), data.len() / OWNER_SIZE);

            // Byte-exact round trip
            assert_eq!(config.encode(), data);
        }
        Err(_) => {
            assert!(data.is_empty() || data.len() % OWNER_SIZE != 0);
        }
    }

    // Hex parsing should never panic
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = ConfigData::from_hex(s);
    }
});
