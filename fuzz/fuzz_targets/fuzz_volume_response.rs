#![no_main]

use libfuzzer_sys::fuzz_target;
use volume_overlay::store::MAX_VOLUME;
use volume_overlay::volume::parse_master_volume;

fuzz_target!(|data: &[u8]| {
    // Arbitrary audio subsystem payloads must never panic the parser
    if let Ok(payload) = serde_json::from_slice::<serde_json::Value>(data) {
        if let Ok(volume) = parse_master_volume(&payload) {
            assert!(volume <= MAX_VOLUME);
        }
    }
});
