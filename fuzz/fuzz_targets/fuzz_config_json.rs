#![no_main]

use libfuzzer_sys::fuzz_target;
use volume_overlay::config::OverlayConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(config) = serde_json::from_str::<OverlayConfig>(s) {
            // Any accepted config must yield a delay inside the supported range
            let delay = config.auto_hide_delay().as_millis();
            assert!((500..=60_000).contains(&delay));
        }
    }
});
