#![no_main]

use libfuzzer_sys::fuzz_target;
use patternkit::domain::entities::derive_identity;

fuzz_target!(|data: &[u8]| {
    if let Ok(path) = std::str::from_utf8(data) {
        // Identity derivation takes any relative path
        let engines = patternkit::default_engines();
        let pattern = derive_identity(path, None, &engines);
        let _ = pattern.engine();
    }
});
