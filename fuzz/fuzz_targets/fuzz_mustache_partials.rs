#![no_main]

use libfuzzer_sys::fuzz_target;
use patternkit::domain::entities::{PatternBuilder, PatternOverrides};

fuzz_target!(|data: &[u8]| {
    if let Ok(template) = std::str::from_utf8(data) {
        let engines = patternkit::default_engines();
        let Ok(pattern) = PatternBuilder::new(&engines)
            .path("00-atoms/00-fuzz.mustache")
            .overrides(PatternOverrides {
                template: Some(template.to_string()),
                ..Default::default()
            })
            .build()
        else {
            return;
        };
        // Partial scanning should never panic on arbitrary templates
        let _ = pattern.find_partials();
        let _ = pattern.find_list_items();
        if let Ok(references) = pattern.find_partials() {
            for reference in references {
                let _ = pattern.find_partial_key(&reference);
            }
        }
    }
});
