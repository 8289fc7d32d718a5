//! Property tests for watch entry names.

use proptest::prelude::*;

use patternkit::domain::value_objects::EntryName;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Validation never panics and never accepts a separator.
    #[test]
    fn property_entry_name_rejects_separators(s in "(?s).{0,64}") {
        if let Ok(name) = EntryName::new(s.clone()) {
            prop_assert!(!name.as_str().contains(['/', '\\']));
            prop_assert!(!name.as_str().is_empty());
            prop_assert_eq!(name.as_str(), s.as_str());
        }
    }

    /// PROPERTY: Plain directory names are accepted and name their template.
    #[test]
    fn property_plain_names_accepted(s in "[A-Za-z0-9_-][A-Za-z0-9._-]{0,31}") {
        prop_assume!(s != "." && s != "..");
        let name = EntryName::new(s.clone()).unwrap();
        prop_assert_eq!(name.template_file("mustache"), format!("{s}.mustache"));
    }
}
