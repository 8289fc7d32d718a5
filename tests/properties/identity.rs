//! Property tests for pattern identity derivation.

use proptest::prelude::*;
use serde_json::json;

use patternkit::default_engines;
use patternkit::domain::entities::{derive_identity, flatten, strip_ordering_prefix, PatternData};

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("([0-9]{2}-)?[a-z][a-z0-9]{0,8}(-[a-z0-9]{1,6}){0,2}").unwrap()
}

fn relative_path() -> impl Strategy<Value = String> {
    (proptest::collection::vec(segment(), 0..=3), segment()).prop_map(|(dirs, file)| {
        let mut parts = dirs;
        parts.push(format!("{file}.mustache"));
        parts.join("/")
    })
}

fn data() -> impl Strategy<Value = PatternData> {
    proptest::collection::btree_map("[a-z]{1,8}", "[ -~]{0,16}", 0..4).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(k, v)| (k, json!(v)))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Derivation never panics on arbitrary input.
    #[test]
    fn property_derive_never_panics(s in "(?s).{0,128}") {
        let _ = derive_identity(&s, None, &default_engines());
    }

    /// PROPERTY: Derived names depend on the path only, never on data.
    #[test]
    fn property_names_ignore_data(path in relative_path(), data in data()) {
        let engines = default_engines();
        let bare = derive_identity(&path, None, &engines);
        let with_data = derive_identity(&path, Some(data), &engines);

        prop_assert_eq!(bare.unique_name(), with_data.unique_name());
        prop_assert_eq!(bare.registry_key(), with_data.registry_key());
        prop_assert_eq!(bare.group_key(), with_data.group_key());
        prop_assert_eq!(bare.sub_group_key(), with_data.sub_group_key());
        prop_assert_eq!(bare.pattern_link(), with_data.pattern_link());
    }

    /// PROPERTY: Deriving twice yields the same identity.
    #[test]
    fn property_derive_is_pure(path in relative_path(), data in data()) {
        let engines = default_engines();
        prop_assert_eq!(
            derive_identity(&path, Some(data.clone()), &engines),
            derive_identity(&path, Some(data), &engines)
        );
    }

    /// PROPERTY: Unique names and links contain no path separators.
    #[test]
    fn property_unique_name_is_flat(path in relative_path()) {
        let pattern = derive_identity(&path, None, &default_engines());
        prop_assert!(!pattern.unique_name().contains('/'));
        prop_assert_eq!(
            pattern.pattern_link(),
            format!("{0}/{0}.html", pattern.unique_name())
        );
    }

    /// PROPERTY: Stripping the ordering prefix is idempotent.
    #[test]
    fn property_strip_prefix_idempotent(name in segment()) {
        let once = strip_ordering_prefix(&name);
        prop_assert_eq!(strip_ordering_prefix(once), once);
    }

    /// PROPERTY: Flattening removes every separator and keeps length.
    #[test]
    fn property_flatten_keeps_length(path in "[a-z0-9/\\\\-]{0,64}") {
        let flat = flatten(&path);
        prop_assert!(!flat.contains(['/', '\\']));
        prop_assert_eq!(flat.len(), path.len());
    }
}
