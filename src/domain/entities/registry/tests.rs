use serde_json::json;

use super::*;
use crate::domain::entities::derive_identity;
use crate::test_support::engines;

fn registry() -> PatternRegistry {
    PatternRegistry::new(engines())
}

#[test]
fn add_then_get_round_trips() {
    let mut registry = registry();
    let data = json!({"title": "Hello"}).as_object().cloned();
    let pattern = registry
        .create_from_path("00-atoms/01-global/00-colors.mustache", data, Default::default())
        .unwrap();
    let expected = pattern.clone();

    registry.add(pattern).unwrap();

    let stored = registry.get("00-atoms-01-global-00-colors").unwrap();
    assert_eq!(stored, &expected);
    assert_eq!(stored.partial_identifier(), "");
    assert_eq!(stored.raw_data().get("title"), Some(&json!("Hello")));
}

#[test]
fn get_falls_back_to_registry_key() {
    let mut registry = registry();
    registry
        .add(derive_identity("00-atoms/01-global/00-colors.mustache", None, registry.engines()))
        .unwrap();

    let by_key = registry.get("atoms-colors").unwrap();
    assert_eq!(by_key.unique_name(), "00-atoms-01-global-00-colors");
    assert!(registry.get("atoms-fonts").is_none());
}

#[test]
fn duplicate_unique_name_from_different_path_is_rejected() {
    let mut registry = registry();
    let engines = registry.engines().clone();
    registry
        .add(derive_identity("00-atoms/a-b.mustache", None, &engines))
        .unwrap();

    let err = registry
        .add(derive_identity("00-atoms/a/b.mustache", None, &engines))
        .unwrap_err();

    assert!(matches!(
        err,
        PatternKitError::DuplicateUniqueName { ref unique_name, .. } if unique_name == "00-atoms-a-b"
    ));
    assert_eq!(registry.len(), 1);
    assert_eq!(
        registry.get("00-atoms-a-b").unwrap().relative_path(),
        "00-atoms/a-b.mustache"
    );
}

#[test]
fn same_path_re_add_updates_in_place() {
    let mut registry = registry();
    let engines = registry.engines().clone();
    registry
        .add(derive_identity("00-atoms/00-button.mustache", None, &engines))
        .unwrap();
    registry
        .add(derive_identity("00-atoms/01-link.mustache", None, &engines))
        .unwrap();

    let mut updated = derive_identity("00-atoms/00-button.mustache", None, &engines);
    updated.set_template("<button/>");
    registry.add(updated).unwrap();

    assert_eq!(registry.len(), 2);
    let order: Vec<_> = registry.iter().map(|p| p.unique_name()).collect();
    assert_eq!(order, ["00-atoms-00-button", "00-atoms-01-link"]);
    assert_eq!(registry.get("atoms-button").unwrap().template(), "<button/>");
}

#[test]
fn registry_key_collisions_resolve_to_last_writer() {
    let mut registry = registry();
    let engines = registry.engines().clone();
    registry
        .add(derive_identity("00-atoms/01-forms/00-button.mustache", None, &engines))
        .unwrap();
    registry
        .add(derive_identity("00-atoms/02-controls/00-button.mustache", None, &engines))
        .unwrap();

    assert_eq!(registry.len(), 2);
    assert_eq!(
        registry.get("atoms-button").unwrap().unique_name(),
        "00-atoms-02-controls-00-button"
    );
}

#[test]
fn remove_drops_aliases() {
    let mut registry = registry();
    registry
        .add(derive_identity("00-atoms/00-button.mustache", None, registry.engines()))
        .unwrap();

    let removed = registry.remove("00-atoms-00-button").unwrap();
    assert_eq!(removed.pattern_name(), "button");
    assert!(registry.is_empty());
    assert!(registry.get("atoms-button").is_none());
}

#[test]
fn create_empty_applies_overrides() {
    let registry = registry();
    let pattern = registry
        .create_empty(PatternOverrides {
            unique_name: Some("listitems-one".to_string()),
            pattern_name: Some("one".to_string()),
            ..Default::default()
        })
        .unwrap();

    assert_eq!(pattern.unique_name(), "listitems-one");
    assert_eq!(pattern.relative_path(), "");
    assert_eq!(pattern.registry_key(), "-one");
}

#[test]
fn lineage_links_both_directions() {
    let mut registry = registry();
    let engines = registry.engines().clone();

    let mut label = derive_identity("00-atoms/00-label.mustache", None, &engines);
    label.set_template("<span>label</span>");
    let mut button = derive_identity("00-atoms/01-button.mustache", None, &engines);
    button.set_template("<button>{{> atoms-label }}</button>");
    let mut card = derive_identity("01-molecules/00-card.mustache", None, &engines);
    card.set_template("{{> atoms-button }}{{> atoms-label:bold }}{{> atoms-missing }}");

    registry.add(label).unwrap();
    registry.add(button).unwrap();
    registry.add(card).unwrap();
    registry.build_lineage();

    let card = registry.get("molecules-card").unwrap();
    assert_eq!(card.lineage(), ["atoms-button", "atoms-label"]);

    let label = registry.get("atoms-label").unwrap();
    assert_eq!(label.reverse_lineage(), ["atoms-button", "molecules-card"]);

    // running the pass again does not duplicate entries
    registry.build_lineage();
    assert_eq!(
        registry.get("atoms-label").unwrap().reverse_lineage(),
        ["atoms-button", "molecules-card"]
    );
}

#[test]
fn partials_map_has_unique_and_partial_keys() {
    let mut registry = registry();
    let mut label = derive_identity("00-atoms/00-label.mustache", None, registry.engines());
    label.set_template("<span/>");
    registry.add(label).unwrap();

    let partials = registry.partials();
    assert_eq!(partials.get("atoms-label").map(String::as_str), Some("<span/>"));
    assert_eq!(
        partials.get("00-atoms-00-label").map(String::as_str),
        Some("<span/>")
    );
}

#[test]
fn navigation_follows_registry_order() {
    let mut registry = registry();
    let engines = registry.engines().clone();
    for path in [
        "00-atoms/01-global/00-colors.mustache",
        "01-molecules/00-text/00-byline.mustache",
        "00-atoms/01-global/01-fonts.mustache",
    ] {
        registry.add(derive_identity(path, None, &engines)).unwrap();
    }

    let nav = registry.build_navigation();
    let buckets: Vec<_> = nav.iter().map(|b| b.name_lc.as_str()).collect();
    assert_eq!(buckets, ["atoms", "molecules"]);
    assert_eq!(nav[0].sections[0].items.len(), 2);
}
