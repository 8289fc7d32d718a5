//! Snapshot of the navigation outline built from a discovered tree

mod common;

use common::write;
use insta::assert_snapshot;
use patternkit::domain::entities::outline;
use patternkit::{default_engines, discover};
use tempfile::tempdir;

#[test]
fn outline_of_discovered_tree() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "00-atoms/00-global/00-colors.mustache", "<ul/>");
    write(root, "00-atoms/00-global/00-colors~dark.json", r#"{"theme": "dark"}"#);
    write(root, "00-atoms/00-global/01-fonts.mustache", "<p/>");
    write(root, "00-atoms/01-forms/00-input.mustache", "<input/>");
    write(root, "01-molecules/00-media/00-media-object.mustache", "{{> atoms-colors }}");
    write(root, "02-pages/00-home.mustache", "{{> molecules-media-object }}");

    let discovery = discover(root, &default_engines(), &[]).unwrap();
    assert!(discovery.skipped.is_empty());

    assert_snapshot!(outline(&discovery.registry.build_navigation()), @r"
    Atoms
      Global
        - Colors (atoms-colors)
        ~ Colors Dark (atoms-colors-dark)
        - Fonts (atoms-fonts)
      Forms
        - Input (atoms-input)
    Molecules
      Media
        - Media Object (molecules-media-object)
    Pages
      - Home (pages-home)
    ");
}
