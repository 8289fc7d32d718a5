//! Navigation tree entities
//!
//! Three levels: bucket (group key) -> section (sub-group key) -> item
//! (pattern). Each level keeps an ordered child list for output and an
//! index set for O(1) membership checks.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::pattern::{title_case, PatternIdentity};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavItem {
    pub display_name: String,
    pub unique_name: String,
    pub pattern_link: String,
    pub partial: String,
    pub is_pseudo_pattern: bool,
}

impl NavItem {
    fn from_pattern(pattern: &PatternIdentity) -> Self {
        let partial = if pattern.partial_identifier().is_empty() {
            pattern.registry_key()
        } else {
            pattern.partial_identifier()
        };
        Self {
            display_name: pattern.display_name().to_string(),
            unique_name: pattern.unique_name().to_string(),
            pattern_link: pattern.pattern_link().to_string(),
            partial: partial.to_string(),
            is_pseudo_pattern: pattern.is_pseudo_pattern(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavSection {
    pub name_lc: String,
    pub name_uc: String,
    pub items: Vec<NavItem>,
    #[serde(skip)]
    item_index: HashSet<String>,
}

impl NavSection {
    fn new(name: &str) -> Self {
        Self {
            name_lc: name.to_lowercase(),
            name_uc: title_case(name),
            items: Vec::new(),
            item_index: HashSet::new(),
        }
    }

    fn push(&mut self, item: NavItem) {
        if self.item_index.insert(item.unique_name.clone()) {
            self.items.push(item);
        }
    }

    pub fn contains(&self, unique_name: &str) -> bool {
        self.item_index.contains(unique_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub name_lc: String,
    pub name_uc: String,
    pub sections: Vec<NavSection>,
    /// Patterns sitting directly in the bucket, with no sub-group
    pub items: Vec<NavItem>,
    #[serde(skip)]
    section_index: HashSet<String>,
    #[serde(skip)]
    item_index: HashSet<String>,
}

impl Bucket {
    fn new(name: &str) -> Self {
        Self {
            name_lc: name.to_lowercase(),
            name_uc: title_case(name),
            sections: Vec::new(),
            items: Vec::new(),
            section_index: HashSet::new(),
            item_index: HashSet::new(),
        }
    }

    pub fn contains_section(&self, sub_group_key: &str) -> bool {
        self.section_index.contains(&sub_group_key.to_lowercase())
    }

    pub fn section(&self, sub_group_key: &str) -> Option<&NavSection> {
        let key = sub_group_key.to_lowercase();
        if !self.section_index.contains(&key) {
            return None;
        }
        self.sections.iter().find(|s| s.name_lc == key)
    }

    pub fn contains_item(&self, unique_name: &str) -> bool {
        self.item_index.contains(unique_name)
    }

    fn section_mut(&mut self, sub_group_key: &str) -> &mut NavSection {
        let key = sub_group_key.to_lowercase();
        let position = if self.section_index.insert(key.clone()) {
            self.sections.push(NavSection::new(sub_group_key));
            self.sections.len() - 1
        } else {
            self.sections
                .iter()
                .position(|s| s.name_lc == key)
                .unwrap_or(self.sections.len() - 1)
        };
        &mut self.sections[position]
    }

    fn push(&mut self, item: NavItem) {
        if self.item_index.insert(item.unique_name.clone()) {
            self.items.push(item);
        }
    }
}

/// Group patterns into buckets and sections.
///
/// Buckets and sections appear in first-seen order; items keep the order of
/// the input, which is the registry's scan order.
pub fn build_navigation<'a>(patterns: impl IntoIterator<Item = &'a PatternIdentity>) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = Vec::new();
    let mut bucket_positions: HashMap<String, usize> = HashMap::new();

    for pattern in patterns {
        let key = pattern.group_key().to_lowercase();
        let position = *bucket_positions.entry(key).or_insert_with(|| {
            buckets.push(Bucket::new(pattern.group_key()));
            buckets.len() - 1
        });
        let bucket = &mut buckets[position];
        let item = NavItem::from_pattern(pattern);

        if pattern.sub_group_key().is_empty() {
            bucket.push(item);
        } else {
            bucket.section_mut(pattern.sub_group_key()).push(item);
        }
    }

    buckets
}

/// Indented plain-text rendering of a navigation tree
pub fn outline(buckets: &[Bucket]) -> String {
    let mut out = String::new();
    for bucket in buckets {
        let name = if bucket.name_uc.is_empty() {
            "(root)"
        } else {
            bucket.name_uc.as_str()
        };
        out.push_str(name);
        out.push('\n');
        for item in &bucket.items {
            push_item(&mut out, 1, item);
        }
        for section in &bucket.sections {
            out.push_str(&format!("  {}\n", section.name_uc));
            for item in &section.items {
                push_item(&mut out, 2, item);
            }
        }
    }
    out
}

fn push_item(out: &mut String, depth: usize, item: &NavItem) {
    let marker = if item.is_pseudo_pattern { "~" } else { "-" };
    out.push_str(&format!(
        "{}{marker} {} ({})\n",
        "  ".repeat(depth),
        item.display_name,
        item.partial
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::derive_identity;
    use crate::test_support::engines;

    fn patterns(paths: &[&str]) -> Vec<PatternIdentity> {
        let engines = engines();
        paths
            .iter()
            .map(|p| derive_identity(p, None, &engines))
            .collect()
    }

    #[test]
    fn groups_by_bucket_then_section_in_first_seen_order() {
        let patterns = patterns(&[
            "01-molecules/02-media/00-media-object.mustache",
            "00-atoms/01-global/00-colors.mustache",
            "00-atoms/00-text/00-headings.mustache",
            "00-atoms/01-global/01-fonts.mustache",
        ]);
        let nav = build_navigation(&patterns);

        assert_eq!(nav.len(), 2);
        assert_eq!(nav[0].name_lc, "molecules");
        assert_eq!(nav[0].name_uc, "Molecules");
        assert_eq!(nav[1].name_lc, "atoms");

        let atoms = &nav[1];
        let sections: Vec<_> = atoms.sections.iter().map(|s| s.name_lc.as_str()).collect();
        assert_eq!(sections, ["global", "text"]);

        let global = atoms.section("global").unwrap();
        let items: Vec<_> = global.items.iter().map(|i| i.display_name.as_str()).collect();
        assert_eq!(items, ["Colors", "Fonts"]);
        assert!(global.contains("00-atoms-01-global-01-fonts"));
        assert!(atoms.contains_section("text"));
        assert!(!atoms.contains_section("forms"));
    }

    #[test]
    fn patterns_without_subgroup_sit_in_bucket() {
        let patterns = patterns(&["05-molecules/02-media-object.mustache"]);
        let nav = build_navigation(&patterns);

        assert_eq!(nav.len(), 1);
        assert!(nav[0].sections.is_empty());
        assert_eq!(nav[0].items.len(), 1);
        assert!(nav[0].contains_item("05-molecules-02-media-object"));
        assert_eq!(nav[0].items[0].partial, "molecules-media-object");
    }

    #[test]
    fn duplicate_items_are_listed_once() {
        let mut patterns = patterns(&["00-atoms/01-global/00-colors.mustache"]);
        patterns.push(patterns[0].clone());
        let nav = build_navigation(&patterns);
        assert_eq!(nav[0].sections[0].items.len(), 1);
    }

    #[test]
    fn navigation_is_deterministic() {
        let patterns = patterns(&[
            "00-atoms/01-global/00-colors.mustache",
            "01-molecules/02-media/00-media-object.mustache",
        ]);
        assert_eq!(build_navigation(&patterns), build_navigation(&patterns));
    }
}
