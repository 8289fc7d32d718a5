//! Shared fixtures for unit tests

use std::fs;
use std::path::Path;

use crate::domain::entities::{PatternData, PatternIdentity};
use crate::domain::ports::{EngineRegistry, PartialMap, RenderEngine};
use crate::error::PatternKitResult;

/// Minimal engine: `{{> key}}` is a partial, rendering inlines partials
pub(crate) struct StubEngine;

impl RenderEngine for StubEngine {
    fn name(&self) -> &str {
        "stub"
    }

    fn extensions(&self) -> &[&'static str] {
        &["mustache"]
    }

    fn render_pattern(
        &self,
        pattern: &PatternIdentity,
        _data: &PatternData,
        partials: &PartialMap,
    ) -> PatternKitResult<String> {
        let mut out = pattern.template().to_string();
        for reference in self.find_partials(pattern) {
            let key = self.find_partial_key(&reference);
            if let Some(body) = partials.get(&key) {
                out = out.replace(&reference, body);
            }
        }
        Ok(out)
    }

    fn find_partials(&self, pattern: &PatternIdentity) -> Vec<String> {
        let mut found = Vec::new();
        let mut rest = pattern.template();
        while let Some(start) = rest.find("{{>") {
            let Some(len) = rest[start..].find("}}") else {
                break;
            };
            found.push(rest[start..start + len + 2].to_string());
            rest = &rest[start + len + 2..];
        }
        found
    }

    fn find_partials_with_style_modifiers(&self, pattern: &PatternIdentity) -> Vec<String> {
        self.find_partials(pattern)
            .into_iter()
            .filter(|p| p.contains(':'))
            .collect()
    }

    fn find_partials_with_pattern_parameters(&self, pattern: &PatternIdentity) -> Vec<String> {
        self.find_partials(pattern)
            .into_iter()
            .filter(|p| p.contains('('))
            .collect()
    }

    fn find_list_items(&self, _pattern: &PatternIdentity) -> Vec<String> {
        Vec::new()
    }

    fn find_partial_key(&self, reference: &str) -> String {
        reference
            .trim_start_matches("{{>")
            .trim_end_matches("}}")
            .split([':', '('])
            .next()
            .unwrap_or("")
            .trim()
            .to_string()
    }
}

pub(crate) fn engines() -> EngineRegistry {
    EngineRegistry::new().with_engine(StubEngine)
}

pub(crate) fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}
