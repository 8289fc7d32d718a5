//! Mustache partial scanner
//!
//! Finds partial tags (`{{> atoms-button:primary(label: "Go") }}`), list-item
//! blocks and partial keys in Mustache templates. Rendering resolves partial
//! inclusion only; variable interpolation is left to a full Mustache
//! adapter plugged in through the same trait.

use regex::Regex;

use crate::domain::entities::{PatternData, PatternIdentity};
use crate::domain::ports::{PartialMap, RenderEngine};
use crate::error::{PatternKitError, PatternKitResult};

/// Partials nested deeper than this are assumed to be a cycle
const MAX_PARTIAL_DEPTH: usize = 16;

const LIST_ITEM_COUNTS: &str = "one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve|\
thirteen|fourteen|fifteen|sixteen|seventeen|eighteen|nineteen|twenty";

#[derive(Debug)]
pub struct MustacheEngine {
    partial: Regex,
    list_item: Regex,
}

impl Default for MustacheEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MustacheEngine {
    pub fn new() -> Self {
        let partial = Regex::new(
            r"\{\{>\s*([\w\-./~]+)(?::([\w\-|]+))?(?:\s*\((.*?)\))?\s*\}\}",
        )
        .expect("partial pattern is a valid regex");
        let list_item = Regex::new(&format!(
            r"\{{\{{#\s*list(?:I|i)tems\.(?:{LIST_ITEM_COUNTS})\s*\}}\}}"
        ))
        .expect("list item pattern is a valid regex");
        Self { partial, list_item }
    }

    fn partials_where(
        &self,
        template: &str,
        keep: impl Fn(&regex::Captures<'_>) -> bool,
    ) -> Vec<String> {
        self.partial
            .captures_iter(template)
            .filter(|c| keep(c))
            .map(|c| c[0].to_string())
            .collect()
    }

    fn inline(&self, template: &str, partials: &PartialMap, depth: usize) -> PatternKitResult<String> {
        if depth > MAX_PARTIAL_DEPTH {
            return Err(PatternKitError::Render {
                pattern: String::new(),
                message: format!("partials nested deeper than {MAX_PARTIAL_DEPTH} levels"),
            });
        }

        let mut out = String::with_capacity(template.len());
        let mut last = 0;
        for caps in self.partial.captures_iter(template) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            out.push_str(&template[last..whole.start()]);
            match partials.get(&caps[1]) {
                Some(body) => out.push_str(&self.inline(body, partials, depth + 1)?),
                None => out.push_str(whole.as_str()),
            }
            last = whole.end();
        }
        out.push_str(&template[last..]);
        Ok(out)
    }
}

impl RenderEngine for MustacheEngine {
    fn name(&self) -> &str {
        "mustache"
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
        self.inline(pattern.template(), partials, 0)
            .map_err(|e| match e {
                PatternKitError::Render { message, .. } => PatternKitError::Render {
                    pattern: pattern.unique_name().to_string(),
                    message,
                },
                other => other,
            })
    }

    fn find_partials(&self, pattern: &PatternIdentity) -> Vec<String> {
        self.partials_where(pattern.template(), |_| true)
    }

    fn find_partials_with_style_modifiers(&self, pattern: &PatternIdentity) -> Vec<String> {
        self.partials_where(pattern.template(), |c| c.get(2).is_some())
    }

    fn find_partials_with_pattern_parameters(&self, pattern: &PatternIdentity) -> Vec<String> {
        self.partials_where(pattern.template(), |c| c.get(3).is_some())
    }

    fn find_list_items(&self, pattern: &PatternIdentity) -> Vec<String> {
        self.list_item
            .find_iter(pattern.template())
            .map(|m| m.as_str().to_string())
            .collect()
    }

    fn find_partial_key(&self, reference: &str) -> String {
        match self.partial.captures(reference) {
            Some(caps) => caps[1].to_string(),
            None => reference.trim().to_string(),
        }
    }
}
