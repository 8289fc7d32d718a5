//! Render Engine Port
//!
//! A render engine understands one template syntax. The core never parses
//! templates itself: it asks the engine bound to a pattern to render it or
//! to list the partials it references.

use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::domain::entities::{PatternData, PatternIdentity};
use crate::error::PatternKitResult;

/// Partial key -> template source, handed to engines at render time
pub type PartialMap = HashMap<String, String>;

/// Render capability for one template syntax
pub trait RenderEngine: Send + Sync {
    /// Engine name for logging (e.g. "mustache")
    fn name(&self) -> &str;

    /// File extensions this engine renders, without the leading dot
    fn extensions(&self) -> &[&'static str];

    /// Render a pattern's template with the given data and partials
    fn render_pattern(
        &self,
        pattern: &PatternIdentity,
        data: &PatternData,
        partials: &PartialMap,
    ) -> PatternKitResult<String>;

    /// All partial references in the pattern's template
    fn find_partials(&self, pattern: &PatternIdentity) -> Vec<String>;

    /// Partial references that carry a style modifier
    fn find_partials_with_style_modifiers(&self, pattern: &PatternIdentity) -> Vec<String>;

    /// Partial references that pass pattern parameters
    fn find_partials_with_pattern_parameters(&self, pattern: &PatternIdentity) -> Vec<String>;

    /// List-item block references in the pattern's template
    fn find_list_items(&self, pattern: &PatternIdentity) -> Vec<String>;

    /// Canonical partial key for a raw partial reference
    fn find_partial_key(&self, reference: &str) -> String;

    /// Pre-register a pattern as a partial, for engines that need it
    fn register_partial(&self, _pattern: &PatternIdentity) -> PatternKitResult<()> {
        Ok(())
    }
}

/// Shared, non-owning handle to the engine selected for a pattern
#[derive(Clone)]
pub struct EngineBinding(Arc<dyn RenderEngine>);

impl EngineBinding {
    pub fn new(engine: Arc<dyn RenderEngine>) -> Self {
        Self(engine)
    }
}

impl Deref for EngineBinding {
    type Target = dyn RenderEngine;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl fmt::Debug for EngineBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EngineBinding").field(&self.0.name()).finish()
    }
}

impl PartialEq for EngineBinding {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.name() == other.0.name()
    }
}

/// Extension -> engine lookup, injected into identity derivation
#[derive(Clone, Default)]
pub struct EngineRegistry {
    engines: Vec<Arc<dyn RenderEngine>>,
}

impl EngineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_engine(mut self, engine: impl RenderEngine + 'static) -> Self {
        self.register(Arc::new(engine));
        self
    }

    /// Register an engine. Later registrations win for shared extensions.
    pub fn register(&mut self, engine: Arc<dyn RenderEngine>) {
        self.engines.insert(0, engine);
    }

    /// Engine for a file extension (with or without a leading dot)
    pub fn engine_for_extension(&self, extension: &str) -> Option<EngineBinding> {
        let extension = extension.trim_start_matches('.');
        if extension.is_empty() {
            return None;
        }
        self.engines
            .iter()
            .find(|e| e.extensions().iter().any(|x| x.eq_ignore_ascii_case(extension)))
            .map(|e| EngineBinding::new(Arc::clone(e)))
    }

    pub fn handles(&self, extension: &str) -> bool {
        self.engine_for_extension(extension).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }
}

impl fmt::Debug for EngineRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.engines.iter().map(|e| e.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeEngine {
        name: &'static str,
        extensions: &'static [&'static str],
    }

    impl RenderEngine for FakeEngine {
        fn name(&self) -> &str {
            self.name
        }
        fn extensions(&self) -> &[&'static str] {
            self.extensions
        }
        fn render_pattern(
            &self,
            pattern: &PatternIdentity,
            _data: &PatternData,
            _partials: &PartialMap,
        ) -> PatternKitResult<String> {
            Ok(pattern.template().to_string())
        }
        fn find_partials(&self, _pattern: &PatternIdentity) -> Vec<String> {
            Vec::new()
        }
        fn find_partials_with_style_modifiers(&self, _pattern: &PatternIdentity) -> Vec<String> {
            Vec::new()
        }
        fn find_partials_with_pattern_parameters(
            &self,
            _pattern: &PatternIdentity,
        ) -> Vec<String> {
            Vec::new()
        }
        fn find_list_items(&self, _pattern: &PatternIdentity) -> Vec<String> {
            Vec::new()
        }
        fn find_partial_key(&self, reference: &str) -> String {
            reference.to_string()
        }
    }

    #[test]
    fn lookup_ignores_leading_dot_and_case() {
        let engines = EngineRegistry::new().with_engine(FakeEngine {
            name: "mustache",
            extensions: &["mustache"],
        });
        assert!(engines.handles(".mustache"));
        assert!(engines.handles("Mustache"));
        assert!(!engines.handles("twig"));
        assert!(!engines.handles(""));
    }

    #[test]
    fn later_registration_wins() {
        let engines = EngineRegistry::new()
            .with_engine(FakeEngine {
                name: "first",
                extensions: &["hbs"],
            })
            .with_engine(FakeEngine {
                name: "second",
                extensions: &["hbs"],
            });
        let bound = engines.engine_for_extension("hbs").unwrap();
        assert_eq!(bound.name(), "second");
    }
}
