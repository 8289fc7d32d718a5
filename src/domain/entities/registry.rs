//! Pattern registry entity
//!
//! Ordered collection of discovered patterns keyed by unique name. Order is
//! insertion (scan) order, so everything built from the registry, navigation
//! included, is reproducible.

use std::collections::HashMap;

use indexmap::IndexMap;

use super::navigation::{build_navigation, Bucket};
use super::pattern::{PatternBuilder, PatternData, PatternIdentity, PatternOverrides};
use crate::domain::ports::{EngineRegistry, PartialMap};
use crate::error::{PatternKitError, PatternKitResult};

#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    engines: EngineRegistry,
    patterns: IndexMap<String, PatternIdentity>,
    /// registry key -> unique name. Many-to-one; last writer wins.
    aliases: HashMap<String, String>,
}

impl PatternRegistry {
    pub fn new(engines: EngineRegistry) -> Self {
        Self {
            engines,
            patterns: IndexMap::new(),
            aliases: HashMap::new(),
        }
    }

    pub fn engines(&self) -> &EngineRegistry {
        &self.engines
    }

    /// Identity for a synthetic entry that has no backing file
    pub fn create_empty(&self, overrides: PatternOverrides) -> PatternKitResult<PatternIdentity> {
        PatternBuilder::new(&self.engines).overrides(overrides).build()
    }

    /// Derive an identity from a path, then apply overrides
    pub fn create_from_path(
        &self,
        relative_path: &str,
        data: Option<PatternData>,
        overrides: PatternOverrides,
    ) -> PatternKitResult<PatternIdentity> {
        let mut builder = PatternBuilder::new(&self.engines)
            .path(relative_path)
            .overrides(overrides);
        if let Some(data) = data {
            builder = builder.data(data);
        }
        builder.build()
    }

    /// Insert a pattern keyed by unique name.
    ///
    /// Re-adding the same source path replaces the entry in place. A different
    /// path with the same unique name is rejected. The identity is stored
    /// exactly as given.
    pub fn add(&mut self, pattern: PatternIdentity) -> PatternKitResult<()> {
        if let Some(existing) = self.patterns.get(pattern.unique_name()) {
            if existing.relative_path() != pattern.relative_path() {
                return Err(PatternKitError::DuplicateUniqueName {
                    unique_name: pattern.unique_name().to_string(),
                    existing: existing.relative_path().to_string(),
                    incoming: pattern.relative_path().to_string(),
                });
            }
            let old_key = existing.registry_key().to_string();
            if old_key != pattern.registry_key()
                && self.aliases.get(&old_key).map(String::as_str) == Some(pattern.unique_name())
            {
                self.aliases.remove(&old_key);
            }
        }

        self.aliases.insert(
            pattern.registry_key().to_string(),
            pattern.unique_name().to_string(),
        );
        self.patterns
            .insert(pattern.unique_name().to_string(), pattern);
        Ok(())
    }

    /// Look up by unique name first, then by registry key
    pub fn get(&self, name: &str) -> Option<&PatternIdentity> {
        self.patterns.get(name).or_else(|| {
            self.aliases
                .get(name)
                .and_then(|unique| self.patterns.get(unique))
        })
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut PatternIdentity> {
        let unique = if self.patterns.contains_key(name) {
            name.to_string()
        } else {
            self.aliases.get(name)?.clone()
        };
        self.patterns.get_mut(&unique)
    }

    pub fn remove(&mut self, unique_name: &str) -> Option<PatternIdentity> {
        let removed = self.patterns.shift_remove(unique_name)?;
        self.aliases.retain(|_, unique| unique != unique_name);
        Some(removed)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Patterns in scan order
    pub fn iter(&self) -> impl Iterator<Item = &PatternIdentity> {
        self.patterns.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PatternIdentity> {
        self.patterns.values_mut()
    }

    /// Partial key -> template source, for engines that inline partials
    pub fn partials(&self) -> PartialMap {
        let mut partials = PartialMap::new();
        for pattern in self.iter().filter(|p| !p.template().is_empty()) {
            partials.insert(
                pattern.unique_name().to_string(),
                pattern.template().to_string(),
            );
            partials.insert(
                partial_key(pattern).to_string(),
                pattern.template().to_string(),
            );
        }
        partials
    }

    /// Rebuild forward and reverse lineage from each pattern's partials.
    ///
    /// Clears existing lineage first, so running it twice is harmless.
    pub fn build_lineage(&mut self) {
        for pattern in self.patterns.values_mut() {
            pattern.clear_lineage();
        }

        // (includer unique, includer partial, included unique, included partial)
        let mut edges: Vec<(String, String, String, String)> = Vec::new();
        for pattern in self.patterns.values() {
            let Ok(references) = pattern.find_partials() else {
                continue;
            };
            for reference in references {
                let Ok(key) = pattern.find_partial_key(&reference) else {
                    continue;
                };
                match self.get(&key) {
                    Some(target) if target.unique_name() == pattern.unique_name() => {}
                    Some(target) => edges.push((
                        pattern.unique_name().to_string(),
                        partial_key(pattern).to_string(),
                        target.unique_name().to_string(),
                        partial_key(target).to_string(),
                    )),
                    None => tracing::warn!(
                        pattern = pattern.unique_name(),
                        partial = %key,
                        "partial not found in registry"
                    ),
                }
            }
        }

        for (from, from_partial, to, to_partial) in edges {
            if let Some(includer) = self.patterns.get_mut(&from) {
                includer.add_lineage(&to_partial);
            }
            if let Some(included) = self.patterns.get_mut(&to) {
                included.add_reverse_lineage(&from_partial);
            }
        }
    }

    pub fn build_navigation(&self) -> Vec<Bucket> {
        build_navigation(self.iter())
    }
}

fn partial_key(pattern: &PatternIdentity) -> &str {
    if pattern.partial_identifier().is_empty() {
        pattern.registry_key()
    } else {
        pattern.partial_identifier()
    }
}

#[cfg(test)]
mod tests;
