//! Pattern identity entity
//!
//! A pattern is one template file plus optional JSON data. Every name the
//! rest of the system uses for it (unique name, display name, group keys,
//! flattened output path) is derived once, here, from its path relative to
//! the patterns root.

use serde_json::{Map, Value};

use crate::domain::ports::{EngineBinding, EngineRegistry, PartialMap};
use crate::error::{PatternKitError, PatternKitResult};

/// A pattern's own JSON data object
pub type PatternData = Map<String, Value>;

/// Identity and render state of one discovered pattern.
///
/// Derived fields are read-only. Render cache, partial identifier, lineage
/// and the pseudo-pattern flag are filled in by later passes.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternIdentity {
    relative_path: String,
    file_base_name: String,
    file_extension: String,
    subdirectory: String,
    unique_name: String,
    pattern_name: String,
    display_name: String,
    group_key: String,
    sub_group_key: String,
    flattened_path: String,
    registry_key: String,
    pattern_link: String,
    raw_data: PatternData,
    template: String,
    rendered_template: String,
    partial_identifier: String,
    lineage: Vec<String>,
    reverse_lineage: Vec<String>,
    is_pseudo_pattern: bool,
    base_pattern: Option<String>,
    engine: Option<EngineBinding>,
}

/// Derive a pattern identity from its relative path and data.
///
/// Pure: the result depends only on the inputs and the engine registry.
/// An extension no engine handles yields a null binding; callers that need
/// to render ask [`PatternIdentity::engine`], which reports
/// `UnsupportedTemplateType`.
pub fn derive_identity(
    relative_path: &str,
    raw_data: Option<PatternData>,
    engines: &EngineRegistry,
) -> PatternIdentity {
    let (subdirectory, file_name) = split_path(relative_path);
    let (file_base_name, file_extension) = split_extension(file_name);

    let flattened_path = flatten(subdirectory);
    let unique_name = format!("{flattened_path}-{file_base_name}");
    let pattern_name = strip_ordering_prefix(file_base_name).to_string();
    let display_name = title_case(&pattern_name);
    let group_key = derive_group_key(&unique_name, subdirectory);
    let sub_group_key = derive_sub_group_key(subdirectory);
    let registry_key = format!("{group_key}-{pattern_name}");
    let pattern_link = link_for(&unique_name);

    PatternIdentity {
        relative_path: relative_path.to_string(),
        file_base_name: file_base_name.to_string(),
        file_extension: file_extension.to_string(),
        subdirectory: subdirectory.to_string(),
        unique_name,
        pattern_name,
        display_name,
        group_key,
        sub_group_key,
        flattened_path,
        registry_key,
        pattern_link,
        raw_data: raw_data.unwrap_or_default(),
        template: String::new(),
        rendered_template: String::new(),
        partial_identifier: String::new(),
        lineage: Vec::new(),
        reverse_lineage: Vec::new(),
        is_pseudo_pattern: false,
        base_pattern: None,
        engine: engines.engine_for_extension(file_extension),
    }
}

impl PatternIdentity {
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    pub fn file_base_name(&self) -> &str {
        &self.file_base_name
    }

    /// Extension without the leading dot
    pub fn file_extension(&self) -> &str {
        &self.file_extension
    }

    pub fn subdirectory(&self) -> &str {
        &self.subdirectory
    }

    pub fn unique_name(&self) -> &str {
        &self.unique_name
    }

    pub fn pattern_name(&self) -> &str {
        &self.pattern_name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn group_key(&self) -> &str {
        &self.group_key
    }

    pub fn sub_group_key(&self) -> &str {
        &self.sub_group_key
    }

    pub fn flattened_path(&self) -> &str {
        &self.flattened_path
    }

    pub fn registry_key(&self) -> &str {
        &self.registry_key
    }

    /// Public location of the rendered pattern: `<unique>/<unique>.html`
    pub fn pattern_link(&self) -> &str {
        &self.pattern_link
    }

    pub fn raw_data(&self) -> &PatternData {
        &self.raw_data
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn set_template(&mut self, template: impl Into<String>) {
        self.template = template.into();
    }

    pub fn rendered_template(&self) -> &str {
        &self.rendered_template
    }

    pub fn set_rendered_template(&mut self, rendered: impl Into<String>) {
        self.rendered_template = rendered.into();
    }

    pub fn partial_identifier(&self) -> &str {
        &self.partial_identifier
    }

    pub fn set_partial_identifier(&mut self, partial: impl Into<String>) {
        self.partial_identifier = partial.into();
    }

    pub fn lineage(&self) -> &[String] {
        &self.lineage
    }

    pub fn reverse_lineage(&self) -> &[String] {
        &self.reverse_lineage
    }

    /// Append to lineage, keeping entries unique and in first-seen order
    pub fn add_lineage(&mut self, partial: &str) {
        if !self.lineage.iter().any(|p| p == partial) {
            self.lineage.push(partial.to_string());
        }
    }

    pub fn add_reverse_lineage(&mut self, partial: &str) {
        if !self.reverse_lineage.iter().any(|p| p == partial) {
            self.reverse_lineage.push(partial.to_string());
        }
    }

    pub fn clear_lineage(&mut self) {
        self.lineage.clear();
        self.reverse_lineage.clear();
    }

    pub fn is_pseudo_pattern(&self) -> bool {
        self.is_pseudo_pattern
    }

    pub fn set_pseudo_pattern(&mut self, is_pseudo: bool) {
        self.is_pseudo_pattern = is_pseudo;
    }

    /// Unique name of the template a pseudo-pattern varies
    pub fn base_pattern(&self) -> Option<&str> {
        self.base_pattern.as_deref()
    }

    pub fn engine_binding(&self) -> Option<&EngineBinding> {
        self.engine.as_ref()
    }

    /// The bound render engine, or `UnsupportedTemplateType`
    pub fn engine(&self) -> PatternKitResult<&EngineBinding> {
        self.engine
            .as_ref()
            .ok_or_else(|| PatternKitError::UnsupportedTemplateType {
                path: self.relative_path.clone(),
                extension: self.file_extension.clone(),
            })
    }

    /// Render with `data`, or with the pattern's own data when `None`
    pub fn render(
        &self,
        data: Option<&PatternData>,
        partials: &PartialMap,
    ) -> PatternKitResult<String> {
        let engine = self.engine()?;
        engine.render_pattern(self, data.unwrap_or(&self.raw_data), partials)
    }

    pub fn register_partial(&self) -> PatternKitResult<()> {
        self.engine()?.register_partial(self)
    }

    pub fn find_partials(&self) -> PatternKitResult<Vec<String>> {
        Ok(self.engine()?.find_partials(self))
    }

    pub fn find_partials_with_style_modifiers(&self) -> PatternKitResult<Vec<String>> {
        Ok(self.engine()?.find_partials_with_style_modifiers(self))
    }

    pub fn find_partials_with_pattern_parameters(&self) -> PatternKitResult<Vec<String>> {
        Ok(self.engine()?.find_partials_with_pattern_parameters(self))
    }

    pub fn find_list_items(&self) -> PatternKitResult<Vec<String>> {
        Ok(self.engine()?.find_list_items(self))
    }

    pub fn find_partial_key(&self, reference: &str) -> PatternKitResult<String> {
        Ok(self.engine()?.find_partial_key(reference))
    }
}

/// Field-level overrides applied on top of a derived identity.
///
/// Used for synthetic entries (list items, pseudo-patterns) that do not map
/// one-to-one to a file on disk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternOverrides {
    pub unique_name: Option<String>,
    pub pattern_name: Option<String>,
    pub display_name: Option<String>,
    pub group_key: Option<String>,
    pub sub_group_key: Option<String>,
    pub raw_data: Option<PatternData>,
    pub template: Option<String>,
    pub rendered_template: Option<String>,
    pub partial_identifier: Option<String>,
    pub is_pseudo_pattern: Option<bool>,
    pub base_pattern: Option<String>,
}

/// Builds an identity from a path, data and overrides.
///
/// Overrides win over derived values. Fields derived from an overridden
/// identifier are recomputed so the identity stays self-consistent.
#[derive(Debug)]
pub struct PatternBuilder<'a> {
    engines: &'a EngineRegistry,
    relative_path: String,
    data: Option<PatternData>,
    overrides: PatternOverrides,
}

impl<'a> PatternBuilder<'a> {
    pub fn new(engines: &'a EngineRegistry) -> Self {
        Self {
            engines,
            relative_path: String::new(),
            data: None,
            overrides: PatternOverrides::default(),
        }
    }

    pub fn path(mut self, relative_path: impl Into<String>) -> Self {
        self.relative_path = relative_path.into();
        self
    }

    pub fn data(mut self, data: PatternData) -> Self {
        self.data = Some(data);
        self
    }

    pub fn overrides(mut self, overrides: PatternOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn build(self) -> PatternKitResult<PatternIdentity> {
        let o = self.overrides;
        validate_identifier("unique_name", o.unique_name.as_deref())?;
        validate_identifier("pattern_name", o.pattern_name.as_deref())?;
        validate_identifier("group_key", o.group_key.as_deref())?;
        if let Some(base) = o.base_pattern.as_deref() {
            if base.is_empty() {
                return Err(PatternKitError::InvalidOverride {
                    field: "base_pattern",
                    reason: "must not be empty".to_string(),
                });
            }
        }

        let mut pattern = derive_identity(&self.relative_path, self.data, self.engines);

        if let Some(unique_name) = o.unique_name {
            pattern.pattern_link = link_for(&unique_name);
            pattern.unique_name = unique_name;
        }
        let rekey = o.pattern_name.is_some() || o.group_key.is_some();
        if let Some(pattern_name) = o.pattern_name {
            if o.display_name.is_none() {
                pattern.display_name = title_case(&pattern_name);
            }
            pattern.pattern_name = pattern_name;
        }
        if let Some(group_key) = o.group_key {
            pattern.group_key = group_key;
        }
        if rekey {
            pattern.registry_key = format!("{}-{}", pattern.group_key, pattern.pattern_name);
        }
        if let Some(display_name) = o.display_name {
            pattern.display_name = display_name;
        }
        if let Some(sub_group_key) = o.sub_group_key {
            pattern.sub_group_key = sub_group_key;
        }
        if let Some(raw_data) = o.raw_data {
            pattern.raw_data = raw_data;
        }
        if let Some(template) = o.template {
            pattern.template = template;
        }
        if let Some(rendered) = o.rendered_template {
            pattern.rendered_template = rendered;
        }
        if let Some(partial) = o.partial_identifier {
            pattern.partial_identifier = partial;
        }
        if let Some(is_pseudo) = o.is_pseudo_pattern {
            pattern.is_pseudo_pattern = is_pseudo;
        }
        if o.base_pattern.is_some() {
            pattern.base_pattern = o.base_pattern;
        }

        Ok(pattern)
    }
}

fn validate_identifier(field: &'static str, value: Option<&str>) -> PatternKitResult<()> {
    let Some(value) = value else {
        return Ok(());
    };
    let reason = if value.is_empty() {
        "must not be empty"
    } else if value.contains(['/', '\\']) {
        "must not contain path separators"
    } else {
        return Ok(());
    };
    Err(PatternKitError::InvalidOverride {
        field,
        reason: reason.to_string(),
    })
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Split into (directory, file name) at the last separator
fn split_path(path: &str) -> (&str, &str) {
    match path.rfind(is_separator) {
        Some(idx) => (&path[..idx], &path[idx + 1..]),
        None => ("", path),
    }
}

/// Split a file name into (base name, extension without dot).
///
/// A leading dot is part of the name, not an extension (`.gitkeep`).
fn split_extension(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => (&file_name[..idx], &file_name[idx + 1..]),
        _ => (file_name, ""),
    }
}

fn link_for(unique_name: &str) -> String {
    format!("{unique_name}/{unique_name}.html")
}

/// Replace every path separator with a hyphen
pub fn flatten(subdirectory: &str) -> String {
    subdirectory.replace(is_separator, "-")
}

/// Remove a leading `digits-` ordering prefix (`02-media-object` -> `media-object`)
pub fn strip_ordering_prefix(name: &str) -> &str {
    let digits = name.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 && name.as_bytes().get(digits) == Some(&b'-') {
        &name[digits + 1..]
    } else {
        name
    }
}

/// Title-case each hyphen-delimited token and join with spaces
pub fn title_case(name: &str) -> String {
    name.split('-')
        .map(|token| {
            let mut chars = token.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Whether a directory segment follows the two-digit `NN-name` convention
fn is_conforming_segment(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.len() > 3 && bytes[0].is_ascii_digit() && bytes[1].is_ascii_digit() && bytes[2] == b'-'
}

/// Top-level bucket key.
///
/// For conforming trees (`NN-group/...`) this is the fixed-width slice of
/// the unique name between its first hyphen and the first hyphen at or after
/// offset 4. Other trees fall back to the first directory segment with its
/// ordering prefix stripped.
pub fn derive_group_key(unique_name: &str, subdirectory: &str) -> String {
    let first_segment = subdirectory.split(is_separator).next().unwrap_or("");
    if is_conforming_segment(first_segment) {
        fixed_width_group_key(unique_name)
    } else {
        strip_ordering_prefix(first_segment).to_string()
    }
}

fn fixed_width_group_key(unique_name: &str) -> String {
    let chars: Vec<char> = unique_name.chars().collect();
    let len = chars.len() as isize;
    let index_of = |from: usize| -> isize {
        chars
            .iter()
            .skip(from)
            .position(|c| *c == '-')
            .map_or(-1, |i| (i + from) as isize)
    };

    let first = index_of(0);
    let second = index_of(4);
    let mut start = (first + 1).clamp(0, len) as usize;
    let mut end = (second + 1 - first + 1).clamp(0, len) as usize;
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }
    chars[start..end].iter().collect()
}

/// Second-level section key: the subdirectory minus its first segment,
/// with the leading ordering prefix stripped
pub fn derive_sub_group_key(subdirectory: &str) -> String {
    let mut segments = subdirectory.split(is_separator);
    segments.next();
    let rest = segments.collect::<Vec<_>>().join("/");
    strip_ordering_prefix(&rest).to_string()
}
