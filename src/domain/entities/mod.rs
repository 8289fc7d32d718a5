//! Domain Entities
//!
//! - `PatternIdentity` - one discovered pattern and every name derived for it
//! - `PatternRegistry` - ordered, keyed collection of patterns
//! - `Bucket` / `NavSection` / `NavItem` - navigation tree built from a registry

mod navigation;
mod pattern;
mod registry;

pub use navigation::{build_navigation, outline, Bucket, NavItem, NavSection};
pub use pattern::{
    derive_group_key, derive_identity, derive_sub_group_key, flatten, strip_ordering_prefix,
    title_case, PatternBuilder, PatternData, PatternIdentity, PatternOverrides,
};
pub use registry::PatternRegistry;
