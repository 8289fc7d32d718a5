//! Property tests for PatternKit.
//!
//! Properties use randomized input generation to explore edge cases and
//! protect invariants like "never panics" and "derivation is pure".
//!
//! Run with: `cargo test --test properties`

#[path = "properties/identity.rs"]
mod identity;

#[path = "properties/entry_name.rs"]
mod entry_name;
