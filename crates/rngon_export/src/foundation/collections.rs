//! Specialized collection types

pub use indexmap::IndexMap;

/// Insertion-ordered table keyed by string.
///
/// Iteration follows first-insertion order. Inserting an existing key
/// replaces the value in place and keeps the original position, which is
/// the same outcome a JavaScript object literal gives for repeated keys.
pub type KeyedTable<T> = IndexMap<String, T>;
