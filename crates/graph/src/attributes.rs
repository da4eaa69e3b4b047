//! Ordered attribute sets and their DOT rendering.

use indexmap::IndexMap;
use serde::Deserialize;

/// Indentation unit for the emitted document.
pub(crate) const INDENT: &str = "    ";

/// An ordered key/value set of DOT rendering hints.
///
/// Backed by an insertion-ordered map rather than a hash map so render order
/// is reproducible without an extra sort. Merging is last-write-wins per
/// key; an overwritten key keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Attributes(IndexMap<String, String>);

impl Attributes {
    /// Create an empty attribute set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attributes in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Insert or overwrite a single attribute.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up an attribute value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Merge `other` into `self`, overwriting conflicting keys.
    pub fn merge(&mut self, other: &Self) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as a shared default-style block, e.g. `node [...]`.
    ///
    /// One attribute renders on a single line; two or more render as an
    /// indented block followed by a blank line. An empty set renders
    /// nothing, so callers guard before emitting a scope with no attributes.
    pub fn write_block(&self, scope: &str, out: &mut String) {
        self.write_bracketed(scope, "", out);
    }

    /// Render as a standalone statement terminated with `;`, e.g. a node
    /// line `build [label="build"];`.
    pub fn write_statement(&self, scope: &str, out: &mut String) {
        self.write_bracketed(scope, ";", out);
    }

    fn write_bracketed(&self, scope: &str, terminator: &str, out: &mut String) {
        // One attribute fits on the same line as the scope
        if self.0.len() == 1 {
            if let Some((key, value)) = self.0.iter().next() {
                out.push_str(INDENT);
                out.push_str(scope);
                out.push_str(" [");
                out.push_str(key);
                out.push('=');
                push_quoted(value, out);
                out.push(']');
                out.push_str(terminator);
                out.push('\n');
            }
            return;
        }

        if self.0.is_empty() {
            return;
        }

        out.push_str(INDENT);
        out.push_str(scope);
        out.push_str(" [\n");
        for (key, value) in &self.0 {
            out.push_str(INDENT);
            out.push_str(INDENT);
            out.push_str(key);
            out.push('=');
            push_quoted(value, out);
            out.push('\n');
        }
        out.push_str(INDENT);
        out.push(']');
        out.push_str(terminator);
        out.push_str("\n\n");
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Append `value` as a double-quoted DOT literal, escaping embedded quote
/// and backslash characters.
fn push_quoted(value: &str, out: &mut String) {
    out.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
}
