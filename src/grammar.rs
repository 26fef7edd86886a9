//! Production rules, configuration-line parsing, and the per-session derivation cache.

use std::collections::HashMap;

/// Separates a rule's key from its replacement in a configuration line.
pub const RULE_ARROW: &str = "->";

/// One parsed configuration line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Line {
    /// `key->replacement`. The key may be longer than one character; such rules are
    /// stored but never match during rewriting.
    Rule { key: String, replacement: String },
    /// Any non-empty line without an arrow.
    Axiom(String),
}

impl Line {
    /// Parses a line after removing every space. Blank lines yield `None`.
    ///
    /// A trailing carriage return is dropped too so CRLF text parses like LF text.
    pub fn parse(raw: &str) -> Option<Self> {
        let line: String = raw.trim_end_matches('\r').replace(' ', "");
        if line.is_empty() {
            return None;
        }

        Some(match line.split_once(RULE_ARROW) {
            Some((key, replacement)) => Self::Rule {
                key: key.to_owned(),
                replacement: replacement.to_owned(),
            },
            None => Self::Axiom(line),
        })
    }
}

/// Symbol-keyed rewrite rules with their alternatives in insertion order.
#[derive(Clone, Debug, Default)]
pub struct Productions {
    rules: HashMap<String, Vec<String>>,
}

impl Productions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `replacement` to the alternatives of `key`, creating the entry if needed.
    pub fn push(&mut self, key: impl Into<String>, replacement: impl Into<String>) {
        self.rules
            .entry(key.into())
            .or_default()
            .push(replacement.into());
    }

    /// Alternatives registered for `symbol`, if it is a key.
    pub fn alternatives(&self, symbol: &str) -> Option<&[String]> {
        self.rules.get(symbol).map(Vec::as_slice)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.rules.contains_key(symbol)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    #[cfg(test)]
    pub(crate) fn insert_empty(&mut self, key: &str) {
        self.rules.insert(key.to_owned(), Vec::new());
    }
}

/// Cached derivations of one grammar session.
///
/// Index `i` holds the string after `i` rewrite passes over the axiom. The cache only
/// grows until [`clear`](Self::clear).
#[derive(Clone, Debug, Default)]
pub struct Derivation {
    current: String,
    iterations: Vec<String>,
    rewrite_passes: usize,
}

impl Derivation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the working string and records it as the next cached iteration.
    ///
    /// Only the first axiom lands at index 0. A later one is appended after whatever is
    /// already cached without a rewrite pass.
    pub fn set_axiom(&mut self, axiom: impl Into<String>) {
        self.current = axiom.into();
        self.iterations.push(self.current.clone());
    }

    /// Records the result of rewriting the working string once.
    pub(crate) fn push_rewrite(&mut self, next: String) {
        self.current = next;
        self.iterations.push(self.current.clone());
        self.rewrite_passes += 1;
    }

    /// The most recent string, which every new rewrite pass starts from.
    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn get(&self, n: usize) -> Option<&str> {
        self.iterations.get(n).map(String::as_str)
    }

    pub fn iterations(&self) -> &[String] {
        &self.iterations
    }

    pub fn len(&self) -> usize {
        self.iterations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.iterations.is_empty()
    }

    /// How many rewrite passes have extended the cache since the last clear.
    pub fn rewrite_passes(&self) -> usize {
        self.rewrite_passes
    }

    pub fn clear(&mut self) {
        self.current.clear();
        self.iterations.clear();
        self.rewrite_passes = 0;
    }
}
