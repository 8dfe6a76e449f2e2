//! Flattened translation lookup table.

use std::collections::HashMap;

/// Key of a flattened translation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LookupKey {
    /// A non-plural message identity.
    Singular(String),
    /// A plural message identity and its plural index.
    Plural(String, usize),
}

/// Message catalog for one locale: identity to translated text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    messages: HashMap<LookupKey, String>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a translated message.
    pub fn get(&self, msgid: &str) -> Option<&str> {
        self.lookup(&LookupKey::Singular(msgid.to_string()))
    }

    /// Get one plural form of a translated message.
    pub fn get_plural(&self, msgid: &str, index: usize) -> Option<&str> {
        self.lookup(&LookupKey::Plural(msgid.to_string(), index))
    }

    pub fn lookup(&self, key: &LookupKey) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    /// Add a translation (for building catalogs by hand).
    pub fn insert(&mut self, key: LookupKey, text: impl Into<String>) {
        self.messages.insert(key, text.into());
    }

    /// Overlay `other`; its translations win.
    pub fn extend(&mut self, other: Catalog) {
        self.messages.extend(other.messages);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LookupKey, &str)> {
        self.messages.iter().map(|(key, text)| (key, text.as_str()))
    }
}
