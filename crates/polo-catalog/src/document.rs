//! In-memory model of a PO file.

use crate::lookup::{Catalog, LookupKey};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Separator joining a context and a message into one identity.
pub const CONTEXT_SEPARATOR: char = '\u{04}';

/// Header field holding the plural rule.
pub const PLURAL_FORMS_FIELD: &str = "Plural-Forms";

/// Build the identity of a message, namespaced by its context if any.
pub fn message_key(message: &str, context: Option<&str>) -> String {
    match context {
        Some(context) => format!("{context}{CONTEXT_SEPARATOR}{message}"),
        None => message.to_string(),
    }
}

/// A place in the source where a message is referenced.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub file: String,
    pub line: u32,
}

impl Location {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// One message of a catalog with its translations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationEntry {
    pub message: String,
    pub plural: Option<String>,
    pub context: Option<String>,
    /// Empty when the message is no longer referenced by any source.
    pub locations: Vec<Location>,
    /// Translations by plural index; non-plural entries use index 0.
    pub translations: BTreeMap<usize, String>,
}

impl TranslationEntry {
    pub fn new(message: impl Into<String>, plural: Option<String>, context: Option<String>) -> Self {
        Self {
            message: message.into(),
            plural,
            context,
            locations: Vec::new(),
            translations: BTreeMap::new(),
        }
    }

    /// Identity of this entry inside its document.
    pub fn key(&self) -> String {
        message_key(&self.message, self.context.as_deref())
    }

    pub fn add_location(&mut self, file: impl Into<String>, line: u32) {
        self.locations.push(Location::new(file, line));
    }

    pub fn add_translation(&mut self, translation: impl Into<String>) {
        self.add_plural_translation(0, translation);
    }

    pub fn add_plural_translation(&mut self, index: usize, translation: impl Into<String>) {
        self.translations.insert(index, translation.into());
    }

    /// An entry without locations is obsolete.
    pub fn is_obsolete(&self) -> bool {
        self.locations.is_empty()
    }

    /// Whether every stored translation is the empty string.
    pub fn is_untranslated(&self) -> bool {
        self.translations.values().all(String::is_empty)
    }

    fn fill_catalog(&self, catalog: &mut Catalog) {
        let key = self.key();
        if self.plural.is_some() {
            for (&index, text) in &self.translations {
                if !text.is_empty() {
                    catalog.insert(LookupKey::Plural(key.clone(), index), text.clone());
                }
            }
        } else if let Some(text) = self.translations.get(&0).filter(|t| !t.is_empty()) {
            catalog.insert(LookupKey::Singular(key), text.clone());
        }
    }
}

/// A parsed or extracted PO file: header fields and entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogDocument {
    header_fields: Vec<(String, String)>,
    entries: HashMap<String, TranslationEntry>,
}

impl CatalogDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a header field, replacing the value in place if the name exists.
    pub fn add_header_field(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        match self.header_fields.iter_mut().find(|(name, _)| *name == field) {
            Some((_, existing)) => *existing = value,
            None => self.header_fields.push((field, value)),
        }
    }

    pub fn header_fields(&self) -> &[(String, String)] {
        &self.header_fields
    }

    pub fn header_field(&self, field: &str) -> Option<&str> {
        self.header_fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    /// Add an entry or return the existing one with the same identity.
    ///
    /// An existing entry without a plural form adopts `plural`; an existing
    /// plural form is never replaced.
    pub fn add_entry(
        &mut self,
        message: &str,
        plural: Option<&str>,
        context: Option<&str>,
    ) -> &mut TranslationEntry {
        let key = message_key(message, context);
        let entry = self.entries.entry(key).or_insert_with(|| {
            TranslationEntry::new(message, None, context.map(str::to_string))
        });
        if entry.plural.is_none() {
            entry.plural = plural.map(str::to_string);
        }
        entry
    }

    pub fn entry(&self, message: &str, context: Option<&str>) -> Option<&TranslationEntry> {
        self.entries.get(&message_key(message, context))
    }

    pub fn entry_mut(&mut self, message: &str, context: Option<&str>) -> Option<&mut TranslationEntry> {
        self.entries.get_mut(&message_key(message, context))
    }

    /// Entries in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = &TranslationEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.header_fields.is_empty()
    }

    /// Overlay `other` onto this document.
    ///
    /// Header fields are set, entries are added or merged, new locations are
    /// appended and incoming translations replace stored ones. Merging the
    /// same document twice leaves the result unchanged.
    pub fn merge(&mut self, other: &CatalogDocument) {
        for (field, value) in &other.header_fields {
            self.add_header_field(field.clone(), value.clone());
        }
        for incoming in other.entries.values() {
            let entry = self.add_entry(
                &incoming.message,
                incoming.plural.as_deref(),
                incoming.context.as_deref(),
            );
            for location in &incoming.locations {
                if !entry.locations.contains(location) {
                    entry.locations.push(location.clone());
                }
            }
            for (&index, text) in &incoming.translations {
                entry.translations.insert(index, text.clone());
            }
        }
    }

    /// Number of plural forms declared by the `Plural-Forms` header.
    pub fn get_nplurals(&self) -> Option<usize> {
        let (_, value) = self
            .header_fields
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(PLURAL_FORMS_FIELD))?;
        value.split(';').find_map(|pair| {
            let (name, count) = pair.split_once('=')?;
            if name.trim() == "nplurals" {
                count.trim().parse().ok()
            } else {
                None
            }
        })
    }

    /// Flatten into a lookup table, leaving out empty translations.
    pub fn to_lookup(&self) -> Catalog {
        let mut catalog = Catalog::new();
        for entry in self.entries.values() {
            entry.fill_catalog(&mut catalog);
        }
        catalog
    }
}
