//! Runtime translation tables.

use parking_lot::RwLock;
use polo_catalog::{message_key, Catalog, LookupKey};
use std::collections::HashMap;
use std::sync::Arc;

/// Per-locale lookup tables shared between the loader and readers.
///
/// Cloning yields another handle on the same tables. Readers take an
/// [`Arc`] snapshot of a catalog; reloads swap the whole set at once, so a
/// reader never observes a partially loaded locale.
#[derive(Debug, Clone, Default)]
pub struct TranslationStore {
    catalogs: Arc<RwLock<HashMap<String, Arc<Catalog>>>>,
}

impl TranslationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every table with `catalogs`.
    pub fn replace_all(&self, catalogs: HashMap<String, Arc<Catalog>>) {
        *self.catalogs.write() = catalogs;
    }

    /// Every locale's table as of now.
    pub fn snapshot(&self) -> HashMap<String, Arc<Catalog>> {
        self.catalogs.read().clone()
    }

    /// Table of one locale.
    pub fn catalog(&self, locale: &str) -> Option<Arc<Catalog>> {
        self.catalogs.read().get(locale).cloned()
    }

    /// Loaded locales, sorted.
    pub fn locales(&self) -> Vec<String> {
        let mut locales: Vec<String> = self.catalogs.read().keys().cloned().collect();
        locales.sort();
        locales
    }

    /// Translate `message`, falling back to the message itself.
    pub fn gettext(&self, locale: &str, message: &str) -> String {
        self.translate(locale, LookupKey::Singular(message.to_string()))
            .unwrap_or_else(|| message.to_string())
    }

    /// Translate `message` within `context`, falling back to the message.
    pub fn pgettext(&self, locale: &str, context: &str, message: &str) -> String {
        self.translate(locale, LookupKey::Singular(message_key(message, Some(context))))
            .unwrap_or_else(|| message.to_string())
    }

    /// Plural form `index` of `message`. Untranslated forms fall back to
    /// `message` for index 0 and to `plural` otherwise.
    ///
    /// The caller evaluates the locale's plural rule to pick `index`.
    pub fn ngettext_form(&self, locale: &str, message: &str, plural: &str, index: usize) -> String {
        self.translate(locale, LookupKey::Plural(message.to_string(), index))
            .unwrap_or_else(|| match index {
                0 => message.to_string(),
                _ => plural.to_string(),
            })
    }

    /// Plural form `index` of `message` within `context`, with the same
    /// fallbacks as [`Self::ngettext_form`].
    pub fn npgettext_form(
        &self,
        locale: &str,
        context: &str,
        message: &str,
        plural: &str,
        index: usize,
    ) -> String {
        self.translate(locale, LookupKey::Plural(message_key(message, Some(context)), index))
            .unwrap_or_else(|| match index {
                0 => message.to_string(),
                _ => plural.to_string(),
            })
    }

    fn translate(&self, locale: &str, key: LookupKey) -> Option<String> {
        let catalog = self.catalog(locale)?;
        catalog.lookup(&key).map(str::to_string)
    }
}
