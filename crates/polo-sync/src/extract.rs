//! Pluggable message extraction.
//!
//! Parsing source code or templates is left to the host. It registers one
//! [`Extractor`] per file extension and the updater calls them while walking
//! the source trees.

use crate::error::ExtractError;
use polo_catalog::CatalogDocument;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Produces catalog entries, with locations but no translations, for one
/// source file.
pub trait Extractor: Send + Sync {
    /// Extract the messages of `path`, recording locations under
    /// `display_name`.
    fn extract(&self, path: &Path, display_name: &str) -> Result<CatalogDocument, ExtractError>;
}

impl<F> Extractor for F
where
    F: Fn(&Path, &str) -> Result<CatalogDocument, ExtractError> + Send + Sync,
{
    fn extract(&self, path: &Path, display_name: &str) -> Result<CatalogDocument, ExtractError> {
        self(path, display_name)
    }
}

/// Extractors keyed by lower-cased file extension.
#[derive(Clone, Default)]
pub struct ExtractorRegistry {
    extractors: HashMap<String, Arc<dyn Extractor>>,
}

impl ExtractorRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `extractor` for files ending in `extension` (with or without
    /// the leading dot). Replaces any extractor already registered for it.
    pub fn register(&mut self, extension: &str, extractor: impl Extractor + 'static) -> &mut Self {
        self.register_shared(extension, Arc::new(extractor))
    }

    /// Register an extractor shared with other extensions.
    pub fn register_shared(&mut self, extension: &str, extractor: Arc<dyn Extractor>) -> &mut Self {
        let extension = extension.trim_start_matches('.').to_lowercase();
        self.extractors.insert(extension, extractor);
        self
    }

    /// Extractor responsible for `path`, if any.
    pub fn get(&self, path: &Path) -> Option<&Arc<dyn Extractor>> {
        polo_common_fs::extension(path).and_then(|extension| self.extractors.get(&extension))
    }

    pub fn handles(&self, path: &Path) -> bool {
        self.get(path).is_some()
    }

    /// Registered extensions, sorted.
    pub fn extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.extractors.keys().map(String::as_str).collect();
        extensions.sort_unstable();
        extensions
    }

    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }
}

impl fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractorRegistry")
            .field("extensions", &self.extensions())
            .finish()
    }
}
