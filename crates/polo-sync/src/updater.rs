//! Regenerating locale catalogs from the messages found in source trees.
//!
//! A base document is extracted once per root, then cloned for every locale,
//! overlaid with the locale's existing catalog so human translations survive,
//! and written back.

use crate::error::{Result, SyncError};
use crate::extract::ExtractorRegistry;
use polo_catalog::{parse_file_into, CatalogDocument, SerializeOptions};
use polo_common_config::PoloConfig;
use polo_common_fs::path::relative_display;
use polo_common_fs::{ensure_dir, list_dirs, walk_files, write_string_atomic, WatchTarget};
use polo_common_log::spans::{catalog_span, record_error, Timer};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Location of a locale's catalog: `<locale_dir>/LC_MESSAGES/<domain>.po`.
pub fn catalog_path(locale_dir: &Path, domain: &str) -> PathBuf {
    locale_dir.join("LC_MESSAGES").join(format!("{domain}.po"))
}

/// Run the registered extractors over every file below `root`.
///
/// Locations are recorded relative to `root` with `/` separators.
pub fn create_base_document(root: &Path, registry: &ExtractorRegistry) -> Result<CatalogDocument> {
    let mut base = CatalogDocument::new();
    for path in walk_files(root) {
        let Some(extractor) = registry.get(&path) else {
            continue;
        };
        let display_name = relative_display(&path, root);
        let extracted = extractor.extract(&path, &display_name)?;
        base.merge(&extracted);
    }
    debug!(root = %root.display(), entries = base.len(), "extracted base catalog");
    Ok(base)
}

/// Create `<locales_path>/<locale>` for every locale that lacks one.
pub fn create_locale_dirs(locales_path: &Path, locales: &[String]) -> Result<()> {
    for locale in locales {
        ensure_dir(locales_path.join(locale))?;
    }
    Ok(())
}

/// Merge `base` with the catalog stored under `locale_dir` and write the
/// result back. Returns the catalog path.
///
/// The output is rendered completely before the file is replaced, so a
/// failure never leaves a truncated catalog behind.
pub fn update_locale_translations(
    base: &CatalogDocument,
    locale_dir: &Path,
    domain: &str,
    options: &SerializeOptions,
) -> Result<PathBuf> {
    let path = catalog_path(locale_dir, domain);
    let span = catalog_span("update", &path);
    let _guard = span.enter();

    match merge_and_write(base, &path, options) {
        Ok(entries) => {
            info!(entries, "updated catalog");
            Ok(path)
        }
        Err(e) => {
            record_error(&e);
            Err(e)
        }
    }
}

fn merge_and_write(base: &CatalogDocument, path: &Path, options: &SerializeOptions) -> Result<usize> {
    let mut document = base.clone();
    if path.is_file() {
        parse_file_into(&mut document, path)?;
    }
    write_string_atomic(path, &document.serialize(options))?;
    Ok(document.len())
}

/// Keeps the catalogs of a set of source trees up to date.
#[derive(Debug, Clone)]
pub struct TranslationsUpdater {
    /// Source trees, each with its own locale directory.
    pub roots: Vec<PathBuf>,
    /// Locales whose directories are created when missing.
    pub locales: Vec<String>,
    pub domain: String,
    /// Locale directory, relative to each root.
    pub locales_dir: PathBuf,
    /// Update every locale directory found, not only `locales`.
    pub update_all: bool,
    pub options: SerializeOptions,
    pub registry: ExtractorRegistry,
}

impl TranslationsUpdater {
    /// Create an updater with no roots.
    pub fn new(registry: ExtractorRegistry) -> Self {
        Self {
            roots: Vec::new(),
            locales: Vec::new(),
            domain: "messages".to_string(),
            locales_dir: PathBuf::from("locale"),
            update_all: true,
            options: SerializeOptions::default(),
            registry,
        }
    }

    /// Create an updater from the `update` settings.
    pub fn from_config(config: &PoloConfig, registry: ExtractorRegistry) -> Self {
        let mut updater = Self::new(registry);
        updater.apply_config(config);
        updater
    }

    /// Take over the `update` settings, keeping the registry.
    pub fn apply_config(&mut self, config: &PoloConfig) {
        self.roots = config.update.roots.clone();
        self.locales = config.update_locales();
        self.domain = config.update.domain.clone();
        self.locales_dir = config.update.locales_dir.clone();
        self.options = SerializeOptions {
            include_locations: config.update.include_locations,
            prune_obsoletes: config.update.prune_obsoletes,
        };
    }

    /// Update the catalogs of one root. Returns the catalogs written.
    pub fn update_root(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let locales_path = root.join(&self.locales_dir);
        let base = create_base_document(root, &self.registry)?;
        create_locale_dirs(&locales_path, &self.locales)?;

        let mut written = Vec::new();
        if !locales_path.is_dir() {
            return Ok(written);
        }
        for locale_dir in list_dirs(&locales_path)? {
            if self.update_all || self.is_configured_locale(&locale_dir) {
                written.push(update_locale_translations(
                    &base,
                    &locale_dir,
                    &self.domain,
                    &self.options,
                )?);
            }
        }
        Ok(written)
    }

    fn is_configured_locale(&self, locale_dir: &Path) -> bool {
        locale_dir
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.locales.iter().any(|locale| locale == name))
    }
}

impl WatchTarget for TranslationsUpdater {
    type Error = SyncError;

    /// Every source file an extractor is registered for.
    fn list_files(&mut self) -> Vec<PathBuf> {
        self.roots
            .iter()
            .flat_map(|root| walk_files(root))
            .filter(|path| self.registry.handles(path))
            .collect()
    }

    fn execute(&mut self) -> Result<()> {
        let timer = Timer::start("update_translations");
        let mut written = 0;
        for root in &self.roots {
            written += self.update_root(root)?.len();
        }
        timer.finish();
        info!(roots = self.roots.len(), catalogs = written, "translations updated");
        Ok(())
    }
}
