//! Loading locale catalogs into the runtime [`TranslationStore`].

use crate::error::{Result, SyncError};
use crate::store::TranslationStore;
use crate::updater::catalog_path;
use polo_catalog::{parse_file_to_lookup, Catalog};
use polo_common_config::PoloConfig;
use polo_common_fs::WatchTarget;
use polo_common_log::spans::{locale_span, record_error};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Rebuilds the store from `<path>/<locale>/LC_MESSAGES/<domain>.po` files.
///
/// When several locale paths hold a catalog for the same locale, later paths
/// override earlier ones.
#[derive(Debug, Clone)]
pub struct TranslationsLoader {
    pub locale_paths: Vec<PathBuf>,
    pub locales: Vec<String>,
    pub domain: String,
    store: TranslationStore,
}

impl TranslationsLoader {
    /// Create a loader filling `store`, with no paths or locales.
    pub fn new(store: TranslationStore) -> Self {
        Self {
            locale_paths: Vec::new(),
            locales: Vec::new(),
            domain: "messages".to_string(),
            store,
        }
    }

    /// Create a loader from the `reload` settings.
    pub fn from_config(config: &PoloConfig, store: TranslationStore) -> Self {
        let mut loader = Self::new(store);
        loader.apply_config(config);
        loader
    }

    /// Take over the `reload` settings, keeping the store.
    pub fn apply_config(&mut self, config: &PoloConfig) {
        self.locale_paths = config.reload.locale_paths.clone();
        self.locales = config.locales.clone();
        self.domain = config.reload.domain.clone();
    }

    pub fn store(&self) -> &TranslationStore {
        &self.store
    }

    /// Existing catalogs of `locale`, in override order.
    pub fn translation_files(&self, locale: &str) -> Vec<PathBuf> {
        self.locale_paths
            .iter()
            .map(|path| catalog_path(&path.join(locale), &self.domain))
            .filter(|path| path.is_file())
            .collect()
    }

    fn load_locale(&self, locale: &str) -> Result<Catalog> {
        let span = locale_span("load", locale);
        let _guard = span.enter();

        let mut catalog = Catalog::new();
        for path in self.translation_files(locale) {
            let parsed = parse_file_to_lookup(&path).map_err(|e| {
                record_error(&e);
                e
            })?;
            catalog.extend(parsed);
        }
        debug!(messages = catalog.len(), "loaded locale");
        Ok(catalog)
    }
}

impl WatchTarget for TranslationsLoader {
    type Error = SyncError;

    fn list_files(&mut self) -> Vec<PathBuf> {
        self.locales
            .iter()
            .flat_map(|locale| self.translation_files(locale))
            .collect()
    }

    /// Parse every locale, then swap the results into the store together.
    /// A parse failure leaves the store as it was.
    fn execute(&mut self) -> Result<()> {
        let mut catalogs = HashMap::new();
        for locale in &self.locales {
            catalogs.insert(locale.clone(), Arc::new(self.load_locale(locale)?));
        }
        info!(locales = catalogs.len(), "translations loaded");
        self.store.replace_all(catalogs);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_catalog(locale_path: &Path, locale: &str, content: &str) {
        let path = catalog_path(&locale_path.join(locale), "messages");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_later_paths_override() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("first");
        let second = dir.path().join("second");
        write_catalog(&first, "fr", "msgid \"Hello\"\nmsgstr \"Salut\"\n\nmsgid \"Bye\"\nmsgstr \"Ciao\"\n");
        write_catalog(&second, "fr", "msgid \"Hello\"\nmsgstr \"Bonjour\"\n");

        let mut loader = TranslationsLoader::new(TranslationStore::new());
        loader.locale_paths = vec![first, second];
        loader.locales = vec!["fr".to_string(), "de".to_string()];

        assert_eq!(
            loader.list_files(),
            vec![
                catalog_path(&dir.path().join("first/fr"), "messages"),
                catalog_path(&dir.path().join("second/fr"), "messages"),
            ]
        );

        loader.execute().unwrap();
        let store = loader.store();
        assert_eq!(store.gettext("fr", "Hello"), "Bonjour");
        assert_eq!(store.gettext("fr", "Bye"), "Ciao");
        assert_eq!(store.locales(), vec!["de".to_string(), "fr".to_string()]);
        assert!(store.catalog("de").unwrap().is_empty());
    }

    #[test]
    fn test_parse_failure_keeps_store() {
        let dir = tempdir().unwrap();
        write_catalog(dir.path(), "fr", "msgid \"Hello\"\nmsgstr \"Bonjour\"\n");

        let mut loader = TranslationsLoader::new(TranslationStore::new());
        loader.locale_paths = vec![dir.path().to_path_buf()];
        loader.locales = vec!["fr".to_string()];
        loader.execute().unwrap();

        write_catalog(dir.path(), "fr", "msgid \"Hello\"\n");
        assert!(matches!(loader.execute(), Err(SyncError::Parse(_))));
        assert_eq!(loader.store().gettext("fr", "Hello"), "Bonjour");
    }

    #[test]
    fn test_from_config() {
        let mut config = PoloConfig::default();
        config.locales = vec!["fr".to_string()];
        config.reload.locale_paths = vec![PathBuf::from("locale")];
        config.reload.domain = "django".to_string();

        let loader = TranslationsLoader::from_config(&config, TranslationStore::new());
        assert_eq!(loader.locales, vec!["fr".to_string()]);
        assert_eq!(loader.locale_paths, vec![PathBuf::from("locale")]);
        assert_eq!(loader.domain, "django");
    }
}
