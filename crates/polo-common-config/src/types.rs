//! Configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoloConfig {
    /// Enabled locales.
    pub locales: Vec<String>,
    /// Catalog update settings.
    pub update: UpdateConfig,
    /// Runtime reload settings.
    pub reload: ReloadConfig,
}

impl Default for PoloConfig {
    fn default() -> Self {
        Self {
            locales: Vec::new(),
            update: UpdateConfig::default(),
            reload: ReloadConfig::default(),
        }
    }
}

impl PoloConfig {
    /// Enabled locales whose catalogs are updated from source.
    pub fn update_locales(&self) -> Vec<String> {
        self.locales
            .iter()
            .filter(|locale| !self.update.excluded_locales.contains(locale))
            .cloned()
            .collect()
    }
}

/// Settings for regenerating PO files from extracted strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateConfig {
    /// Source trees scanned for translatable strings.
    pub roots: Vec<PathBuf>,
    /// Locales never written.
    pub excluded_locales: Vec<String>,
    /// Write `#: file:line` references.
    pub include_locations: bool,
    /// Drop entries no longer found in the sources.
    pub prune_obsoletes: bool,
    /// Catalog file name, without extension.
    pub domain: String,
    /// Directory holding locale folders, relative to each root.
    pub locales_dir: PathBuf,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            excluded_locales: Vec::new(),
            include_locations: true,
            prune_obsoletes: false,
            domain: "messages".to_string(),
            locales_dir: PathBuf::from("locale"),
        }
    }
}

/// Settings for reloading the runtime translation tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReloadConfig {
    /// Directories holding `<locale>/LC_MESSAGES/<domain>.po`; later ones win.
    pub locale_paths: Vec<PathBuf>,
    /// Catalog file name, without extension.
    pub domain: String,
}

impl Default for ReloadConfig {
    fn default() -> Self {
        Self {
            locale_paths: Vec::new(),
            domain: "messages".to_string(),
        }
    }
}
