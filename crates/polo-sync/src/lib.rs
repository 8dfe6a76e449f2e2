//! Keeps PO catalogs in step with source trees and runtime tables in step
//! with PO catalogs.
//!
//! [`TranslationsUpdater`] regenerates `<root>/<locales_dir>/<locale>/LC_MESSAGES/<domain>.po`
//! from the messages host-provided [`Extractor`]s find in the sources.
//! [`TranslationsLoader`] parses those catalogs into a [`TranslationStore`].
//! Both are [`WatchTarget`]s; wrap them in a [`Watcher`] to re-run them only
//! when their inputs change.

pub mod error;
pub mod extract;
pub mod loader;
pub mod store;
pub mod updater;

pub use error::{ExtractError, Result, SyncError};
pub use extract::{Extractor, ExtractorRegistry};
pub use loader::TranslationsLoader;
pub use polo_common_fs::{WatchTarget, Watcher};
pub use store::TranslationStore;
pub use updater::{
    catalog_path, create_base_document, create_locale_dirs, update_locale_translations,
    TranslationsUpdater,
};
