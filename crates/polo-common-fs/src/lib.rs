//! File system utilities for polo.

pub mod path;
pub mod signature;
pub mod watcher;

pub use signature::Signature;
pub use watcher::{WatchTarget, Watcher};

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// File system errors.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("file not found: {}", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FsError {
    fn read(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path, source },
            _ => Self::Read { path, source },
        }
    }

    fn write(path: &Path, source: io::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }

    /// The path the failed operation was working on.
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path, .. } | Self::Read { path, .. } | Self::Write { path, .. } => path,
        }
    }

    /// The underlying I/O error.
    pub fn into_source(self) -> io::Error {
        match self {
            Self::NotFound { source, .. } | Self::Read { source, .. } | Self::Write { source, .. } => {
                source
            }
        }
    }
}

/// Result type for file system operations.
pub type Result<T> = std::result::Result<T, FsError>;

/// Read a text file, dropping a UTF-8 BOM and falling back to latin-1 for
/// content that is not valid UTF-8.
pub fn read_with_encoding_detection(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| FsError::read(path, e))?;
    let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(&bytes[..]);

    Ok(match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    })
}

/// Write to a file atomically (write to temp, then rename).
///
/// Readers of `path` see either the old or the new content, never a mix.
pub fn write_atomic(path: impl AsRef<Path>, contents: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    ensure_dir(parent)?;

    let mut temp_path = path.to_path_buf();
    match path.file_name() {
        Some(name) => temp_path.set_file_name(format!(".{}.tmp", name.to_string_lossy())),
        None => temp_path.push(".tmp"),
    }

    {
        let mut file = File::create(&temp_path).map_err(|e| FsError::write(&temp_path, e))?;
        file.write_all(contents)
            .and_then(|()| file.sync_all())
            .map_err(|e| {
                let _ = fs::remove_file(&temp_path);
                FsError::write(&temp_path, e)
            })?;
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        FsError::write(path, e)
    })?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}

/// Write string to file atomically.
pub fn write_string_atomic(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    write_atomic(path, contents.as_bytes())
}

/// Ensure a directory exists, creating missing parents.
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if !path.is_dir() {
        fs::create_dir_all(path).map_err(|e| FsError::write(path, e))?;
    }
    Ok(())
}

/// Get the lower-cased file extension.
pub fn extension(path: impl AsRef<Path>) -> Option<String> {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
}

/// List directories in a directory, sorted by path.
pub fn list_dirs(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut dirs = Vec::new();

    for entry in fs::read_dir(dir).map_err(|e| FsError::read(dir, e))? {
        let path = entry.map_err(|e| FsError::read(dir, e))?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }

    dirs.sort();
    Ok(dirs)
}

/// Every regular file below `root`, sorted by path.
///
/// Entries that cannot be read are skipped; a missing root yields nothing.
pub fn walk_files(root: impl AsRef<Path>) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}
