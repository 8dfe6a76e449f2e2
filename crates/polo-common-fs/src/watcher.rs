//! Modification-time driven rebuild trigger.
//!
//! A [`Watcher`] owns a [`WatchTarget`] and remembers the [`Signature`] of
//! every file the target depends on. [`Watcher::check`] rebuilds the target
//! only when that set changed since the last successful rebuild, or when the
//! watcher was explicitly marked dirty.

use crate::signature::Signature;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Something rebuilt from a set of watched files.
pub trait WatchTarget {
    /// Error returned by a failed rebuild.
    type Error: fmt::Display;

    /// Files the rebuild depends on. Paths that do not exist are allowed.
    fn list_files(&mut self) -> Vec<PathBuf>;

    /// Rebuild derived state from the files.
    fn execute(&mut self) -> Result<(), Self::Error>;
}

struct WatchState<T> {
    target: T,
    signatures: HashMap<PathBuf, Signature>,
    dirty: bool,
}

/// Runs a [`WatchTarget`] at most once per detected change.
///
/// All operations go through one lock, so concurrent callers of
/// [`check`](Self::check) serialize and a change triggers a single rebuild.
/// The rebuild runs while the lock is held and must not call back into the
/// watcher.
pub struct Watcher<T: WatchTarget> {
    state: Mutex<WatchState<T>>,
}

impl<T: WatchTarget> Watcher<T> {
    /// Wrap `target`. The first [`check`](Self::check) always rebuilds.
    pub fn new(target: T) -> Self {
        Self {
            state: Mutex::new(WatchState {
                target,
                signatures: HashMap::new(),
                dirty: true,
            }),
        }
    }

    /// Rebuild the target if its files changed or the watcher is dirty.
    ///
    /// Returns `Ok(true)` when a rebuild ran. A failed rebuild leaves the
    /// watcher dirty, so the next call retries.
    pub fn check(&self) -> Result<bool, T::Error> {
        let mut state = self.state.lock();
        let files = state.target.list_files();
        let signatures = scan(&files);
        let changed = signatures != state.signatures;

        if !state.dirty && !changed {
            return Ok(false);
        }

        debug!(files = files.len(), dirty = state.dirty, changed, "rebuilding watched target");
        match state.target.execute() {
            Ok(()) => {
                state.signatures = signatures;
                state.dirty = false;
                Ok(true)
            }
            Err(e) => {
                warn!(error = %e, "rebuild failed");
                state.dirty = true;
                Err(e)
            }
        }
    }

    /// Force the next [`check`](Self::check) to rebuild.
    pub fn set_dirty(&self) {
        self.state.lock().dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.state.lock().dirty
    }

    /// Change the target and mark the watcher dirty in one step.
    pub fn reconfigure<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut state = self.state.lock();
        state.dirty = true;
        f(&mut state.target)
    }

    /// Read the target without affecting the dirty flag.
    pub fn with_target<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.state.lock().target)
    }

    /// Files recorded at the last successful rebuild, sorted.
    pub fn tracked_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = self.state.lock().signatures.keys().cloned().collect();
        files.sort();
        files
    }
}

/// Signatures of the listed files that currently exist.
fn scan(files: &[PathBuf]) -> HashMap<PathBuf, Signature> {
    files
        .iter()
        .filter(|path| path.is_file())
        .filter_map(|path| signature(path).map(|signature| (path.clone(), signature)))
        .collect()
}

fn signature(path: &Path) -> Option<Signature> {
    match Signature::of(path) {
        Ok(signature) => Some(signature),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "cannot read modification time");
            None
        }
    }
}
