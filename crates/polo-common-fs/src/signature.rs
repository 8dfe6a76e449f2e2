//! File modification signatures.

use std::fs::Metadata;
use std::io;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Value compared between checks to decide whether a file changed.
///
/// This is the modification time in nanoseconds since the Unix epoch. On
/// Windows the creation time is subtracted, so a file replaced by an older
/// copy still produces a new signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature(i128);

impl Signature {
    /// Read the signature of the file at `path`.
    pub fn of(path: impl AsRef<Path>) -> io::Result<Self> {
        Self::from_metadata(&std::fs::metadata(path)?)
    }

    pub fn from_metadata(metadata: &Metadata) -> io::Result<Self> {
        let modified = nanos_since_epoch(metadata.modified()?);
        if cfg!(windows) {
            Ok(Self(modified - nanos_since_epoch(metadata.created()?)))
        } else {
            Ok(Self(modified))
        }
    }

    pub fn as_nanos(&self) -> i128 {
        self.0
    }
}

fn nanos_since_epoch(time: SystemTime) -> i128 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => after.as_nanos() as i128,
        Err(before) => -(before.duration().as_nanos() as i128),
    }
}
