//! Build lock
//!
//! Rebuilds mutate the public tree, so at most one may run at a time. The
//! lock is an exclusive advisory lock on a file inside the public root,
//! which also keeps a second watcher process from interleaving writes.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::{PatternKitError, PatternKitResult};

/// Lock file name inside the public root
pub const LOCK_FILE_NAME: &str = ".patternkit.lock";

/// Held for the duration of one rebuild action; released on drop
#[derive(Debug)]
pub struct BuildLock {
    file: File,
    path: PathBuf,
}

impl BuildLock {
    /// Block until the lock on `<public_root>/.patternkit.lock` is acquired
    pub fn acquire(public_root: &Path) -> PatternKitResult<Self> {
        fs::create_dir_all(public_root)?;
        let path = public_root.join(LOCK_FILE_NAME);
        let file = File::create(&path)?;
        file.lock_exclusive().map_err(|e| PatternKitError::Lock {
            path: path.clone(),
            message: e.to_string(),
        })?;
        tracing::trace!(path = %path.display(), "build lock acquired");
        Ok(Self { file, path })
    }

    /// Acquire without blocking; `Ok(None)` when another holder has it
    pub fn try_acquire(public_root: &Path) -> PatternKitResult<Option<Self>> {
        fs::create_dir_all(public_root)?;
        let path = public_root.join(LOCK_FILE_NAME);
        let file = File::create(&path)?;
        match file.try_lock_exclusive() {
            Ok(()) => Ok(Some(Self { file, path })),
            Err(e) if e.kind() == fs2::lock_contended_error().kind() => Ok(None),
            Err(e) => Err(PatternKitError::Lock {
                path,
                message: e.to_string(),
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for BuildLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}
