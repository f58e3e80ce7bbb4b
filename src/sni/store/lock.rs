//! Exclusive access to the backing file for Load → mutate → Save.
//!
//! Two layers:
//! - a process-wide mutex, so HTTP handler threads don't interleave
//! - an fs2 advisory lock on `<dir>/.snippets.lock`, so two `sni` processes don't either
//!
//! Both are released when the guard drops.

use crate::error::Result;
use fs2::FileExt;
use log::debug;
use once_cell::sync::Lazy;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

pub const LOCK_FILENAME: &str = ".snippets.lock";

static PROCESS_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

pub struct StoreLock {
    file: File,
    path: PathBuf,
    _guard: MutexGuard<'static, ()>,
}

impl StoreLock {
    /// Blocks until both the process mutex and the file lock are held.
    pub fn acquire(dir: &Path) -> Result<Self> {
        // A panicking holder leaves no partial state behind: saves are atomic renames.
        let guard = PROCESS_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
        let path = dir.join(LOCK_FILENAME);
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&path)?;
        file.lock_exclusive()?;
        debug!("acquired store lock {}", path.display());

        Ok(Self {
            file,
            path,
            _guard: guard,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
        debug!("released store lock {}", self.path.display());
    }
}
