use super::SnippetStore;
use crate::error::Result;
use crate::model::SnippetsFile;
use std::sync::Mutex;

/// Keeps the collection in memory. Used by tests.
#[derive(Default)]
pub struct MemoryStore {
    file: Mutex<SnippetsFile>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(file: SnippetsFile) -> Self {
        Self {
            file: Mutex::new(file),
        }
    }
}

impl SnippetStore for MemoryStore {
    fn load(&self) -> Result<SnippetsFile> {
        Ok(self
            .file
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone())
    }

    fn save(&self, file: &SnippetsFile) -> Result<()> {
        *self
            .file
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = file.clone();
        Ok(())
    }

    fn transact<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut SnippetsFile) -> Result<T>,
    {
        let mut guard = self
            .file
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut working = guard.clone();
        let out = f(&mut working)?;
        *guard = working;
        Ok(out)
    }
}

// --- Test Fixtures ---
