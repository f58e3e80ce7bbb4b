use super::lock::StoreLock;
use super::SnippetStore;
use crate::config::SniConfig;
use crate::error::{Result, SniError};
use crate::model::SnippetsFile;
use log::debug;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub struct FileStore {
    dir: PathBuf,
    path: PathBuf,
}

impl FileStore {
    pub fn new(config: &SniConfig) -> Self {
        Self {
            dir: config.config_dir.clone(),
            path: config.snippet_file.clone(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(SniError::Io)?;
        }
        Ok(())
    }
}

impl SnippetStore for FileStore {
    fn load(&self) -> Result<SnippetsFile> {
        if !self.path.exists() {
            debug!("{} does not exist yet, starting empty", self.path.display());
            return Ok(SnippetsFile::new());
        }

        let content = fs::read_to_string(&self.path).map_err(SniError::Io)?;
        if content.trim().is_empty() {
            return Ok(SnippetsFile::new());
        }

        let file: SnippetsFile = serde_yaml::from_str(&content).map_err(SniError::Parse)?;
        debug!(
            "loaded {} snippets from {}",
            file.len(),
            self.path.display()
        );
        Ok(file)
    }

    fn save(&self, file: &SnippetsFile) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_yaml::to_string(file).map_err(SniError::Parse)?;

        // Same directory as the target so the rename never crosses filesystems.
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(SniError::Io)?;
        tmp.write_all(content.as_bytes()).map_err(SniError::Io)?;
        tmp.as_file().sync_all().map_err(SniError::Io)?;
        tmp.persist(&self.path)
            .map_err(|e| SniError::Io(e.error))?;

        debug!("saved {} snippets to {}", file.len(), self.path.display());
        Ok(())
    }

    fn transact<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut SnippetsFile) -> Result<T>,
    {
        let _lock = StoreLock::acquire(&self.dir)?;
        let mut file = self.load()?;
        let out = f(&mut file)?;
        self.save(&file)?;
        Ok(out)
    }
}
