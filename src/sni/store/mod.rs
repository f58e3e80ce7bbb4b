//! # Storage Layer
//!
//! The whole snippet collection is the unit of persistence: every read
//! materializes the full [`SnippetsFile`], every write replaces it. The
//! [`SnippetStore`] trait hides where that file lives.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: YAML file on disk (`snippets.yaml`)
//!   - Writes go to a temp file in the same directory and are renamed into
//!     place, so readers see either the old or the new collection
//!   - Mutations hold a process-wide mutex plus an advisory file lock
//!
//! - [`memory::MemoryStore`]: in-memory collection for tests
//!
//! ## Transactions
//!
//! Mutating commands never call `load` and `save` directly. They go through
//! [`SnippetStore::transact`], which runs Load → mutate → Save while holding
//! the store's lock. If the closure returns an error, nothing is written.
//!
//! ```text
//! .sni/
//! ├── snippets.yaml      # the collection
//! └── .snippets.lock     # advisory lock file
//! ```

use crate::error::Result;
use crate::model::SnippetsFile;

pub mod fs;
pub mod lock;
pub mod memory;

/// Abstract interface for snippet persistence.
pub trait SnippetStore {
    /// Read the whole collection. A missing backing file is an empty collection.
    fn load(&self) -> Result<SnippetsFile>;

    /// Replace the whole collection.
    fn save(&self, file: &SnippetsFile) -> Result<()>;

    /// Load, apply `f`, and save, exclusively. `f`'s error aborts the save.
    fn transact<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut SnippetsFile) -> Result<T>;
}
