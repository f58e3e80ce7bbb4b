//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for
//! both the CLI and the HTTP server.
//!
//! The facade:
//! - **Dispatches** to the matching `commands::*::run`
//! - **Normalizes inputs** (tag strings, optional filters)
//! - **Returns data**, never strings meant for a terminal
//!
//! Business logic lives in `commands/*.rs`; presentation lives in the CLI
//! and server modules.
//!
//! ## Generic Over SnippetStore
//!
//! - Production: `SniApi<FileStore>`
//! - Testing: `SniApi<MemoryStore>`
//!
//! The store is only borrowed immutably, so one `SniApi` can be shared
//! across server threads behind an `Arc`.

use crate::commands;
use crate::error::Result;
use crate::model::{parse_tags, Snippet, SnippetUpdate};
use crate::store::SnippetStore;

pub struct SniApi<S: SnippetStore> {
    store: S,
}

impl<S: SnippetStore> SniApi<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn create_snippet(
        &self,
        name: String,
        description: String,
        command: String,
        tags: Vec<String>,
    ) -> Result<Snippet> {
        commands::create::run(&self.store, name, description, command, tags)
    }

    /// Like [`create_snippet`](Self::create_snippet), with tags given as
    /// comma separated text.
    pub fn create_snippet_from_input(
        &self,
        name: String,
        description: String,
        command: String,
        tags: &str,
    ) -> Result<Snippet> {
        self.create_snippet(name, description, command, parse_tags(tags))
    }

    pub fn get_snippet(&self, name: &str) -> Result<Snippet> {
        commands::get::run(&self.store, name)
    }

    pub fn update_snippet(&self, name: &str, update: SnippetUpdate) -> Result<Snippet> {
        commands::update::run(&self.store, name, update)
    }

    pub fn delete_snippet(&self, name: &str) -> Result<Snippet> {
        commands::delete::run(&self.store, name)
    }

    pub fn list_snippets(&self) -> Result<Vec<Snippet>> {
        commands::list::run(&self.store)
    }

    pub fn search_snippets(&self, keyword: &str) -> Result<Vec<Snippet>> {
        commands::search::run(&self.store, keyword)
    }

    /// Candidates for interactive selection: everything, or the result of
    /// searching for `filter` when one is given.
    pub fn candidates(&self, filter: Option<&str>) -> Result<Vec<Snippet>> {
        match filter {
            Some(keyword) => self.search_snippets(keyword),
            None => self.list_snippets(),
        }
    }
}
