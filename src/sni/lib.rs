//! # sni Architecture
//!
//! sni is a personal snippet manager: named, reusable command/text fragments
//! kept in one YAML file, reachable from a CLI and from a local JSON API.
//!
//! Like any UI-agnostic core, the library never prints and never exits. The
//! binary (`main.rs` + `cli/`) and the HTTP server are two clients of the
//! same facade.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Clients: CLI (cli/, binary only)   HTTP (server.rs)        │
//! │  - terminal I/O, prompts, colors    - routing, JSON bodies  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - create / get / update / delete / list / search           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - SnippetStore trait                                       │
//! │  - FileStore (production), MemoryStore (testing)            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Beside the layers sit the invocation helpers used once a snippet has been
//! chosen: [`selector`] (fzf or a numbered menu), [`clipboard`] and [`shell`].
//!
//! ## Testing Strategy
//!
//! 1. **Commands**: business rules, against `MemoryStore`.
//! 2. **Store**: persistence and locking, against temp directories.
//! 3. **Server**: the pure `route` function plus one socket round trip.
//! 4. **CLI**: end-to-end with `assert_cmd` in `tests/`.
//!
//! ## Module Overview
//!
//! - [`api`]: `SniApi<S>`, the entry point for every client
//! - [`commands`]: business logic
//! - [`config`]: storage directory resolution
//! - [`error`]: `SniError` and the crate `Result`
//! - [`model`]: `Snippet`, `SnippetsFile`, `SnippetUpdate`
//! - [`store`]: persistence
//! - [`selector`], [`clipboard`], [`shell`]: selection and invocation
//! - [`server`]: HTTP/JSON surface

pub mod api;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod selector;
pub mod server;
pub mod shell;
pub mod store;
