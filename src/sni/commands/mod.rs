//! Business logic over a [`SnippetStore`](crate::store::SnippetStore).
//!
//! Each submodule exposes a single `run` function. Commands return plain
//! values; they never print.

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod search;
pub mod update;
