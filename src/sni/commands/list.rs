use crate::error::Result;
use crate::model::Snippet;
use crate::store::SnippetStore;

/// All snippets, sorted by name.
pub fn run<S: SnippetStore>(store: &S) -> Result<Vec<Snippet>> {
    Ok(store.load()?.to_vec())
}
