use crate::error::{Result, SniError};
use crate::model::{Snippet, SnippetUpdate};
use crate::store::SnippetStore;
use log::info;

pub fn run<S: SnippetStore>(store: &S, name: &str, update: SnippetUpdate) -> Result<Snippet> {
    let snippet = store.transact(|file| {
        let snippet = file
            .snippets
            .get_mut(name)
            .ok_or_else(|| SniError::NotFound(name.to_string()))?;
        snippet.apply(update);
        snippet.name = name.to_string();
        Ok(snippet.clone())
    })?;

    info!("updated snippet '{}'", name);
    Ok(snippet)
}
