use crate::error::{Result, SniError};
use crate::model::Snippet;
use crate::store::SnippetStore;
use log::info;

pub fn run<S: SnippetStore>(
    store: &S,
    name: String,
    description: String,
    command: String,
    tags: Vec<String>,
) -> Result<Snippet> {
    if name.trim().is_empty() {
        return Err(SniError::InvalidInput(
            "snippet name cannot be empty".to_string(),
        ));
    }

    let snippet = store.transact(|file| {
        if file.snippets.contains_key(&name) {
            return Err(SniError::AlreadyExists(name.clone()));
        }
        let snippet = Snippet::new(name.clone(), description, command, tags);
        file.snippets.insert(name.clone(), snippet.clone());
        Ok(snippet)
    })?;

    info!("created snippet '{}'", snippet.name);
    Ok(snippet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::get;
    use crate::store::memory::MemoryStore;

    #[test]
    fn creates_with_equal_timestamps() {
        let store = MemoryStore::new();
        let created = run(
            &store,
            "deploy".into(),
            "deploy to prod".into(),
            "kubectl apply -f prod.yaml".into(),
            vec!["k8s".into(), "prod".into()],
        )
        .unwrap();

        let fetched = get::run(&store, "deploy").unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.created_at, fetched.updated_at);
        assert_eq!(fetched.tags, vec!["k8s", "prod"]);
    }

    #[test]
    fn duplicate_name_is_rejected_and_collection_unchanged() {
        let store = MemoryStore::new();
        run(&store, "ls".into(), "first".into(), "ls".into(), vec![]).unwrap();

        let err = run(&store, "ls".into(), "second".into(), "ls -la".into(), vec![]).unwrap_err();
        assert!(matches!(err, SniError::AlreadyExists(name) if name == "ls"));

        let kept = get::run(&store, "ls").unwrap();
        assert_eq!(kept.description, "first");
        assert_eq!(kept.command, "ls");
    }

    #[test]
    fn empty_name_is_invalid() {
        let store = MemoryStore::new();
        let err = run(&store, "  ".into(), String::new(), "ls".into(), vec![]).unwrap_err();
        assert!(matches!(err, SniError::InvalidInput(_)));
        assert!(store.load().unwrap().is_empty());
    }
}
