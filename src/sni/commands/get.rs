use crate::error::{Result, SniError};
use crate::model::Snippet;
use crate::store::SnippetStore;

pub fn run<S: SnippetStore>(store: &S, name: &str) -> Result<Snippet> {
    store
        .load()?
        .get(name)
        .ok_or_else(|| SniError::NotFound(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn unknown_name_is_not_found() {
        let fixture = StoreFixture::new().with_snippet("ls", "", "ls -la", &[]);
        let err = run(&fixture.store, "cat").unwrap_err();
        assert!(matches!(err, SniError::NotFound(name) if name == "cat"));
    }

    #[test]
    fn returns_record_named_after_key() {
        let fixture = StoreFixture::new().with_snippet("ls", "list", "ls -la", &["fs"]);
        let snippet = run(&fixture.store, "ls").unwrap();
        assert_eq!(snippet.name, "ls");
        assert_eq!(snippet.command, "ls -la");
    }
}
