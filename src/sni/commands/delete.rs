use crate::error::{Result, SniError};
use crate::model::Snippet;
use crate::store::SnippetStore;
use log::info;

/// Removes the snippet and returns what was removed.
pub fn run<S: SnippetStore>(store: &S, name: &str) -> Result<Snippet> {
    let mut removed = store.transact(|file| {
        file.snippets
            .remove(name)
            .ok_or_else(|| SniError::NotFound(name.to_string()))
    })?;
    removed.name = name.to_string();

    info!("deleted snippet '{}'", name);
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::get;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn delete_then_get_is_not_found() {
        let fixture = StoreFixture::new()
            .with_snippet("ls", "", "ls -la", &[])
            .with_snippet("pwd", "", "pwd", &[]);

        let removed = run(&fixture.store, "ls").unwrap();
        assert_eq!(removed.command, "ls -la");
        assert!(matches!(
            get::run(&fixture.store, "ls"),
            Err(SniError::NotFound(_))
        ));
        assert!(get::run(&fixture.store, "pwd").is_ok());
    }

    #[test]
    fn second_delete_is_not_found() {
        let fixture = StoreFixture::new().with_snippet("ls", "", "ls -la", &[]);
        run(&fixture.store, "ls").unwrap();
        assert!(matches!(
            run(&fixture.store, "ls"),
            Err(SniError::NotFound(_))
        ));
    }
}
