use crate::error::Result;
use crate::model::Snippet;
use crate::store::SnippetStore;
use log::debug;

/// Case-insensitive substring search over name, description, command and tags.
/// An empty keyword matches everything.
pub fn run<S: SnippetStore>(store: &S, keyword: &str) -> Result<Vec<Snippet>> {
    let needle = keyword.to_lowercase();
    let matches: Vec<Snippet> = store
        .load()?
        .to_vec()
        .into_iter()
        .filter(|snippet| snippet.matches(&needle))
        .collect();

    debug!("search '{}' matched {} snippets", keyword, matches.len());
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::list;
    use crate::store::memory::fixtures::StoreFixture;

    fn fixture() -> StoreFixture {
        StoreFixture::new()
            .with_snippet("deploy", "Deploy to PROD", "kubectl apply", &["k8s"])
            .with_snippet("logs", "tail logs", "journalctl -f", &["Ops"])
            .with_snippet("build", "", "cargo build --release", &[])
    }

    #[test]
    fn empty_keyword_equals_list() {
        let fixture = fixture();
        assert_eq!(
            run(&fixture.store, "").unwrap(),
            list::run(&fixture.store).unwrap()
        );
    }

    #[test]
    fn matches_each_field_ignoring_case() {
        let fixture = fixture();
        let names = |kw: &str| -> Vec<String> {
            run(&fixture.store, kw)
                .unwrap()
                .into_iter()
                .map(|s| s.name)
                .collect()
        };

        assert_eq!(names("DEPLOY"), vec!["deploy"]);
        assert_eq!(names("prod"), vec!["deploy"]);
        assert_eq!(names("RELEASE"), vec!["build"]);
        assert_eq!(names("ops"), vec!["logs"]);
        assert!(names("docker").is_empty());
    }
}
