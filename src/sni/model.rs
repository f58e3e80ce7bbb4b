use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    // The map key is authoritative; this copy is only kept for readability of the file.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

impl Snippet {
    pub fn new(name: String, description: String, command: String, tags: Vec<String>) -> Self {
        let now = Utc::now();
        Self {
            name,
            description,
            tags,
            command,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a partial update. Empty strings keep the current value; tags
    /// are replaced whenever they are supplied, even with an empty list.
    pub fn apply(&mut self, update: SnippetUpdate) {
        if let Some(description) = update.description.filter(|d| !d.is_empty()) {
            self.description = description;
        }
        if let Some(command) = update.command.filter(|c| !c.is_empty()) {
            self.command = command;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        self.updated_at = Utc::now();
    }

    /// Case-insensitive substring match over name, description, command and tags.
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.command.to_lowercase().contains(needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle))
    }
}

/// Replacement values for [`Snippet::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SnippetUpdate {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl SnippetUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }
}

/// The whole collection as persisted on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetsFile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub snippets: BTreeMap<String, Snippet>,
}

impl SnippetsFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a snippet, returning a copy whose name matches its key.
    pub fn get(&self, name: &str) -> Option<Snippet> {
        self.snippets.get(name).map(|snippet| keyed(name, snippet))
    }

    /// All snippets, each with its name set from the map key.
    pub fn to_vec(&self) -> Vec<Snippet> {
        self.snippets
            .iter()
            .map(|(name, snippet)| keyed(name, snippet))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }
}

// `snippets:` or `tags:` with nothing after them parse as null.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn keyed(name: &str, snippet: &Snippet) -> Snippet {
    let mut snippet = snippet.clone();
    snippet.name = name.to_string();
    snippet
}

/// Splits comma separated tag input, trimming each tag and dropping blanks.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Snippet {
        Snippet::new(
            "deploy".into(),
            "deploy to prod".into(),
            "kubectl apply -f prod.yaml".into(),
            vec!["k8s".into(), "prod".into()],
        )
    }

    #[test]
    fn new_snippet_has_equal_timestamps() {
        let snippet = sample();
        assert_eq!(snippet.created_at, snippet.updated_at);
    }

    #[test]
    fn apply_keeps_fields_on_empty_input() {
        let mut snippet = sample();
        let created = snippet.created_at;
        snippet.apply(SnippetUpdate::new().description("").command(""));

        assert_eq!(snippet.description, "deploy to prod");
        assert_eq!(snippet.command, "kubectl apply -f prod.yaml");
        assert_eq!(snippet.tags, vec!["k8s", "prod"]);
        assert_eq!(snippet.created_at, created);
        assert!(snippet.updated_at >= created);
    }

    #[test]
    fn apply_honors_explicit_empty_tags() {
        let mut snippet = sample();
        snippet.apply(SnippetUpdate::new().tags(vec![]));
        assert!(snippet.tags.is_empty());
    }

    #[test]
    fn matches_any_field_ignoring_case() {
        let snippet = sample();
        assert!(snippet.matches("deploy"));
        assert!(snippet.matches("kubectl"));
        assert!(snippet.matches("k8s"));
        assert!(snippet.matches(&"PROD".to_lowercase()));
        assert!(snippet.matches(""));
        assert!(!snippet.matches("docker"));
    }

    #[test]
    fn file_get_forces_key_as_name() {
        let mut file = SnippetsFile::new();
        let mut snippet = sample();
        snippet.name = "something-else".into();
        file.snippets.insert("deploy".into(), snippet);

        assert_eq!(file.get("deploy").unwrap().name, "deploy");
        assert_eq!(file.to_vec()[0].name, "deploy");
        assert!(file.get("missing").is_none());
    }

    #[test]
    fn parse_tags_trims_and_drops_blanks() {
        assert_eq!(parse_tags(" git , ops,, "), vec!["git", "ops"]);
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let yaml = "snippets:\n  hello:\n    command: echo hi\n";
        let file: SnippetsFile = serde_yaml::from_str(yaml).unwrap();
        let snippet = file.get("hello").unwrap();
        assert_eq!(snippet.command, "echo hi");
        assert!(snippet.tags.is_empty());
        assert_eq!(snippet.description, "");
    }

    #[test]
    fn null_collections_parse_as_empty() {
        let file: SnippetsFile = serde_yaml::from_str("snippets:\n").unwrap();
        assert!(file.is_empty());

        let yaml = "snippets:\n  a:\n    tags:\n    command: ls\n";
        let file: SnippetsFile = serde_yaml::from_str(yaml).unwrap();
        assert!(file.get("a").unwrap().tags.is_empty());
    }
}
