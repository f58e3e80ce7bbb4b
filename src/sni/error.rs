use thiserror::Error;

#[derive(Error, Debug)]
pub enum SniError {
    #[error("snippet '{0}' not found")]
    NotFound(String),

    #[error("snippet '{0}' already exists")]
    AlreadyExists(String),

    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    #[error("no snippets available")]
    NoCandidates,

    #[error("{0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse snippets file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An external helper (clipboard utility, fuzzy finder) is missing or failed to start.
    #[error("{0}")]
    ToolUnavailable(String),

    #[error("Server error: {0}")]
    Server(String),
}

pub type Result<T> = std::result::Result<T, SniError>;
