use thiserror::Error;

/// Unified error type for pr-autotag operations
#[derive(Error, Debug)]
pub enum AutotagError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Repository host request failed: {0}")]
    Host(String),

    #[error("Missing workflow context: {0}")]
    MissingContext(String),

    #[error("Pull request #{0} is not merged; refusing to create a tag")]
    NotMerged(u64),

    #[error("Pull request #{0} has no merge commit reference")]
    MissingMergeCommit(u64),

    #[error("Invalid event payload: {0}")]
    Event(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in pr-autotag
pub type Result<T> = std::result::Result<T, AutotagError>;

impl AutotagError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        AutotagError::Config(msg.into())
    }

    /// Create a repository host error with context
    pub fn host(msg: impl Into<String>) -> Self {
        AutotagError::Host(msg.into())
    }

    /// Create a missing-context error
    pub fn missing_context(msg: impl Into<String>) -> Self {
        AutotagError::MissingContext(msg.into())
    }
}
