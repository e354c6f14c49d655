use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for folio-core
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for the folio portfolio
///
/// Everything here is raised while loading configuration or content.
/// Once a session is running there is no error path.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error for file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Portfolio content errors
    #[error("content error: {0}")]
    Content(#[from] ContentError),

    /// Conversation script errors
    #[error("script error: {0}")]
    Script(#[from] ScriptError),
}

/// Script-specific errors
///
/// A script entry must carry either non-empty text or a non-empty tag list.
/// These are authoring mistakes and are rejected when the script is built.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// Script has no entries
    #[error("script has no entries")]
    Empty,

    /// Text entry with nothing to show
    #[error("entry {index} has empty text")]
    EmptyText { index: usize },

    /// Skill bubble with no tags or a blank tag
    #[error("entry {index} is a skill bubble with missing or blank skill tags")]
    EmptySkillTags { index: usize },
}

/// Portfolio content errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// Two articles share an id
    #[error("duplicate article id: {0}")]
    DuplicateArticle(String),

    /// Article without a title
    #[error("article '{0}' has an empty title")]
    EmptyTitle(String),

    /// Article with both a body and an external URL
    #[error("article '{0}' has both a body and a url")]
    AmbiguousLink(String),

    /// Content file could not be found
    #[error("content file does not exist: {0}")]
    NotFound(PathBuf),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for ContentError {
    fn from(err: toml::de::Error) -> Self {
        ContentError::Toml(err.to_string())
    }
}
