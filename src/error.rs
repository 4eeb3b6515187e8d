use thiserror::Error;

/// Unified error type for auto-semver operations
#[derive(Error, Debug)]
pub enum AutoSemverError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Repository operation failed: {0}")]
    Repository(String),

    #[error("Tag not found: {name}")]
    TagNotFound { name: String },

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<git2::Error> for AutoSemverError {
    fn from(err: git2::Error) -> Self {
        AutoSemverError::Repository(err.message().to_string())
    }
}

/// Convenience type alias for Results in auto-semver
pub type Result<T> = std::result::Result<T, AutoSemverError>;

impl AutoSemverError {
    /// Create a configuration error with context
    pub fn configuration(msg: impl Into<String>) -> Self {
        AutoSemverError::Configuration(msg.into())
    }

    /// Create a repository error with context
    pub fn repository(msg: impl Into<String>) -> Self {
        AutoSemverError::Repository(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        AutoSemverError::Version(msg.into())
    }

    pub fn tag_not_found(name: impl Into<String>) -> Self {
        AutoSemverError::TagNotFound { name: name.into() }
    }

    /// True for the one failure the tag protector tolerates.
    pub fn is_tag_not_found(&self) -> bool {
        matches!(self, AutoSemverError::TagNotFound { .. })
    }
}
