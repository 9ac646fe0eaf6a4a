use thiserror::Error;

/// Failures reported by a [`DataSource`](crate::io::DataSource).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The backend could not be reached (IPC or network failure)
    #[error("data source unavailable: {0}")]
    Unavailable(String),
    /// Requested folder or item does not exist
    #[error("not found: {0}")]
    NotFound(String),
    /// Backend returned an error of its own
    #[error("backend error: {0}")]
    Backend(String),
}

impl SourceError {
    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            SourceError::Unavailable(_) => "Could not reach the library. Please retry.".to_string(),
            SourceError::NotFound(_) => "This folder no longer exists.".to_string(),
            SourceError::Backend(msg) => format!("Failed to load items: {}", msg),
        }
    }
}

/// Errors from loading or saving [`Preferences`](crate::config::Preferences).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse preferences: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("could not determine config directory")]
    NoConfigDir,
}

pub type SourceResult<T> = Result<T, SourceError>;
