//! All error types for the localesync crate.
//!
//! These are returned from all fallible operations (loading trees, resolving
//! translation routes, talking to the translation service, etc.).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid translation way `{0}`, expected `source-target`")]
    InvalidTranslationWay(String),

    #[error("invalid tree: {0}")]
    InvalidTree(String),

    #[error("no translation path from `{from}` to `{to}`")]
    NoTranslationPath { from: String, to: String },

    #[error("translation service does not support `{from}` -> `{to}`")]
    UnsupportedPair { from: String, to: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("translation service kept failing after {attempts} attempts")]
    ServiceInternal { attempts: u32 },

    #[error("malformed service response: {0}")]
    MalformedResponse(String),

    #[error("batch length mismatch: expected {expected} translations, got {actual}")]
    BatchLengthMismatch { expected: usize, actual: usize },

    #[error("main language `{0}` has no tree")]
    MissingMainLanguage(String),

    #[error("validation error: {0}")]
    Validation(String),
}

impl Error {
    /// Creates a new transport error from anything printable.
    pub fn transport(message: impl Into<String>) -> Self {
        Error::Transport(message.into())
    }

    /// Creates a new validation error
    pub fn validation_error(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    pub(crate) fn no_path(from: &str, to: &str) -> Self {
        Error::NoTranslationPath {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Whether this error came from the network layer and the whole call may be retried.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}
