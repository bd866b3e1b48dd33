//! Error types
//!
//! Every fallible operation in the crate returns [`Result`]. Failures are
//! local and synchronous: nothing is retried and nothing is replaced by a
//! default value.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the titration model, the session and the I/O helpers
#[derive(Debug, Error)]
pub enum TitrationError {
    /// Malformed scenario or session configuration
    ///
    /// Raised when a weak acid has no pKa, when a concentration or volume
    /// is not strictly positive, or when session limits are inconsistent.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Invalid argument passed to a session operation
    #[error("argument error: {0}")]
    Argument(String),

    /// Reading or writing a file failed
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for the expected schema
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Series cannot be exported (empty or NaN data)
    #[error("export error: {0}")]
    Export(String),

    /// Background driver failed (poisoned session lock, aborted task)
    #[error("runtime error: {0}")]
    Runtime(String),
}

impl TitrationError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub(crate) fn argument(message: impl Into<String>) -> Self {
        Self::Argument(message.into())
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for [`TitrationError::Configuration`]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// True for [`TitrationError::Argument`]
    pub fn is_argument(&self) -> bool {
        matches!(self, Self::Argument(_))
    }
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, TitrationError>;
