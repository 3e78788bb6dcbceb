//! Error types for mizuna-core

use std::path::PathBuf;

/// Result type for mizuna-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mizuna-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Bad input to a tracking call
    #[error("Invalid tracking input: {message}")]
    Validation { message: String },

    /// Untrack of a path that is not tracked
    #[error("'{path}' is not tracked")]
    KeyNotFound { path: String },

    /// No manifest at the expected location
    #[error("Manifest not found at {path}. Run `mizuna init` first.")]
    ManifestNotFound { path: PathBuf },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from mizuna-fs
    #[error(transparent)]
    Fs(#[from] mizuna_fs::Error),

    /// Git error from mizuna-git
    #[error(transparent)]
    Git(#[from] mizuna_git::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}

impl Error {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
