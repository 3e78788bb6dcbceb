//! Error types for mizuna-git

use std::path::PathBuf;

use crate::bridge::BridgeState;
use crate::runner::GitOutput;

/// Result type for mizuna-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mizuna-git operations
///
/// The step errors carry the full [`GitOutput`] of the failed command so
/// callers can show git's own diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to clone {url}: {output}")]
    Clone { url: String, output: GitOutput },

    #[error("Failed to pull from remote: {output}")]
    Pull { output: GitOutput },

    #[error("Failed to stage '{path}': {output}")]
    Stage { path: String, output: GitOutput },

    #[error("Failed to commit: {output}")]
    Commit { output: GitOutput },

    #[error("Failed to push to remote: {output}")]
    Push { output: GitOutput },

    #[error("Could not run '{program}': {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Repository already cloned at {path}")]
    AlreadyCloned { path: PathBuf },

    #[error("Repository bridge is not ready (state: {state})")]
    NotReady { state: BridgeState },

    #[error("Repository bridge was already initialized (state: {state})")]
    AlreadyInitialized { state: BridgeState },
}

impl Error {
    /// The git output attached to a failed step, if any.
    pub fn output(&self) -> Option<&GitOutput> {
        match self {
            Self::Clone { output, .. }
            | Self::Pull { output }
            | Self::Stage { output, .. }
            | Self::Commit { output }
            | Self::Push { output } => Some(output),
            _ => None,
        }
    }
}
