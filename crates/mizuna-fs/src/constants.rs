//! Well-known file and directory names.

use std::path::Path;

/// Standard Mizuna filesystem markers and paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPath {
    /// The sync root created in the invocation directory
    SyncRoot,
    /// The project manifest holding the tracked file list
    Manifest,
    /// The git database inside a clone
    GitDir,
    /// Directory name under the platform config dir for global defaults
    GlobalConfigDir,
    /// Global defaults file inside [`SyncPath::GlobalConfigDir`]
    GlobalConfigFile,
}

impl SyncPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SyncRoot => ".mizuna_sync",
            Self::Manifest => "mizuna.toml",
            Self::GitDir => ".git",
            Self::GlobalConfigDir => "mizuna",
            Self::GlobalConfigFile => "config.toml",
        }
    }
}

impl AsRef<Path> for SyncPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for SyncPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for SyncPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
