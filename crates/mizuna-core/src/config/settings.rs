//! Effective settings for one sync session

use mizuna_fs::{NormalizedPath, SyncPath};
use serde::{Deserialize, Serialize};

/// Commit message used when none is configured
pub const DEFAULT_COMMIT_MESSAGE: &str = "Update from Mizuna";

/// Everything a [`Synchronizer`](crate::Synchronizer) needs to know, after
/// merging the global config into the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Remote repository URL passed to `git clone`
    pub remote_url: String,
    /// Name of the clone directory inside the sync root
    pub directory: String,
    /// Sync root, relative to the invocation directory unless absolute
    pub sync_root: String,
    /// Message for the single commit of each sync pass
    pub commit_message: String,
    /// Skip same-file detection in the copy routine (networked drives)
    pub assume_distinct_paths: bool,
    /// git executable to run
    pub git_program: String,
}

impl SyncConfig {
    /// Settings with every optional value at its default.
    pub fn new(remote_url: impl Into<String>, directory: impl Into<String>) -> Self {
        Self {
            remote_url: remote_url.into(),
            directory: directory.into(),
            sync_root: SyncPath::SyncRoot.as_str().to_string(),
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            assume_distinct_paths: false,
            git_program: "git".to_string(),
        }
    }

    pub fn with_sync_root(mut self, sync_root: impl Into<String>) -> Self {
        self.sync_root = sync_root.into();
        self
    }

    pub fn with_commit_message(mut self, message: impl Into<String>) -> Self {
        self.commit_message = message.into();
        self
    }

    pub fn with_assume_distinct_paths(mut self, assume_distinct: bool) -> Self {
        self.assume_distinct_paths = assume_distinct;
        self
    }

    pub fn with_git_program(mut self, program: impl Into<String>) -> Self {
        self.git_program = program.into();
        self
    }

    /// The clone directory as handed to `git clone`: `<sync_root>/<directory>`.
    ///
    /// Stays relative when the sync root is relative.
    pub fn local_directory(&self) -> NormalizedPath {
        NormalizedPath::new(&self.sync_root).join(&self.directory)
    }

    /// The sync root resolved against `invocation`.
    pub fn sync_root_path(&self, invocation: &NormalizedPath) -> NormalizedPath {
        resolve(invocation, &NormalizedPath::new(&self.sync_root))
    }

    /// The clone directory resolved against `invocation`.
    pub fn clone_path(&self, invocation: &NormalizedPath) -> NormalizedPath {
        resolve(invocation, &self.local_directory())
    }
}

pub(crate) fn resolve(base: &NormalizedPath, path: &NormalizedPath) -> NormalizedPath {
    if path.is_absolute() {
        path.clone()
    } else {
        base.join(path.as_str())
    }
}
