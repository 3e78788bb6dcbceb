//! Result types for a sync pass

use mizuna_git::GitOutput;
use serde::{Deserialize, Serialize};

/// How a sync pass ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    /// Files were copied, committed and pushed
    Completed,
    /// The registry was empty; only the pull ran
    NothingToSync,
    /// Copies were planned but nothing was touched
    DryRun,
}

/// One file copied (or, in a dry run, to be copied) into the clone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopiedFile {
    /// Tracked path, as registered
    pub local: String,
    /// Path inside the clone
    pub destination: String,
    /// Size of the source file
    pub bytes: u64,
}

/// Report from a sync pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncOutcome {
    pub status: SyncStatus,
    /// First nonzero exit code among commit and push, else 0
    pub code: i32,
    /// Commit stdout followed by push stdout
    pub stdout: String,
    /// Commit stderr followed by push stderr
    pub stderr: String,
    /// Files copied, in copy order
    pub copied: Vec<CopiedFile>,
}

impl SyncOutcome {
    /// The engine only gets here after commit and push both exited 0, so a
    /// sync pass always reports code 0; a failing step is an `Err` instead.
    pub(crate) fn completed(copied: Vec<CopiedFile>, commit: &GitOutput, push: &GitOutput) -> Self {
        let code = [commit.code, push.code]
            .into_iter()
            .find(|&code| code != 0)
            .unwrap_or(0);
        Self {
            status: SyncStatus::Completed,
            code,
            stdout: format!("{}{}", commit.stdout, push.stdout),
            stderr: format!("{}{}", commit.stderr, push.stderr),
            copied,
        }
    }

    pub(crate) fn nothing_to_sync() -> Self {
        Self {
            status: SyncStatus::NothingToSync,
            code: 0,
            stdout: String::new(),
            stderr: String::new(),
            copied: Vec::new(),
        }
    }

    /// Report for a planned pass that touched nothing.
    pub fn dry_run(planned: Vec<CopiedFile>) -> Self {
        Self {
            status: SyncStatus::DryRun,
            copied: planned,
            ..Self::nothing_to_sync()
        }
    }

    pub fn success(&self) -> bool {
        self.code == 0
    }
}
