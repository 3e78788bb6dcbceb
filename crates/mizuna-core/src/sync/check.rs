//! Drift check between tracked files and their copies in the clone

use mizuna_fs::{NormalizedPath, checksum};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::config::settings::resolve;
use crate::registry::TrackRegistry;

/// State of one tracked file relative to its copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// Copy exists with identical contents
    Synced,
    /// Copy exists but differs from the source
    Modified,
    /// No copy in the clone yet
    NotSynced,
    /// The tracked source file is gone
    SourceMissing,
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Synced => "synced",
            Self::Modified => "modified",
            Self::NotSynced => "not synced",
            Self::SourceMissing => "source missing",
        })
    }
}

/// Check result for one tracked file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCheck {
    pub local: String,
    pub destination: String,
    pub status: FileStatus,
}

/// Report from a drift check, one entry per tracked file in registry order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    pub files: Vec<FileCheck>,
}

impl CheckReport {
    /// True when every tracked file is synced.
    pub fn is_clean(&self) -> bool {
        self.files.iter().all(|f| f.status == FileStatus::Synced)
    }

    pub fn count(&self, status: FileStatus) -> usize {
        self.files.iter().filter(|f| f.status == status).count()
    }
}

/// Compare every tracked file with `<clone_directory>/<destination>`.
///
/// Relative sources resolve against `invocation_directory`. Never touches
/// git, so it works before the first clone.
pub fn check(
    registry: &TrackRegistry,
    invocation_directory: &NormalizedPath,
    clone_directory: &NormalizedPath,
) -> Result<CheckReport> {
    let mut report = CheckReport::default();

    for file in registry.iter() {
        let source = resolve(invocation_directory, &NormalizedPath::new(&file.local));
        let copy = clone_directory.join(&file.destination);

        let status = if !source.is_file() {
            FileStatus::SourceMissing
        } else if !copy.is_file() {
            FileStatus::NotSynced
        } else if checksum::same_contents(&source.to_native(), &copy.to_native())? {
            FileStatus::Synced
        } else {
            FileStatus::Modified
        };

        tracing::debug!(local = %file.local, %status, "Checked tracked file");
        report.files.push(FileCheck {
            local: file.local.clone(),
            destination: file.destination.clone(),
            status,
        });
    }

    Ok(report)
}
