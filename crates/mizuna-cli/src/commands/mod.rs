//! Command implementations for mizuna-cli

pub mod init;
pub mod list;
pub mod status;
pub mod sync;
pub mod track;

use std::path::Path;

use mizuna_core::Manifest;
use mizuna_fs::NormalizedPath;

pub use init::run_init;
pub use list::run_list;
pub use status::run_status;
pub use sync::run_sync;
pub use track::{run_track, run_untrack};

/// Where the manifest lives and which directory tracked paths are relative to.
#[derive(Debug, Clone)]
pub struct Project {
    /// The manifest file
    pub manifest_path: NormalizedPath,
    /// Directory containing the manifest; the invocation directory for git
    pub root: NormalizedPath,
}

impl Project {
    /// Resolve `manifest` (possibly relative) against `cwd`.
    pub fn locate(cwd: &Path, manifest: &Path) -> Self {
        let manifest_path = if manifest.is_absolute() {
            NormalizedPath::new(manifest)
        } else {
            NormalizedPath::new(cwd.join(manifest))
        };
        let root = manifest_path
            .parent()
            .unwrap_or_else(|| NormalizedPath::new(cwd));
        Self {
            manifest_path,
            root,
        }
    }

    pub fn load_manifest(&self) -> mizuna_core::Result<Manifest> {
        Manifest::load(&self.manifest_path)
    }
}
