//! Merge of global defaults and the project manifest

use std::path::PathBuf;

use mizuna_fs::{ConfigStore, NormalizedPath, SyncPath};
use serde::{Deserialize, Serialize};

use super::manifest::{GitSection, Manifest, SyncSection};
use super::settings::SyncConfig;
use crate::Result;

/// User-wide defaults from `<config_dir>/mizuna/config.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub sync: SyncSection,

    #[serde(default)]
    pub git: GitSection,
}

/// Resolves the effective [`SyncConfig`] for a manifest
///
/// Layers, later overriding earlier:
/// 1. Built-in defaults
/// 2. Global config (`<config_dir>/mizuna/config.toml`), skipped when absent
/// 3. The project manifest
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    /// Override for the global config directory (used for testing).
    /// When `None`, `dirs::config_dir()` is used.
    global_config_dir_override: Option<PathBuf>,
}

impl ConfigResolver {
    /// Create a resolver using the platform config directory:
    /// - Linux: `~/.config/mizuna/`
    /// - macOS: `~/Library/Application Support/mizuna/`
    /// - Windows: `%APPDATA%\mizuna\`
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver reading global defaults from `global_config_dir`.
    pub fn with_global_config_dir(global_config_dir: PathBuf) -> Self {
        Self {
            global_config_dir_override: Some(global_config_dir),
        }
    }

    fn global_config_dir(&self) -> Option<PathBuf> {
        if let Some(ref override_dir) = self.global_config_dir_override {
            return Some(override_dir.clone());
        }
        dirs::config_dir().map(|d| d.join(SyncPath::GlobalConfigDir))
    }

    /// Load the global config, or defaults when there is none.
    pub fn load_global(&self) -> Result<GlobalConfig> {
        let Some(global_dir) = self.global_config_dir() else {
            return Ok(GlobalConfig::default());
        };

        let path = NormalizedPath::new(global_dir.join(SyncPath::GlobalConfigFile));
        if !path.is_file() {
            tracing::debug!(path = %path, "No global config found; skipping");
            return Ok(GlobalConfig::default());
        }

        tracing::debug!(path = %path, "Loading global config");
        Ok(ConfigStore::new().load(&path)?)
    }

    /// Merge global defaults with `manifest`.
    pub fn resolve(&self, manifest: &Manifest) -> Result<SyncConfig> {
        let global = self.load_global()?;

        let mut sync = global.sync;
        sync.merge(&manifest.sync);
        let mut git = global.git;
        git.merge(&manifest.git);

        let mut config = SyncConfig::new(manifest.remote.url.clone(), manifest.directory());
        if let Some(root) = sync.root {
            config.sync_root = root;
        }
        if let Some(message) = sync.commit_message {
            config.commit_message = message;
        }
        if let Some(assume_distinct) = sync.assume_distinct_paths {
            config.assume_distinct_paths = assume_distinct;
        }
        if let Some(program) = git.program {
            config.git_program = program;
        }

        tracing::debug!(?config, "Resolved sync config");
        Ok(config)
    }
}
