//! The `mizuna.toml` project manifest
//!
//! The manifest names the remote, optionally overrides sync settings, and
//! carries the user-maintained list of tracked files.

use mizuna_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::registry::{Registration, TrackBatch, TrackRegistry, TrackedFile};
use crate::{Error, Result};

/// `[remote]`: where the clone comes from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSection {
    /// Remote repository URL
    pub url: String,

    /// Clone directory name inside the sync root.
    /// Defaults to the last segment of the URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
}

/// `[sync]`: sync pass settings, each overriding the global default
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_message: Option<String>,

    /// Treat source and destination as distinct files without checking.
    /// Needed on networked drives where same-file detection misfires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assume_distinct_paths: Option<bool>,
}

impl SyncSection {
    /// Overlay `other` onto this section; values set in `other` win.
    pub fn merge(&mut self, other: &SyncSection) {
        if other.root.is_some() {
            self.root.clone_from(&other.root);
        }
        if other.commit_message.is_some() {
            self.commit_message.clone_from(&other.commit_message);
        }
        if other.assume_distinct_paths.is_some() {
            self.assume_distinct_paths = other.assume_distinct_paths;
        }
    }
}

/// `[git]`: how the git executable is found
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
}

impl GitSection {
    pub fn merge(&mut self, other: &GitSection) {
        if other.program.is_some() {
            self.program.clone_from(&other.program);
        }
    }
}

/// One `[[files]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub local: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

/// Project manifest parsed from `mizuna.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub remote: RemoteSection,

    #[serde(default)]
    pub sync: SyncSection,

    #[serde(default)]
    pub git: GitSection,

    #[serde(default)]
    pub files: Vec<FileEntry>,
}

impl Manifest {
    /// A manifest for `url` with no tracked files.
    pub fn new(url: impl Into<String>, directory: Option<String>) -> Self {
        Self {
            remote: RemoteSection {
                url: url.into(),
                directory,
            },
            ..Self::default()
        }
    }

    /// Parse a manifest from TOML content
    ///
    /// # Example
    ///
    /// ```
    /// use mizuna_core::config::Manifest;
    ///
    /// let manifest = Manifest::parse(r#"
    /// [remote]
    /// url = "https://git.overleaf.com/abc123"
    ///
    /// [[files]]
    /// local = "figures/fig1.pdf"
    /// "#).unwrap();
    ///
    /// assert_eq!(manifest.directory(), "abc123");
    /// assert_eq!(manifest.files.len(), 1);
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Manifest = toml::from_str(content)?;
        Ok(manifest)
    }

    /// Load a manifest in any format [`ConfigStore`] understands.
    ///
    /// # Errors
    ///
    /// [`Error::ManifestNotFound`] if `path` is not a file.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ManifestNotFound {
                path: path.to_native(),
            });
        }
        let manifest = ConfigStore::new().load(path)?;
        tracing::debug!(path = %path, "Loaded manifest");
        Ok(manifest)
    }

    /// Write the manifest atomically.
    pub fn save(&self, path: &NormalizedPath) -> Result<()> {
        ConfigStore::new().save(path, self)?;
        tracing::debug!(path = %path, files = self.files.len(), "Saved manifest");
        Ok(())
    }

    /// The clone directory name: the configured one, or one derived from the URL.
    pub fn directory(&self) -> String {
        self.remote
            .directory
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| Self::default_directory_for(&self.remote.url))
    }

    /// Derive a directory name from a remote URL:
    /// `https://git.overleaf.com/abc123` gives `abc123`,
    /// `git@host:team/paper.git` gives `paper`.
    pub fn default_directory_for(url: &str) -> String {
        let trimmed = url.trim().trim_end_matches('/');
        let last = trimmed
            .rsplit(['/', ':', '\\'])
            .next()
            .unwrap_or(trimmed);
        let name = last.strip_suffix(".git").unwrap_or(last);
        if name.is_empty() {
            "repository".to_string()
        } else {
            name.to_string()
        }
    }

    /// Track `local`, validated through the same rules as the registry.
    ///
    /// An already-listed path has its destination replaced in place, so the
    /// file list keeps its order.
    pub fn track(&mut self, local: &str, destination: Option<&str>) -> Result<Registration> {
        let file = TrackedFile::new(local, destination)?;
        let explicit = (file.destination != file.local).then(|| file.destination.clone());

        let existing = self
            .files
            .iter_mut()
            .find(|entry| NormalizedPath::new(&entry.local).as_str() == file.local);

        match existing {
            Some(entry) => {
                let previous = entry
                    .destination
                    .clone()
                    .unwrap_or_else(|| file.local.clone());
                entry.destination = explicit;
                tracing::warn!(
                    local = %file.local,
                    previous = %previous,
                    destination = %file.destination,
                    "File already tracked; destination updated"
                );
                Ok(Registration::Updated { previous })
            }
            None => {
                self.files.push(FileEntry {
                    local: file.local,
                    destination: explicit,
                });
                Ok(Registration::Inserted)
            }
        }
    }

    /// Remove `local` from the file list.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if `local` is not listed.
    pub fn untrack(&mut self, local: &str) -> Result<FileEntry> {
        let key = NormalizedPath::new(local);
        let index = self
            .files
            .iter()
            .position(|entry| NormalizedPath::new(&entry.local) == key)
            .ok_or_else(|| Error::KeyNotFound {
                path: local.to_string(),
            })?;
        Ok(self.files.remove(index))
    }

    /// Empty the file list, returning how many entries were removed.
    pub fn untrack_all(&mut self) -> usize {
        let removed = self.files.len();
        self.files.clear();
        removed
    }

    /// The file list as a [`TrackBatch`].
    pub fn batch(&self) -> TrackBatch {
        let mut batch = TrackBatch::default();
        for entry in &self.files {
            batch.push(entry.local.clone(), entry.destination.clone());
        }
        batch
    }

    /// A fresh registry holding every listed file.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] if any entry was hand-edited into an invalid state.
    pub fn registry(&self) -> Result<TrackRegistry> {
        let mut registry = TrackRegistry::new();
        if !self.files.is_empty() {
            registry.register_batch(self.batch())?;
        }
        Ok(registry)
    }
}
