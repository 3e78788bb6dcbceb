//! In-memory registry of tracked files
//!
//! The registry maps each local path to the destination it is copied to
//! inside the clone. It lives only as long as its owner: the persisted
//! file list is the manifest, which is replayed into a fresh registry on
//! every run.

use std::collections::BTreeMap;

use mizuna_fs::{NormalizedPath, SyncPath};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A local file and where it lands inside the clone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedFile {
    /// Path of the source file, relative to the invocation directory or absolute
    pub local: String,
    /// Path inside the clone, always relative
    pub destination: String,
}

impl TrackedFile {
    /// Validate and normalize a (local, destination) pair.
    ///
    /// A missing or empty destination means "same as local". Both paths are
    /// normalized to forward slashes.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] if `local` is empty, or if the destination is
    /// absolute, climbs out of the clone with `..`, names the clone root
    /// itself, or lands inside the clone's `.git` directory.
    pub fn new(local: &str, destination: Option<&str>) -> Result<Self> {
        if local.trim().is_empty() {
            return Err(Error::validation("local path must not be empty"));
        }
        let local = NormalizedPath::new(local);

        let destination = match destination.filter(|d| !d.is_empty()) {
            Some(dest) => NormalizedPath::new(dest),
            None => local.clone(),
        };
        if destination.is_absolute() {
            return Err(Error::validation(format!(
                "destination '{destination}' must be relative to the sync directory"
            )));
        }
        if destination.has_parent_traversal() {
            return Err(Error::validation(format!(
                "destination '{destination}' must not leave the sync directory"
            )));
        }
        if destination.as_str() == "." || destination.as_str().trim_matches('/').is_empty() {
            return Err(Error::validation(format!(
                "destination '{destination}' must name a file inside the sync directory"
            )));
        }
        let first = destination.as_str().split('/').next().unwrap_or_default();
        if first.eq_ignore_ascii_case(SyncPath::GitDir.as_str()) {
            return Err(Error::validation(format!(
                "destination '{destination}' must not point into the clone's git directory"
            )));
        }

        Ok(Self {
            local: local.as_str().to_string(),
            destination: destination.as_str().to_string(),
        })
    }
}

/// What [`TrackRegistry::register`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// The path was not tracked before
    Inserted,
    /// The path was already tracked; its destination was replaced
    Updated { previous: String },
}

/// A batch of paths to track, applied all-or-nothing.
///
/// Build one from plain paths (destination = local), explicit pairs, or a
/// local→destination map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackBatch {
    entries: Vec<(String, Option<String>)>,
}

impl TrackBatch {
    /// Each path is tracked under its own name.
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: paths.into_iter().map(|p| (p.into(), None)).collect(),
        }
    }

    /// Explicit (local, destination) pairs.
    pub fn from_pairs<I, L, D>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (L, D)>,
        L: Into<String>,
        D: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(l, d)| (l.into(), Some(d.into())))
                .collect(),
        }
    }

    /// A local→destination map. Iteration order of the map is kept.
    pub fn from_map<M, L, D>(map: M) -> Self
    where
        M: IntoIterator<Item = (L, D)>,
        L: Into<String>,
        D: Into<String>,
    {
        Self::from_pairs(map)
    }

    /// Add one entry; `None` tracks the path under its own name.
    pub fn push(&mut self, local: impl Into<String>, destination: Option<String>) {
        self.entries.push((local.into(), destination));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Tracked files keyed by local path, iterated in path order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackRegistry {
    entries: BTreeMap<String, TrackedFile>,
}

impl TrackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track `local`, copying it to `destination` (or to `local` when `None`
    /// or empty).
    ///
    /// Re-registering a tracked path overwrites its destination and logs a
    /// warning; it is never an error.
    pub fn register(&mut self, local: &str, destination: Option<&str>) -> Result<Registration> {
        let file = TrackedFile::new(local, destination)?;
        Ok(self.insert(file))
    }

    /// Track every entry of `batch`.
    ///
    /// All entries are validated before any is applied, so a failing batch
    /// leaves the registry untouched. Returns the number of entries applied.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] if the batch is empty or any entry is invalid.
    pub fn register_batch(&mut self, batch: TrackBatch) -> Result<usize> {
        if batch.is_empty() {
            return Err(Error::validation("batch must contain at least one path"));
        }

        let files = batch
            .entries
            .iter()
            .map(|(local, dest)| TrackedFile::new(local, dest.as_deref()))
            .collect::<Result<Vec<_>>>()?;

        let applied = files.len();
        for file in files {
            self.insert(file);
        }
        Ok(applied)
    }

    /// Stop tracking `local`, returning its entry.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if `local` is not tracked.
    pub fn unregister(&mut self, local: &str) -> Result<TrackedFile> {
        let key = NormalizedPath::new(local);
        self.entries
            .remove(key.as_str())
            .ok_or_else(|| Error::KeyNotFound {
                path: local.to_string(),
            })
    }

    /// Stop tracking everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// An owned snapshot of every entry.
    pub fn list(&self) -> Vec<TrackedFile> {
        self.entries.values().cloned().collect()
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, local: &str) -> Option<&TrackedFile> {
        self.entries.get(NormalizedPath::new(local).as_str())
    }

    pub fn contains(&self, local: &str) -> bool {
        self.get(local).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackedFile> {
        self.entries.values()
    }

    fn insert(&mut self, file: TrackedFile) -> Registration {
        match self.entries.insert(file.local.clone(), file) {
            None => Registration::Inserted,
            Some(previous) => {
                let current = &self.entries[&previous.local];
                tracing::warn!(
                    local = %previous.local,
                    previous = %previous.destination,
                    destination = %current.destination,
                    "File already tracked; destination updated"
                );
                Registration::Updated {
                    previous: previous.destination,
                }
            }
        }
    }
}
