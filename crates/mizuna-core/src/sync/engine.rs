//! The Synchronizer: one clone, one registry, one sync pass at a time

use mizuna_fs::io::{copy_file, ensure_dir};
use mizuna_fs::{CopyOptions, NormalizedPath};
use mizuna_git::{GitRunner, RepositoryBridge, SystemGit};

use super::check::{CheckReport, check};
use super::outcome::{CopiedFile, SyncOutcome};
use crate::config::SyncConfig;
use crate::config::settings::resolve;
use crate::registry::{Registration, TrackBatch, TrackRegistry, TrackedFile};
use crate::Result;

/// Options for [`Synchronizer::sync_with`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Plan the copies without pulling, copying or running git.
    pub dry_run: bool,
}

/// Copies tracked files into a clone and publishes them
///
/// Construction creates the sync root if needed and opens the
/// [`RepositoryBridge`], cloning when the clone directory is absent. A failed
/// clone fails construction.
///
/// ```text
/// sync():  pull -> copy each file -> add each file -> commit -> push
/// ```
pub struct Synchronizer<R = SystemGit> {
    config: SyncConfig,
    registry: TrackRegistry,
    bridge: RepositoryBridge<R>,
    invocation_directory: NormalizedPath,
}

impl Synchronizer<SystemGit> {
    /// Open a synchronizer running the configured git program.
    pub fn open(config: SyncConfig, invocation_directory: NormalizedPath) -> Result<Self> {
        let runner = SystemGit::with_program(&config.git_program);
        Self::with_runner(config, invocation_directory, runner)
    }
}

impl<R: GitRunner> Synchronizer<R> {
    /// Open a synchronizer running git through `runner`.
    ///
    /// # Errors
    ///
    /// Fails if the sync root cannot be created or the clone fails.
    pub fn with_runner(
        config: SyncConfig,
        invocation_directory: NormalizedPath,
        runner: R,
    ) -> Result<Self> {
        let sync_root = config.sync_root_path(&invocation_directory);
        if ensure_dir(&sync_root)? {
            tracing::info!(path = %sync_root, "Created sync root");
        } else {
            tracing::debug!(path = %sync_root, "Sync root exists");
        }

        if config.assume_distinct_paths {
            tracing::warn!(
                "assume_distinct_paths is set; copies skip same-file detection"
            );
        } else if sync_root.is_network_path() {
            tracing::warn!(
                path = %sync_root,
                "Sync root looks like a network path; set assume_distinct_paths if copies fail as same-file"
            );
        }

        let bridge = RepositoryBridge::open(
            config.remote_url.clone(),
            config.local_directory(),
            invocation_directory.clone(),
            runner,
        )?;

        Ok(Self {
            config,
            registry: TrackRegistry::new(),
            bridge,
            invocation_directory,
        })
    }

    /// Replace the registry, typically with one rebuilt from the manifest.
    pub fn with_registry(mut self, registry: TrackRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn track(&mut self, local: &str, destination: Option<&str>) -> Result<Registration> {
        self.registry.register(local, destination)
    }

    pub fn track_batch(&mut self, batch: TrackBatch) -> Result<usize> {
        self.registry.register_batch(batch)
    }

    pub fn untrack(&mut self, local: &str) -> Result<TrackedFile> {
        let removed = self.registry.unregister(local)?;
        tracing::info!(local = %removed.local, "Untracked");
        Ok(removed)
    }

    pub fn untrack_all(&mut self) {
        self.registry.clear();
        tracing::info!("All files untracked");
    }

    pub fn track_list(&self) -> Vec<TrackedFile> {
        self.registry.list()
    }

    pub fn track_count(&self) -> usize {
        self.registry.count()
    }

    /// Run a full sync pass.
    pub fn sync(&self) -> Result<SyncOutcome> {
        self.sync_with(SyncOptions::default())
    }

    /// Run a sync pass with options.
    ///
    /// The pass stops at the first failing step and returns its error. When a
    /// copy fails, files copied before it stay in the clone unstaged.
    pub fn sync_with(&self, options: SyncOptions) -> Result<SyncOutcome> {
        let clone_directory = self.clone_directory();

        if options.dry_run {
            let planned = plan_copies(&self.registry, &self.invocation_directory, &clone_directory)?;
            tracing::info!(files = planned.len(), "Dry run; nothing copied");
            return Ok(SyncOutcome::dry_run(planned));
        }

        self.bridge.pull()?;

        if self.registry.is_empty() {
            tracing::warn!("No files tracked; nothing to sync");
            return Ok(SyncOutcome::nothing_to_sync());
        }

        let copy_options = CopyOptions {
            assume_distinct: self.config.assume_distinct_paths,
        };
        let mut copied = Vec::with_capacity(self.registry.count());
        for file in self.registry.iter() {
            let source = self.source_path(file);
            let destination = clone_directory.join(&file.destination);
            let bytes = copy_file(&source, &destination, copy_options).inspect_err(|e| {
                tracing::error!(
                    local = %file.local,
                    copied = copied.len(),
                    error = %e,
                    "Copy failed; earlier copies left unstaged"
                );
            })?;
            copied.push(CopiedFile {
                local: file.local.clone(),
                destination: file.destination.clone(),
                bytes,
            });
        }

        for file in &copied {
            self.bridge.add(&file.destination)?;
        }
        let commit = self.bridge.commit(&self.config.commit_message)?;
        let push = self.bridge.push()?;

        tracing::info!(files = copied.len(), "Sync complete");
        Ok(SyncOutcome::completed(copied, &commit, &push))
    }

    /// Compare tracked files with their copies in the clone.
    pub fn check(&self) -> Result<CheckReport> {
        check(
            &self.registry,
            &self.invocation_directory,
            &self.clone_directory(),
        )
    }

    /// The clone directory resolved against the invocation directory.
    pub fn clone_directory(&self) -> NormalizedPath {
        self.config.clone_path(&self.invocation_directory)
    }

    pub fn registry(&self) -> &TrackRegistry {
        &self.registry
    }

    pub fn bridge(&self) -> &RepositoryBridge<R> {
        &self.bridge
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    fn source_path(&self, file: &TrackedFile) -> NormalizedPath {
        resolve(&self.invocation_directory, &NormalizedPath::new(&file.local))
    }
}

/// List the copies a sync pass would make, without touching anything.
///
/// # Errors
///
/// Fails like a real pass would if a source file cannot be read.
pub fn plan_copies(
    registry: &TrackRegistry,
    invocation_directory: &NormalizedPath,
    clone_directory: &NormalizedPath,
) -> Result<Vec<CopiedFile>> {
    registry
        .iter()
        .map(|file| -> Result<CopiedFile> {
            let source = resolve(invocation_directory, &NormalizedPath::new(&file.local));
            let metadata = std::fs::metadata(source.to_native())
                .map_err(|e| mizuna_fs::Error::io(source.to_native(), e))?;
            tracing::debug!(
                source = %source,
                destination = %clone_directory.join(&file.destination),
                "Would copy"
            );
            Ok(CopiedFile {
                local: file.local.clone(),
                destination: file.destination.clone(),
                bytes: metadata.len(),
            })
        })
        .collect()
}
