//! Tracked-file registry and sync orchestration for Mizuna
//!
//! This crate ties the Layer 0 crates together:
//!
//! - **Registry**: which local files are tracked and where they land in the clone
//! - **Synchronizer**: pull, copy, stage, commit and push in one pass
//! - **Configuration**: the `mizuna.toml` manifest merged with global defaults
//! - **Drift check**: checksum comparison of tracked files with their copies
//!
//! # Architecture
//!
//! ```text
//!          mizuna-cli
//!              |
//!         mizuna-core
//!              |
//!       +------+------+
//!       |             |
//!   mizuna-fs    mizuna-git ---> git (external process)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use mizuna_core::{SyncConfig, Synchronizer};
//! use mizuna_fs::NormalizedPath;
//!
//! let config = SyncConfig::new("https://git.overleaf.com/abc123", "paper");
//! let mut sync = Synchronizer::open(config, NormalizedPath::new(std::env::current_dir()?))?;
//! sync.track("figures/fig1.pdf", None)?;
//! let outcome = sync.sync()?;
//! println!("Copied {} files", outcome.copied.len());
//! ```

pub mod config;
pub mod error;
pub mod registry;
pub mod sync;

pub use config::{ConfigResolver, Manifest, SyncConfig};
pub use error::{Error, Result};
pub use registry::{Registration, TrackBatch, TrackRegistry, TrackedFile};
pub use sync::{
    CheckReport, CopiedFile, FileCheck, FileStatus, SyncOptions, SyncOutcome, SyncStatus,
    Synchronizer,
};
