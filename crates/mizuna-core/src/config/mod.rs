//! Project manifest and settings resolution
//!
//! Settings come from two places, later overriding earlier:
//!
//! 1. **Global defaults** - `<config_dir>/mizuna/config.toml` (`[sync]` and `[git]` only)
//! 2. **Project manifest** - `mizuna.toml` next to the tracked files
//!
//! The manifest also holds the remote and the user-maintained file list,
//! which is replayed into a [`TrackRegistry`](crate::TrackRegistry) on every run.
//!
//! # Example
//!
//! ```ignore
//! use mizuna_core::config::{ConfigResolver, Manifest};
//! use mizuna_fs::NormalizedPath;
//!
//! let manifest = Manifest::load(&NormalizedPath::new("mizuna.toml"))?;
//! let config = ConfigResolver::new().resolve(&manifest)?;
//! println!("Cloning into {}", config.local_directory());
//! ```

mod manifest;
mod resolver;
pub(crate) mod settings;

pub use manifest::{FileEntry, GitSection, Manifest, RemoteSection, SyncSection};
pub use resolver::{ConfigResolver, GlobalConfig};
pub use settings::{DEFAULT_COMMIT_MESSAGE, SyncConfig};
