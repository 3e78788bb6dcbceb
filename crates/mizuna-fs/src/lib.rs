//! Filesystem primitives for Mizuna
//!
//! Provides normalized path handling, the copy routine used by a sync pass,
//! content checksums for drift detection, and format-agnostic config files.

pub mod checksum;
pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use config::{ConfigFormat, ConfigStore};
pub use constants::SyncPath;
pub use error::{Error, Result};
pub use io::CopyOptions;
pub use path::NormalizedPath;
