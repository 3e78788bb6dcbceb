//! Repository bridge for Mizuna
//!
//! Owns the lifecycle of a local clone (clone-if-absent, pull, add, commit,
//! push) by invoking the external `git` program. Every invocation is a fixed
//! token list run without a shell; a nonzero exit becomes a typed error.

pub mod bridge;
pub mod error;
pub mod runner;

pub use bridge::{BridgeState, RepositoryBridge};
pub use error::{Error, Result};
pub use runner::{GitOutput, GitRunner, SystemGit};
