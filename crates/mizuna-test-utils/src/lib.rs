//! Shared test utilities for the Mizuna workspace.
//!
//! This crate is a dev-dependency only and is never published.
//!
//! # Modules
//!
//! - [`git`]: real git repository fixtures (seeded repos and bare remotes)
//! - [`mock`]: [`mock::MockGit`], a scripted [`mizuna_git::GitRunner`]

pub mod git;
pub mod mock;

pub use mock::{Invocation, MockGit};
