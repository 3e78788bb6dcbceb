//! Sync passes and drift checks
//!
//! - **engine**: the [`Synchronizer`], running pull, copy, stage, commit and push
//! - **outcome**: what a sync pass did
//! - **check**: compare tracked files with their copies in the clone

mod check;
mod engine;
mod outcome;

pub use check::{CheckReport, FileCheck, FileStatus, check};
pub use engine::{SyncOptions, Synchronizer, plan_copies};
pub use outcome::{CopiedFile, SyncOutcome, SyncStatus};
