//! Sync command implementation

use colored::Colorize;
use mizuna_core::sync::plan_copies;
use mizuna_core::{ConfigResolver, SyncOutcome, SyncStatus, Synchronizer};

use super::Project;
use crate::error::Result;

/// Run a sync pass, or plan one with `dry_run`.
///
/// A dry run never clones, pulls or copies.
pub fn run_sync(project: &Project, dry_run: bool, json: bool) -> Result<()> {
    let manifest = project.load_manifest()?;
    let config = ConfigResolver::new().resolve(&manifest)?;
    let registry = manifest.registry()?;

    if !json {
        let verb = if dry_run { "Planning" } else { "Syncing" };
        println!(
            "{} {} {} file(s) to {}",
            "=>".blue().bold(),
            verb,
            registry.count(),
            config.remote_url.cyan()
        );
    }

    let outcome = if dry_run {
        let clone_dir = config.clone_path(&project.root);
        SyncOutcome::dry_run(plan_copies(&registry, &project.root, &clone_dir)?)
    } else {
        Synchronizer::open(config, project.root.clone())?
            .with_registry(registry)
            .sync()?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    print_outcome(&outcome);
    Ok(())
}

fn print_outcome(outcome: &SyncOutcome) {
    match outcome.status {
        SyncStatus::NothingToSync => {
            println!(
                "{} No tracked files; pulled only. Use {} to add some.",
                "!".yellow().bold(),
                "mizuna track".cyan()
            );
        }
        SyncStatus::DryRun => {
            for file in &outcome.copied {
                println!(
                    "   {} {} {} {} ({} bytes)",
                    "[dry-run]".dimmed(),
                    file.local.cyan(),
                    "->".dimmed(),
                    file.destination,
                    file.bytes
                );
            }
            println!("{} Dry run complete; nothing changed.", "OK".green().bold());
        }
        SyncStatus::Completed => {
            for file in &outcome.copied {
                println!("   {} {}", "+".green(), file.destination);
            }
            println!(
                "{} Synced {} file(s).",
                "OK".green().bold(),
                outcome.copied.len()
            );
        }
    }
}
