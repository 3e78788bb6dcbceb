//! Track and untrack command implementations
//!
//! Both edit the manifest's file list; nothing is copied until `mizuna sync`.

use colored::Colorize;
use mizuna_core::Registration;
use mizuna_fs::NormalizedPath;

use super::Project;
use crate::error::{CliError, Result};

/// Add `paths` to the manifest. All paths are validated before it is saved.
pub fn run_track(project: &Project, paths: &[String], destination: Option<&str>) -> Result<()> {
    if destination.is_some() && paths.len() != 1 {
        return Err(CliError::user("--as can only be used with a single path"));
    }

    let mut manifest = project.load_manifest()?;
    let mut results = Vec::with_capacity(paths.len());
    for path in paths {
        results.push((path, manifest.track(path, destination)?));
    }
    manifest.save(&project.manifest_path)?;

    for (path, registration) in results {
        let source = project.root.join(NormalizedPath::new(path).as_str());
        if !source.is_file() {
            tracing::warn!(path = %source, "Tracked file does not exist yet");
        }
        match registration {
            Registration::Inserted => {
                println!("{} Tracking {}", "+".green(), path.cyan());
            }
            Registration::Updated { previous } => {
                println!(
                    "{} {} already tracked (was {})",
                    "~".yellow(),
                    path.cyan(),
                    previous.dimmed()
                );
            }
        }
    }
    Ok(())
}

/// Remove `paths`, or every file when `all` is set.
pub fn run_untrack(project: &Project, paths: &[String], all: bool) -> Result<()> {
    let mut manifest = project.load_manifest()?;

    if all {
        let removed = manifest.untrack_all();
        manifest.save(&project.manifest_path)?;
        println!("{} Untracked all files ({})", "OK".green().bold(), removed);
        return Ok(());
    }

    let mut removed = Vec::with_capacity(paths.len());
    for path in paths {
        removed.push(manifest.untrack(path)?);
    }
    manifest.save(&project.manifest_path)?;

    for entry in removed {
        println!("{} Untracked {}", "-".red(), entry.local.cyan());
    }
    Ok(())
}
