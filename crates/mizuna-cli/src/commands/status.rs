//! Status command implementation

use colored::Colorize;
use mizuna_core::sync::check;
use mizuna_core::{ConfigResolver, FileStatus};

use super::Project;
use crate::error::Result;

/// Compare every tracked file with its copy in the clone.
///
/// Never runs git, so it works before the first sync.
pub fn run_status(project: &Project, json: bool) -> Result<()> {
    let manifest = project.load_manifest()?;
    let config = ConfigResolver::new().resolve(&manifest)?;
    let registry = manifest.registry()?;
    let clone_dir = config.clone_path(&project.root);

    let report = check(&registry, &project.root, &clone_dir)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "Mizuna Status".bold());
    println!();
    println!("{}:    {}", "Remote".dimmed(), config.remote_url);
    println!(
        "{}: {}{}",
        "Clone dir".dimmed(),
        config.local_directory().as_str(),
        if clone_dir.is_dir() {
            String::new()
        } else {
            format!(" ({})", "not cloned yet".yellow())
        }
    );
    println!();

    if report.files.is_empty() {
        println!(
            "{} (use {} to add)",
            "No tracked files".dimmed(),
            "mizuna track".cyan()
        );
        return Ok(());
    }

    for file in &report.files {
        let marker = match file.status {
            FileStatus::Synced => "ok".green(),
            FileStatus::Modified => "modified".yellow(),
            FileStatus::NotSynced => "new".blue(),
            FileStatus::SourceMissing => "missing".red(),
        };
        println!("  {:>9} {}", marker, file.local.cyan());
    }

    println!();
    if report.is_clean() {
        println!("{} Everything is synced.", "OK".green().bold());
    } else {
        if report.count(FileStatus::SourceMissing) > 0 {
            println!(
                "{} Missing sources will fail the next sync.",
                "!".red().bold()
            );
        }
        println!("Run {} to publish changes.", "mizuna sync".cyan());
    }
    Ok(())
}
