//! List command implementation

use colored::Colorize;

use super::Project;
use crate::error::Result;

/// Print every tracked file with its destination.
pub fn run_list(project: &Project, json: bool) -> Result<()> {
    let manifest = project.load_manifest()?;
    let registry = manifest.registry()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&registry.list())?);
        return Ok(());
    }

    if registry.is_empty() {
        println!(
            "{} (use {} to add)",
            "No tracked files".dimmed(),
            "mizuna track".cyan()
        );
        return Ok(());
    }

    println!("{} ({})", "Tracked files".bold(), registry.count());
    for file in registry.iter() {
        if file.destination == file.local {
            println!("  {} {}", "+".green(), file.local.cyan());
        } else {
            println!(
                "  {} {} {} {}",
                "+".green(),
                file.local.cyan(),
                "->".dimmed(),
                file.destination
            );
        }
    }
    Ok(())
}
