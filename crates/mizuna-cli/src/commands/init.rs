//! Init command implementation

use colored::Colorize;
use mizuna_core::{ConfigResolver, Manifest};

use super::Project;
use crate::error::{CliError, Result};

/// Write a new manifest for `remote`.
pub fn run_init(
    project: &Project,
    remote: &str,
    directory: Option<String>,
    force: bool,
) -> Result<()> {
    if remote.trim().is_empty() {
        return Err(CliError::user("Remote URL must not be empty"));
    }
    if project.manifest_path.exists() && !force {
        return Err(CliError::user(format!(
            "{} already exists. Use --force to overwrite it.",
            project.manifest_path
        )));
    }

    let manifest = Manifest::new(remote, directory);
    manifest.save(&project.manifest_path)?;

    let config = ConfigResolver::new().resolve(&manifest)?;
    println!(
        "{} Created {}",
        "OK".green().bold(),
        project.manifest_path.as_str().cyan()
    );
    println!("   {}:    {}", "Remote".dimmed(), config.remote_url);
    println!(
        "   {}: {}",
        "Clone dir".dimmed(),
        config.local_directory().as_str()
    );
    println!();
    println!(
        "Track files with {}, then run {}.",
        "mizuna track <PATH>".cyan(),
        "mizuna sync".cyan()
    );
    Ok(())
}
