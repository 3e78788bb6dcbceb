//! Mizuna CLI
//!
//! Tracks local files in a `mizuna.toml` manifest and syncs them into a
//! git-backed project.

mod cli;
mod commands;
mod error;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use commands::Project;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Warnings always reach stderr; --verbose adds debug output.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(cli.verbose)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| CliError::user(format!("Failed to set tracing subscriber: {e}")))?;
    tracing::debug!("Verbose mode enabled");

    let Some(command) = cli.command else {
        println!("{} Sync local files into a git project", "mizuna".green().bold());
        println!();
        println!("Run {} for available commands.", "mizuna --help".cyan());
        return Ok(());
    };

    if let Commands::Completions { shell } = command {
        clap_complete::generate(shell, &mut Cli::command(), "mizuna", &mut std::io::stdout());
        return Ok(());
    }

    let cwd = std::env::current_dir()?;
    let project = Project::locate(&cwd, &cli.manifest);
    tracing::debug!(manifest = %project.manifest_path, "Using manifest");

    execute_command(&project, command)
}

fn execute_command(project: &Project, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Init {
            remote,
            directory,
            force,
        } => commands::run_init(project, &remote, directory, force),
        Commands::Track { paths, destination } => {
            commands::run_track(project, &paths, destination.as_deref())
        }
        Commands::Untrack { paths, all } => commands::run_untrack(project, &paths, all),
        Commands::List { json } => commands::run_list(project, json),
        Commands::Status { json } => commands::run_status(project, json),
        Commands::Sync { dry_run, json } => commands::run_sync(project, dry_run, json),
        Commands::Completions { .. } => Ok(()),
    }
}
