//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use mizuna_fs::SyncPath;

/// Mizuna - Keep local files synced into a git-backed project
#[derive(Parser, Debug)]
#[command(name = "mizuna")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the project manifest
    #[arg(
        short = 'C',
        long = "manifest",
        global = true,
        env = "MIZUNA_MANIFEST",
        default_value = SyncPath::Manifest.as_str()
    )]
    pub manifest: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create a manifest for a remote repository
    ///
    /// Examples:
    ///   mizuna init --remote https://git.overleaf.com/abc123
    ///   mizuna init --remote git@github.com:me/paper.git --directory paper
    Init {
        /// Remote repository URL
        #[arg(short, long)]
        remote: String,

        /// Clone directory name inside the sync root (default: derived from the URL)
        #[arg(short, long)]
        directory: Option<String>,

        /// Overwrite an existing manifest
        #[arg(long)]
        force: bool,
    },

    /// Track files for syncing
    ///
    /// Examples:
    ///   mizuna track figures/fig1.pdf figures/fig2.pdf
    ///   mizuna track build/table.tex --as tables/table.tex
    Track {
        /// Files to track, relative to the manifest directory
        #[arg(required = true)]
        paths: Vec<String>,

        /// Destination inside the clone (single path only)
        #[arg(long = "as", value_name = "DEST")]
        destination: Option<String>,
    },

    /// Stop tracking files
    Untrack {
        /// Files to stop tracking
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        paths: Vec<String>,

        /// Stop tracking every file
        #[arg(long)]
        all: bool,
    },

    /// List tracked files
    List {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Compare tracked files with their synced copies
    Status {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Pull, copy tracked files, commit and push
    Sync {
        /// Show what would be copied without touching anything
        #[arg(long)]
        dry_run: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    ///
    /// Examples:
    ///   mizuna completions bash > ~/.local/share/bash-completion/completions/mizuna
    ///   mizuna completions zsh > ~/.zfunc/_mizuna
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}
