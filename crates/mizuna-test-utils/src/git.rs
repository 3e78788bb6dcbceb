//! Real git repository fixtures.
//!
//! Prefer [`crate::MockGit`] where a test only cares about which commands
//! run; use these when the test needs git's actual behaviour.

use std::fs;
use std::path::Path;
use std::process::Command;

fn run_git(cwd: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .unwrap_or_else(|e| panic!("failed to run `git {args:?}`: {e}"));
    if !output.status.success() {
        panic!(
            "`git {args:?}` failed in {}:\n{}",
            cwd.display(),
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

/// Set a local identity and disable signing so commits work in CI.
///
/// # Panics
/// Panics if git fails.
pub fn configure_identity(repo: &Path) {
    run_git(repo, &["config", "user.email", "test@test.com"]);
    run_git(repo, &["config", "user.name", "Test User"]);
    run_git(repo, &["config", "commit.gpgsign", "false"]);
}

/// Initialises a repository at `path` with one commit containing `main.tex`.
///
/// # Panics
/// Panics if any git operation fails.
pub fn real_git_repo_with_commit(path: &Path) {
    fs::create_dir_all(path).unwrap_or_else(|e| panic!("failed to create {}: {e}", path.display()));
    run_git(path, &["init"]);
    configure_identity(path);
    fs::write(path.join("main.tex"), "\\documentclass{article}\n")
        .unwrap_or_else(|e| panic!("failed to write main.tex: {e}"));
    run_git(path, &["add", "main.tex"]);
    run_git(path, &["commit", "-m", "Initial commit"]);
}

/// Creates `<dir>/remote.git`, a bare repository with one commit, and
/// returns its path as a clone URL.
///
/// # Panics
/// Panics if any git operation fails.
pub fn bare_remote(dir: &Path) -> String {
    let seed = dir.join("seed");
    real_git_repo_with_commit(&seed);
    run_git(dir, &["clone", "--bare", "seed", "remote.git"]);
    dir.join("remote.git").to_string_lossy().to_string()
}

/// Summary line of the commit `HEAD` points to.
///
/// # Panics
/// Panics if the repository cannot be opened or has no commits.
pub fn head_summary(repo: &Path) -> String {
    let repo = git2::Repository::open(repo)
        .unwrap_or_else(|e| panic!("failed to open {}: {e}", repo.display()));
    let commit = repo
        .head()
        .and_then(|h| h.peel_to_commit())
        .unwrap_or_else(|e| panic!("repository has no HEAD commit: {e}"));
    commit.summary().unwrap_or_default().to_string()
}

/// Contents of `file` in the `HEAD` tree, or `None` if it is not committed.
///
/// Works on bare repositories, which makes it the way to assert what a
/// push actually delivered.
///
/// # Panics
/// Panics if the repository cannot be opened or has no commits.
pub fn committed_file(repo: &Path, file: &str) -> Option<Vec<u8>> {
    let repo = git2::Repository::open(repo)
        .unwrap_or_else(|e| panic!("failed to open {}: {e}", repo.display()));
    let tree = repo
        .head()
        .and_then(|h| h.peel_to_tree())
        .unwrap_or_else(|e| panic!("repository has no HEAD tree: {e}"));
    let entry = tree.get_path(Path::new(file)).ok()?;
    let blob = repo.find_blob(entry.id()).ok()?;
    Some(blob.content().to_vec())
}
