//! Process seam between the bridge and the `git` executable

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::{Error, Result};

/// Exit status and captured streams of one git invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitOutput {
    /// Process exit code (`-1` when terminated by a signal)
    pub code: i32,
    /// Captured stdout, lossily decoded
    pub stdout: String,
    /// Captured stderr, lossily decoded
    pub stderr: String,
}

impl GitOutput {
    /// An output with exit code 0 and the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// An output with the given nonzero exit code and stderr.
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == 0
    }
}

impl std::fmt::Display for GitOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let detail = if self.stderr.trim().is_empty() {
            self.stdout.trim()
        } else {
            self.stderr.trim()
        };
        if detail.is_empty() {
            write!(f, "exit code {}", self.code)
        } else {
            write!(f, "exit code {}: {}", self.code, detail)
        }
    }
}

/// Runs one git command with a discrete argument list.
///
/// `args` excludes the program name: `["commit", "-m", message]`. A nonzero
/// exit is *not* an error at this layer; only failing to start the process
/// is. The bridge decides what each exit code means.
pub trait GitRunner {
    fn run(&self, args: &[&str], cwd: &Path) -> Result<GitOutput>;
}

impl<T: GitRunner + ?Sized> GitRunner for &T {
    fn run(&self, args: &[&str], cwd: &Path) -> Result<GitOutput> {
        (**self).run(args, cwd)
    }
}

impl<T: GitRunner + ?Sized> GitRunner for Box<T> {
    fn run(&self, args: &[&str], cwd: &Path) -> Result<GitOutput> {
        (**self).run(args, cwd)
    }
}

/// Runs the real git executable, inheriting the process environment.
///
/// There is no timeout: a git process waiting on credentials blocks the
/// caller until it exits.
#[derive(Debug, Clone)]
pub struct SystemGit {
    program: PathBuf,
}

impl Default for SystemGit {
    fn default() -> Self {
        Self {
            program: PathBuf::from("git"),
        }
    }
}

impl SystemGit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific git executable instead of `git` from `PATH`.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl GitRunner for SystemGit {
    fn run(&self, args: &[&str], cwd: &Path) -> Result<GitOutput> {
        tracing::debug!(
            program = %self.program.display(),
            args = ?args,
            cwd = %cwd.display(),
            "Running git"
        );

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(cwd)
            .output()
            .map_err(|source| Error::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let result = GitOutput {
            code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };

        if !result.success() {
            tracing::warn!(
                args = ?args,
                code = result.code,
                stderr = %result.stderr.trim(),
                "git command exited with an error"
            );
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn display_prefers_stderr() {
        let output = GitOutput {
            code: 1,
            stdout: "On branch main\nnothing to commit".into(),
            stderr: "fatal: bad things\n".into(),
        };
        assert_eq!(output.to_string(), "exit code 1: fatal: bad things");
    }

    #[test]
    fn display_falls_back_to_stdout_then_code() {
        assert_eq!(
            GitOutput {
                code: 1,
                stdout: "nothing to commit, working tree clean\n".into(),
                stderr: String::new(),
            }
            .to_string(),
            "exit code 1: nothing to commit, working tree clean"
        );
        assert_eq!(GitOutput::failed(128, "").to_string(), "exit code 128");
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let temp = TempDir::new().unwrap();
        let git = SystemGit::with_program(temp.path().join("no-such-git"));

        let err = git.run(&["status"], temp.path()).unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
    }

    #[test]
    fn runs_real_git_version() {
        let temp = TempDir::new().unwrap();
        let output = SystemGit::new().run(&["--version"], temp.path()).unwrap();
        assert!(output.success());
        assert!(output.stdout.starts_with("git version"));
    }
}
