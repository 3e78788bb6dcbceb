//! Local clone lifecycle and the add/commit/push sequence

use std::path::PathBuf;

use mizuna_fs::{NormalizedPath, SyncPath};

use crate::runner::{GitOutput, GitRunner, SystemGit};
use crate::{Error, Result};

/// Lifecycle of a [`RepositoryBridge`].
///
/// The bridge leaves `Uninitialized` exactly once. `Failed` is terminal: a
/// new bridge must be constructed to retry the clone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    /// Constructed, clone not yet attempted
    Uninitialized,
    /// Clone exists (pre-existing or freshly cloned)
    Ready,
    /// The initial clone failed
    Failed,
}

impl std::fmt::Display for BridgeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Uninitialized => "uninitialized",
            Self::Ready => "ready",
            Self::Failed => "failed",
        })
    }
}

/// Bridge between a local clone and its remote.
///
/// `local_directory` may be relative; it is then resolved against
/// `invocation_directory`, which is also where `git clone` runs (the target
/// directory does not exist yet at that point). Every other command runs
/// inside the clone.
pub struct RepositoryBridge<R = SystemGit> {
    remote_url: String,
    local_directory: NormalizedPath,
    invocation_directory: NormalizedPath,
    runner: R,
    state: BridgeState,
}

impl<R: GitRunner> RepositoryBridge<R> {
    /// Create an uninitialized bridge. No git command runs until
    /// [`RepositoryBridge::initialize`].
    pub fn new(
        remote_url: impl Into<String>,
        local_directory: NormalizedPath,
        invocation_directory: NormalizedPath,
        runner: R,
    ) -> Self {
        Self {
            remote_url: remote_url.into(),
            local_directory,
            invocation_directory,
            runner,
            state: BridgeState::Uninitialized,
        }
    }

    /// Create and initialize a bridge, cloning if the directory is absent.
    ///
    /// # Errors
    ///
    /// [`Error::Clone`] if the clone fails.
    pub fn open(
        remote_url: impl Into<String>,
        local_directory: NormalizedPath,
        invocation_directory: NormalizedPath,
        runner: R,
    ) -> Result<Self> {
        let mut bridge = Self::new(remote_url, local_directory, invocation_directory, runner);
        bridge.initialize()?;
        Ok(bridge)
    }

    /// Move out of `Uninitialized`: reuse an existing directory as the clone,
    /// or clone into it.
    ///
    /// An existing directory is trusted as a valid clone without inspection.
    pub fn initialize(&mut self) -> Result<()> {
        if self.state != BridgeState::Uninitialized {
            return Err(Error::AlreadyInitialized { state: self.state });
        }

        let working_dir = self.working_directory();
        if working_dir.is_dir() {
            if !working_dir.join(SyncPath::GitDir).exists() {
                tracing::debug!(
                    path = %working_dir.display(),
                    "Existing sync directory has no .git; using it as-is"
                );
            }
            tracing::info!(path = %self.local_directory, "Found existing clone");
            self.state = BridgeState::Ready;
            return Ok(());
        }

        match self.clone_repository() {
            Ok(_) => {
                self.state = BridgeState::Ready;
                tracing::info!(path = %self.local_directory, "Bridge initialized");
                Ok(())
            }
            Err(e) => {
                self.state = BridgeState::Failed;
                Err(e)
            }
        }
    }

    /// Run `git clone <remote> <local>` from the invocation directory.
    ///
    /// # Errors
    ///
    /// [`Error::AlreadyCloned`] if the local directory exists,
    /// [`Error::Clone`] on a nonzero exit.
    pub fn clone_repository(&self) -> Result<GitOutput> {
        let working_dir = self.working_directory();
        if working_dir.exists() {
            return Err(Error::AlreadyCloned { path: working_dir });
        }

        tracing::info!(remote = %self.remote_url, path = %self.local_directory, "Cloning remote");
        let output = self.runner.run(
            &["clone", self.remote_url.as_str(), self.local_directory.as_str()],
            &self.invocation_directory.to_native(),
        )?;
        if !output.success() {
            return Err(Error::Clone {
                url: self.remote_url.clone(),
                output,
            });
        }
        Ok(output)
    }

    /// Fetch and merge the remote into the clone (`git pull`).
    pub fn pull(&self) -> Result<GitOutput> {
        let output = self.run_in_clone(&["pull"])?;
        if !output.success() {
            return Err(Error::Pull { output });
        }
        Ok(output)
    }

    /// Stage one path, relative to the clone root.
    pub fn add(&self, path: &str) -> Result<GitOutput> {
        let output = self.run_in_clone(&["add", path])?;
        if !output.success() {
            return Err(Error::Stage {
                path: path.to_string(),
                output,
            });
        }
        Ok(output)
    }

    /// Stage every pending change in the clone (`git add -A`).
    pub fn add_all(&self) -> Result<GitOutput> {
        let output = self.run_in_clone(&["add", "-A"])?;
        if !output.success() {
            return Err(Error::Stage {
                path: "-A".to_string(),
                output,
            });
        }
        Ok(output)
    }

    /// Commit staged changes.
    ///
    /// git's exit code and streams are not reinterpreted: "nothing to
    /// commit" exits 1 and surfaces as [`Error::Commit`] with git's output.
    pub fn commit(&self, message: &str) -> Result<GitOutput> {
        let output = self.run_in_clone(&["commit", "-m", message])?;
        if !output.success() {
            return Err(Error::Commit { output });
        }
        Ok(output)
    }

    /// Upload committed history (`git push`).
    pub fn push(&self) -> Result<GitOutput> {
        let output = self.run_in_clone(&["push"])?;
        if !output.success() {
            return Err(Error::Push { output });
        }
        Ok(output)
    }

    pub fn state(&self) -> BridgeState {
        self.state
    }

    pub fn remote_url(&self) -> &str {
        &self.remote_url
    }

    /// The clone directory as configured (possibly relative).
    pub fn local_directory(&self) -> &NormalizedPath {
        &self.local_directory
    }

    pub fn invocation_directory(&self) -> &NormalizedPath {
        &self.invocation_directory
    }

    /// The clone directory resolved against the invocation directory.
    pub fn working_directory(&self) -> PathBuf {
        if self.local_directory.is_absolute() {
            self.local_directory.to_native()
        } else {
            self.invocation_directory
                .join(self.local_directory.as_str())
                .to_native()
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    fn run_in_clone(&self, args: &[&str]) -> Result<GitOutput> {
        if self.state != BridgeState::Ready {
            return Err(Error::NotReady { state: self.state });
        }
        self.runner.run(args, &self.working_directory())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::cell::RefCell;
    use std::path::Path;
    use tempfile::TempDir;

    /// Returns `code` for every command and records the argument lists.
    struct FixedExit {
        code: i32,
        calls: RefCell<Vec<Vec<String>>>,
    }

    impl FixedExit {
        fn new(code: i32) -> Self {
            Self {
                code,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl GitRunner for FixedExit {
        fn run(&self, args: &[&str], _cwd: &Path) -> Result<GitOutput> {
            self.calls
                .borrow_mut()
                .push(args.iter().map(|a| a.to_string()).collect());
            Ok(GitOutput {
                code: self.code,
                stdout: "out".into(),
                stderr: "err".into(),
            })
        }
    }

    fn bridge_in(temp: &TempDir, runner: FixedExit) -> RepositoryBridge<FixedExit> {
        RepositoryBridge::new(
            "https://git.example.com/paper",
            NormalizedPath::new(".mizuna_sync/paper"),
            NormalizedPath::new(temp.path()),
            runner,
        )
    }

    /// A bridge over an existing clone directory, already initialized.
    fn ready_bridge(temp: &TempDir, code: i32) -> RepositoryBridge<FixedExit> {
        std::fs::create_dir_all(temp.path().join(".mizuna_sync/paper")).unwrap();
        let mut bridge = bridge_in(temp, FixedExit::new(code));
        bridge.initialize().unwrap();
        bridge
    }

    fn run_step(bridge: &RepositoryBridge<FixedExit>, step: &str) -> Result<GitOutput> {
        match step {
            "pull" => bridge.pull(),
            "add" => bridge.add("figures/fig1.pdf"),
            "add_all" => bridge.add_all(),
            "commit" => bridge.commit("Sync"),
            "push" => bridge.push(),
            other => panic!("unknown step {other}"),
        }
    }

    #[rstest]
    #[case("pull", &["pull"])]
    #[case("add", &["add", "figures/fig1.pdf"])]
    #[case("add_all", &["add", "-A"])]
    #[case("commit", &["commit", "-m", "Sync"])]
    #[case("push", &["push"])]
    fn steps_run_fixed_tokens(#[case] step: &str, #[case] expected: &[&str]) {
        let temp = TempDir::new().unwrap();
        let bridge = ready_bridge(&temp, 0);

        let output = run_step(&bridge, step).unwrap();

        assert_eq!(output.stdout, "out");
        let calls = bridge.runner().calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], expected);
    }

    #[rstest]
    #[case("pull", "pull")]
    #[case("add", "stage figures/fig1.pdf")]
    #[case("add_all", "stage -A")]
    #[case("commit", "commit")]
    #[case("push", "push")]
    fn nonzero_exit_maps_to_step_error(#[case] step: &str, #[case] expected: &str) {
        let temp = TempDir::new().unwrap();
        let bridge = ready_bridge(&temp, 1);

        let err = run_step(&bridge, step).unwrap_err();

        let kind = match &err {
            Error::Pull { .. } => "pull".to_string(),
            Error::Stage { path, .. } => format!("stage {path}"),
            Error::Commit { .. } => "commit".to_string(),
            Error::Push { .. } => "push".to_string(),
            other => panic!("unexpected error {other:?}"),
        };
        assert_eq!(kind, expected);
        let output = err.output().unwrap();
        assert_eq!(output.code, 1);
        assert_eq!(output.stderr, "err");
    }

    #[test]
    fn existing_directory_skips_clone() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join(".mizuna_sync/paper")).unwrap();

        let mut bridge = bridge_in(&temp, FixedExit::new(0));
        bridge.initialize().unwrap();

        assert_eq!(bridge.state(), BridgeState::Ready);
        assert!(bridge.runner().calls.borrow().is_empty());
    }

    #[test]
    fn missing_directory_is_cloned_with_fixed_tokens() {
        let temp = TempDir::new().unwrap();
        let mut bridge = bridge_in(&temp, FixedExit::new(0));
        bridge.initialize().unwrap();

        assert_eq!(bridge.state(), BridgeState::Ready);
        assert_eq!(
            *bridge.runner().calls.borrow(),
            vec![vec![
                "clone".to_string(),
                "https://git.example.com/paper".to_string(),
                ".mizuna_sync/paper".to_string(),
            ]]
        );
    }

    #[test]
    fn failed_clone_is_terminal() {
        let temp = TempDir::new().unwrap();
        let mut bridge = bridge_in(&temp, FixedExit::new(128));

        let err = bridge.initialize().unwrap_err();
        assert!(matches!(err, Error::Clone { .. }));
        assert_eq!(bridge.state(), BridgeState::Failed);

        let again = bridge.initialize().unwrap_err();
        assert!(matches!(
            again,
            Error::AlreadyInitialized {
                state: BridgeState::Failed
            }
        ));
        assert!(matches!(
            bridge.pull().unwrap_err(),
            Error::NotReady {
                state: BridgeState::Failed
            }
        ));
    }

    #[test]
    fn operations_require_initialization() {
        let temp = TempDir::new().unwrap();
        let bridge = bridge_in(&temp, FixedExit::new(0));

        assert!(matches!(
            bridge.push().unwrap_err(),
            Error::NotReady {
                state: BridgeState::Uninitialized
            }
        ));
        assert!(bridge.runner().calls.borrow().is_empty());
    }

    #[test]
    fn working_directory_resolves_relative_paths() {
        let temp = TempDir::new().unwrap();
        let bridge = bridge_in(&temp, FixedExit::new(0));
        assert_eq!(
            bridge.working_directory(),
            NormalizedPath::new(temp.path())
                .join(".mizuna_sync/paper")
                .to_native()
        );
    }
}
