//! Scripted stand-in for the git executable.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use mizuna_git::{GitOutput, GitRunner};

/// One recorded git invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl Invocation {
    /// The git subcommand (`clone`, `pull`, `add`, ...).
    pub fn subcommand(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug)]
struct State {
    calls: Vec<Invocation>,
    responses: HashMap<String, GitOutput>,
    simulate_clone: bool,
}

/// A [`GitRunner`] that returns scripted outputs and records every call.
///
/// Every subcommand succeeds with stdout `"mock"` unless scripted otherwise.
/// A successful `clone` creates the target directory, mimicking git.
/// Clones of a `MockGit` share state, so hand one clone to the code under
/// test and inspect the other.
///
/// # Example
///
/// ```rust
/// use mizuna_test_utils::MockGit;
///
/// let git = MockGit::new().fail_on("push", 1);
/// let observer = git.clone();
/// // ... pass `git` to a bridge, run a sync ...
/// assert_eq!(observer.count("push"), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockGit {
    state: Rc<RefCell<State>>,
}

impl Default for MockGit {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGit {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(State {
                calls: Vec::new(),
                responses: HashMap::new(),
                simulate_clone: true,
            })),
        }
    }

    /// Make `subcommand` exit with `code` and stderr `"mock failure"`.
    pub fn fail_on(self, subcommand: &str, code: i32) -> Self {
        self.respond(subcommand, GitOutput::failed(code, "mock failure"))
    }

    /// Return `output` whenever `subcommand` runs.
    pub fn respond(self, subcommand: &str, output: GitOutput) -> Self {
        self.state
            .borrow_mut()
            .responses
            .insert(subcommand.to_string(), output);
        self
    }

    /// Do not create the target directory on `clone`.
    pub fn without_clone_side_effect(self) -> Self {
        self.state.borrow_mut().simulate_clone = false;
        self
    }

    /// Every invocation so far, in order.
    pub fn calls(&self) -> Vec<Invocation> {
        self.state.borrow().calls.clone()
    }

    /// The subcommand of every invocation so far, in order.
    pub fn subcommands(&self) -> Vec<String> {
        self.state
            .borrow()
            .calls
            .iter()
            .map(|c| c.subcommand().to_string())
            .collect()
    }

    /// How many times `subcommand` ran.
    pub fn count(&self, subcommand: &str) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|c| c.subcommand() == subcommand)
            .count()
    }

    /// Forget recorded calls, keeping scripted responses.
    pub fn reset_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }
}

impl GitRunner for MockGit {
    fn run(&self, args: &[&str], cwd: &Path) -> mizuna_git::Result<GitOutput> {
        let mut state = self.state.borrow_mut();
        state.calls.push(Invocation {
            args: args.iter().map(|a| a.to_string()).collect(),
            cwd: cwd.to_path_buf(),
        });

        let subcommand = args.first().copied().unwrap_or("");
        let output = state
            .responses
            .get(subcommand)
            .cloned()
            .unwrap_or_else(|| GitOutput::ok("mock"));

        if subcommand == "clone"
            && output.success()
            && state.simulate_clone
            && let Some(target) = args.get(2)
        {
            fs::create_dir_all(cwd.join(target))
                .unwrap_or_else(|e| panic!("MockGit: failed to simulate clone: {e}"));
        }

        Ok(output)
    }
}
