//! Sync passes driven through a scripted git runner

use mizuna_core::{Error, SyncConfig, SyncOptions, SyncStatus, Synchronizer, TrackBatch};
use mizuna_fs::NormalizedPath;
use mizuna_test_utils::MockGit;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::fs;
use tempfile::TempDir;

fn config() -> SyncConfig {
    SyncConfig::new("https://git.example.com/paper", "paper")
}

/// Opens a synchronizer in `temp` and forgets the clone call.
fn open(temp: &TempDir, git: &MockGit) -> Synchronizer<MockGit> {
    let sync =
        Synchronizer::with_runner(config(), NormalizedPath::new(temp.path()), git.clone()).unwrap();
    git.reset_calls();
    sync
}

fn clone_dir(temp: &TempDir) -> std::path::PathBuf {
    temp.path().join(".mizuna_sync").join("paper")
}

#[test]
fn test_open_creates_sync_root_and_clones() {
    let temp = TempDir::new().unwrap();
    let git = MockGit::new();

    let sync =
        Synchronizer::with_runner(config(), NormalizedPath::new(temp.path()), git.clone()).unwrap();

    let calls = git.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].args,
        vec!["clone", "https://git.example.com/paper", ".mizuna_sync/paper"]
    );
    assert_eq!(calls[0].cwd, temp.path());
    assert!(clone_dir(&temp).is_dir());
    assert_eq!(sync.track_count(), 0);
}

#[test]
fn test_open_reuses_existing_clone() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(clone_dir(&temp)).unwrap();
    let git = MockGit::new();

    Synchronizer::with_runner(config(), NormalizedPath::new(temp.path()), git.clone()).unwrap();

    assert!(git.calls().is_empty());
}

#[test]
fn test_failed_clone_fails_construction() {
    let temp = TempDir::new().unwrap();
    let git = MockGit::new().fail_on("clone", 128);

    let result = Synchronizer::with_runner(config(), NormalizedPath::new(temp.path()), git.clone());

    assert!(matches!(
        result,
        Err(Error::Git(mizuna_git::Error::Clone { .. }))
    ));
    assert!(!clone_dir(&temp).exists());
}

#[test]
fn test_sync_with_empty_registry_only_pulls() {
    let temp = TempDir::new().unwrap();
    let git = MockGit::new();
    let sync = open(&temp, &git);

    let outcome = sync.sync().unwrap();

    assert_eq!(outcome.status, SyncStatus::NothingToSync);
    assert_eq!(outcome.code, 0);
    assert_eq!(git.subcommands(), vec!["pull"]);
}

#[test]
fn test_sync_copies_and_publishes_one_file() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "hello mizuna").unwrap();
    let git = MockGit::new();
    let mut sync = open(&temp, &git);
    sync.track("a.txt", Some("a.txt")).unwrap();

    let outcome = sync.sync().unwrap();

    assert_eq!(outcome.status, SyncStatus::Completed);
    assert_eq!(outcome.code, 0);
    assert_eq!(outcome.copied.len(), 1);
    assert_eq!(
        fs::read_to_string(clone_dir(&temp).join("a.txt")).unwrap(),
        "hello mizuna"
    );

    let calls = git.calls();
    let args: Vec<_> = calls.iter().map(|c| c.args.clone()).collect();
    assert_eq!(
        args,
        vec![
            vec!["pull".to_string()],
            vec!["add".to_string(), "a.txt".to_string()],
            vec![
                "commit".to_string(),
                "-m".to_string(),
                "Update from Mizuna".to_string()
            ],
            vec!["push".to_string()],
        ]
    );
    assert!(calls.iter().all(|c| c.cwd == clone_dir(&temp)));
}

#[test]
fn test_sync_creates_nested_destinations() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("out")).unwrap();
    fs::write(temp.path().join("out/fig1.pdf"), "pdf").unwrap();
    fs::write(temp.path().join("table.tex"), "table").unwrap();
    let git = MockGit::new();
    let mut sync = open(&temp, &git);
    sync.track_batch(TrackBatch::from_pairs([
        ("out/fig1.pdf", "figures/fig1.pdf"),
        ("table.tex", "tables/generated/table.tex"),
    ]))
    .unwrap();

    sync.sync().unwrap();

    assert!(clone_dir(&temp).join("figures/fig1.pdf").is_file());
    assert!(clone_dir(&temp).join("tables/generated/table.tex").is_file());
    assert_eq!(git.count("add"), 2);
    assert_eq!(git.count("commit"), 1);
    assert_eq!(git.count("push"), 1);
}

#[test]
fn test_sync_uses_configured_commit_message() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "a").unwrap();
    let git = MockGit::new();
    let mut sync = Synchronizer::with_runner(
        config().with_commit_message("Regenerate figures"),
        NormalizedPath::new(temp.path()),
        git.clone(),
    )
    .unwrap();
    sync.track("a.txt", None).unwrap();

    sync.sync().unwrap();

    let commit = git
        .calls()
        .into_iter()
        .find(|c| c.subcommand() == "commit")
        .unwrap();
    assert_eq!(commit.args[2], "Regenerate figures");
}

#[rstest]
#[case("pull", &["pull"])]
#[case("add", &["pull", "add"])]
#[case("commit", &["pull", "add", "commit"])]
#[case("push", &["pull", "add", "commit", "push"])]
fn test_failing_step_stops_the_pass(#[case] step: &str, #[case] expected: &[&str]) {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "a").unwrap();
    let git = MockGit::new().fail_on(step, 1);
    let mut sync = open(&temp, &git);
    sync.track("a.txt", None).unwrap();

    let err = sync.sync().unwrap_err();

    assert_eq!(git.subcommands(), expected);
    match err {
        Error::Git(git_err) => assert_eq!(git_err.output().map(|o| o.code), Some(1)),
        other => panic!("expected a git error, got {other}"),
    }
}

#[test]
fn test_commit_failure_carries_git_output() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "a").unwrap();
    let git = MockGit::new().respond(
        "commit",
        mizuna_git::GitOutput {
            code: 1,
            stdout: "nothing to commit, working tree clean\n".into(),
            stderr: String::new(),
        },
    );
    let mut sync = open(&temp, &git);
    sync.track("a.txt", None).unwrap();

    match sync.sync().unwrap_err() {
        Error::Git(mizuna_git::Error::Commit { output }) => {
            assert_eq!(output.code, 1);
            assert_eq!(output.stdout, "nothing to commit, working tree clean\n");
        }
        other => panic!("expected commit error, got {other}"),
    }
    assert_eq!(git.count("push"), 0);
}

#[test]
fn test_copy_failure_stops_before_staging() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "a").unwrap();
    let git = MockGit::new();
    let mut sync = open(&temp, &git);
    // b.txt is never created; copy order is a.txt, b.txt
    sync.track_batch(TrackBatch::from_paths(["a.txt", "b.txt"]))
        .unwrap();

    let err = sync.sync().unwrap_err();

    assert!(matches!(err, Error::Fs(mizuna_fs::Error::Io { .. })));
    assert_eq!(git.subcommands(), vec!["pull"]);
    assert!(clone_dir(&temp).join("a.txt").is_file());
    assert!(!clone_dir(&temp).join("b.txt").exists());
}

#[test]
fn test_copy_onto_itself_is_refused() {
    let temp = TempDir::new().unwrap();
    let git = MockGit::new();
    let mut sync = open(&temp, &git);
    fs::write(clone_dir(&temp).join("main.tex"), "tex").unwrap();
    sync.track(".mizuna_sync/paper/main.tex", Some("main.tex"))
        .unwrap();

    let err = sync.sync().unwrap_err();

    assert!(matches!(err, Error::Fs(mizuna_fs::Error::SameFile { .. })));
    assert_eq!(
        fs::read_to_string(clone_dir(&temp).join("main.tex")).unwrap(),
        "tex"
    );
    assert_eq!(git.count("add"), 0);
}

#[test]
fn test_dry_run_touches_nothing() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "12345").unwrap();
    let git = MockGit::new();
    let mut sync = open(&temp, &git);
    sync.track("a.txt", Some("docs/a.txt")).unwrap();

    let outcome = sync.sync_with(SyncOptions { dry_run: true }).unwrap();

    assert_eq!(outcome.status, SyncStatus::DryRun);
    assert_eq!(outcome.copied[0].destination, "docs/a.txt");
    assert_eq!(outcome.copied[0].bytes, 5);
    assert!(git.calls().is_empty());
    assert!(!clone_dir(&temp).join("docs").exists());
}

#[test]
fn test_untrack_unknown_leaves_registry_unchanged() {
    let temp = TempDir::new().unwrap();
    let git = MockGit::new();
    let mut sync = open(&temp, &git);
    sync.track("a.txt", None).unwrap();

    let err = sync.untrack("b.txt").unwrap_err();

    assert!(matches!(err, Error::KeyNotFound { ref path } if path == "b.txt"));
    assert_eq!(sync.track_count(), 1);
}

#[test]
fn test_untrack_all_empties_registry() {
    let temp = TempDir::new().unwrap();
    let git = MockGit::new();
    let mut sync = open(&temp, &git);
    sync.track_batch(TrackBatch::from_paths(["a.txt", "b.txt", "c.txt"]))
        .unwrap();

    sync.untrack_all();

    assert_eq!(sync.track_count(), 0);
    assert!(sync.track_list().is_empty());
}

#[test]
fn test_check_reports_drift_after_sync() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "v1").unwrap();
    let git = MockGit::new();
    let mut sync = open(&temp, &git);
    sync.track("a.txt", None).unwrap();

    sync.sync().unwrap();
    assert!(sync.check().unwrap().is_clean());

    fs::write(temp.path().join("a.txt"), "v2").unwrap();
    let report = sync.check().unwrap();
    assert_eq!(report.files[0].status, mizuna_core::FileStatus::Modified);
}

#[rstest]
#[case(".")]
#[case(".git/config")]
fn test_clone_metadata_cannot_be_a_destination(#[case] destination: &str) {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("evil"), "overwritten").unwrap();
    fs::create_dir_all(clone_dir(&temp).join(".git")).unwrap();
    fs::write(clone_dir(&temp).join(".git/config"), "[core]").unwrap();
    let git = MockGit::new();
    let mut sync = open(&temp, &git);

    let err = sync.track("evil", Some(destination)).unwrap_err();
    assert!(matches!(err, Error::Validation { .. }), "got {err:?}");

    let outcome = sync.sync().unwrap();
    assert_eq!(outcome.status, SyncStatus::NothingToSync);
    assert_eq!(
        fs::read_to_string(clone_dir(&temp).join(".git/config")).unwrap(),
        "[core]"
    );
    assert_eq!(git.subcommands(), vec!["pull"]);
}
