use assert_fs::prelude::*;
use mizuna_fs::{CopyOptions, Error, NormalizedPath, io};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_copy_file_creates_missing_parents() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("fig1.pdf");
    fs::write(&source, b"%PDF-1.5 figure").unwrap();

    let dest = NormalizedPath::new(temp.path().join("clone/figures/deep/fig1.pdf"));
    let bytes = io::copy_file(&NormalizedPath::new(&source), &dest, CopyOptions::default()).unwrap();

    assert_eq!(bytes, 15);
    assert_eq!(fs::read(dest.to_native()).unwrap(), b"%PDF-1.5 figure");
}

#[test]
fn test_copy_file_overwrites_existing_destination() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("src/table.tex").write_str("new table").unwrap();
    temp.child("clone/table.tex").write_str("old table").unwrap();

    io::copy_file(
        &NormalizedPath::new(temp.child("src/table.tex").path()),
        &NormalizedPath::new(temp.child("clone/table.tex").path()),
        CopyOptions::default(),
    )
    .unwrap();

    temp.child("clone/table.tex")
        .assert(predicate::str::contains("new table"));
}

#[test]
fn test_copy_file_missing_source_reports_source_path() {
    let temp = TempDir::new().unwrap();
    let source = NormalizedPath::new(temp.path().join("missing.pdf"));
    let dest = NormalizedPath::new(temp.path().join("clone/missing.pdf"));

    let err = io::copy_file(&source, &dest, CopyOptions::default()).unwrap_err();
    match err {
        Error::Io { path, .. } => assert_eq!(path, source.to_native()),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn test_copy_file_onto_itself_is_refused() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("a.txt");
    fs::write(&file, "keep me").unwrap();
    let path = NormalizedPath::new(&file);

    let err = io::copy_file(&path, &path, CopyOptions::default()).unwrap_err();
    assert!(matches!(err, Error::SameFile { .. }));
    assert_eq!(fs::read_to_string(&file).unwrap(), "keep me");
}

#[test]
fn test_copy_file_assume_distinct_copies_normally() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("a.txt");
    fs::write(&source, "payload").unwrap();
    let dest = temp.path().join("out/a.txt");

    io::copy_file(
        &NormalizedPath::new(&source),
        &NormalizedPath::new(&dest),
        CopyOptions {
            assume_distinct: true,
        },
    )
    .unwrap();

    assert_eq!(fs::read_to_string(dest).unwrap(), "payload");
}

#[test]
fn test_write_atomic_creates_and_overwrites() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("nested/mizuna.toml"));

    io::write_atomic(&path, b"first").unwrap();
    io::write_atomic(&path, b"second").unwrap();

    assert_eq!(io::read_text(&path).unwrap(), "second");
    let leftovers: Vec<_> = fs::read_dir(temp.path().join("nested"))
        .unwrap()
        .flatten()
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
}

#[test]
fn test_ensure_dir_reports_creation() {
    let temp = TempDir::new().unwrap();
    let dir = NormalizedPath::new(temp.path().join(".mizuna_sync"));

    assert!(io::ensure_dir(&dir).unwrap());
    assert!(!io::ensure_dir(&dir).unwrap());
    assert!(dir.is_dir());
}
