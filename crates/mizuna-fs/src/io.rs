//! File copy and atomic write primitives

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Options threaded into [`copy_file`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyOptions {
    /// Always treat source and destination as distinct files.
    ///
    /// Canonicalization on some network drives resolves two different files
    /// to the same path; enabling this skips the same-file check entirely.
    pub assume_distinct: bool,
}

/// Copy `source` to `destination`, creating missing parent directories.
///
/// Returns the number of bytes copied. Fails with [`Error::SameFile`] when
/// both paths resolve to the same file, unless
/// [`CopyOptions::assume_distinct`] is set.
pub fn copy_file(
    source: &NormalizedPath,
    destination: &NormalizedPath,
    options: CopyOptions,
) -> Result<u64> {
    let src = source.to_native();
    let dest = destination.to_native();

    if let Some(parent) = dest.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        tracing::debug!(dir = %parent.display(), "Created destination directory");
    }

    if !options.assume_distinct && is_same_file(&src, &dest) {
        return Err(Error::SameFile { path: src });
    }

    let bytes = fs::copy(&src, &dest).map_err(|e| Error::io(&src, e))?;
    tracing::debug!(
        source = %source,
        destination = %destination,
        bytes,
        "Copied file"
    );
    Ok(bytes)
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (dunce::canonicalize(a), dunce::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Write content atomically to a file with locking.
///
/// Writes to a sibling temp file under an exclusive advisory lock, then
/// renames it over the target.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let temp_name = format!(
        ".{}.{}.tmp",
        path.file_name().unwrap_or("mizuna"),
        std::process::id()
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file
        .lock_exclusive()
        .map_err(|_| Error::LockFailed {
            path: native_path.clone(),
        })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp_path, e))?;
    temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    fs::rename(&temp_path, &native_path).map_err(|e| Error::io(&native_path, e))?;

    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Create `path` and its parents if missing. Returns `true` if it was created.
pub fn ensure_dir(path: &NormalizedPath) -> Result<bool> {
    if path.is_dir() {
        return Ok(false);
    }
    let native_path = path.to_native();
    fs::create_dir_all(&native_path).map_err(|e| Error::io(&native_path, e))?;
    Ok(true)
}
