//! Verbatim asset mirroring and output directory preparation.

use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

/// Ensure `path` exists as an empty directory.
///
/// Removes anything previously at `path`; absence counts as success, so the
/// operation is idempotent.
pub fn reset_dir(path: &Path) -> io::Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    fs::create_dir_all(path)
}

/// Copy a directory tree byte-for-byte, preserving relative paths.
///
/// Returns the number of files copied. Assets are opaque to the build; no
/// transformation or filtering happens here.
pub fn copy_tree(source: &Path, dest: &Path) -> io::Result<usize> {
    let mut copied = 0;

    for entry in WalkDir::new(source) {
        let entry = entry.map_err(io::Error::from)?;
        let relative = entry.path().strip_prefix(source).unwrap_or(entry.path());
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }

    tracing::debug!(
        "copied {} assets from {} to {}",
        copied,
        source.display(),
        dest.display()
    );

    Ok(copied)
}
