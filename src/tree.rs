//! Directory tree operations
//!
//! General-purpose recursive walk, filtered copy, and filtered delete.
//! The resolver and downloader use these for cache-root management; the
//! embedding application uses them for build-output scaffolding. None of
//! the operations carry cache-specific knowledge.

use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Visit `root` and every path beneath it, depth-first, root first
///
/// Entries are reported in deterministic (name-sorted) order, each exactly
/// once. Fails when `root` does not exist.
pub fn walk(root: &Path, mut visit: impl FnMut(&Path)) -> Result<()> {
    if !root.exists() {
        return Err(Error::WalkRootMissing {
            root: root.to_path_buf(),
        });
    }
    for entry in walkdir::WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        visit(entry.path());
    }
    Ok(())
}

/// Copy everything under `source` into `destination`
///
/// Equivalent to [`copy_filtered`] with a match-everything filter.
pub fn copy(source: &Path, destination: &Path) -> Result<()> {
    copy_filtered(source, destination, |_| true)
}

/// Copy every path under `source` matching `filter` into the equivalent
/// relative position under `destination`
///
/// Intermediate directories are created as needed. `source` must exist and
/// be a directory. A `destination` equal to `source` is a structural
/// no-op; an already existing `destination` inside `source` is rejected.
/// A not-yet-existing `destination` below `source` works because the
/// source listing is snapshotted before the first copy.
pub fn copy_filtered(
    source: &Path,
    destination: &Path,
    filter: impl Fn(&Path) -> bool,
) -> Result<()> {
    if !source.exists() {
        return Err(Error::CopySourceMissing {
            path: source.to_path_buf(),
        });
    }
    if !source.is_dir() {
        return Err(Error::CopySourceNotDirectory {
            path: source.to_path_buf(),
        });
    }
    if destination.exists() {
        if !destination.is_dir() {
            return Err(Error::CopyTargetNotDirectory {
                path: destination.to_path_buf(),
            });
        }
        let canonical_source = source.canonicalize()?;
        let canonical_destination = destination.canonicalize()?;
        if canonical_destination == canonical_source {
            return Ok(());
        }
        if canonical_destination.starts_with(&canonical_source) {
            return Err(Error::CopyTargetInsideSource {
                target: destination.to_path_buf(),
            });
        }
    }

    // Snapshot first so a destination below source never re-copies itself
    let mut entries: Vec<(PathBuf, bool)> = Vec::new();
    for entry in walkdir::WalkDir::new(source).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        entries.push((entry.path().to_path_buf(), entry.file_type().is_dir()));
    }

    create_dir_checked(destination)?;
    for (path, is_dir) in entries {
        if !filter(&path) {
            continue;
        }
        // strip_prefix cannot fail: every entry is below source
        let relative = path.strip_prefix(source).map_err(io::Error::other)?;
        let target = destination.join(relative);
        if is_dir {
            create_dir_checked(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                create_dir_checked(parent)?;
            }
            std::fs::copy(&path, &target).map_err(|e| classify_io(e, &target))?;
        }
    }
    Ok(())
}

/// Remove `root` and everything beneath it
///
/// Equivalent to [`delete_filtered`] with a match-everything filter. A
/// `root` that does not exist is a silent no-op.
pub fn delete(root: &Path) -> Result<()> {
    delete_filtered(root, |_| true)
}

/// Remove every path under `root` matching `filter`, deepest first
///
/// Children are removed before their parent directory, so directories go
/// away only once emptied. A `root` that does not exist is a silent
/// no-op; after a full unfiltered delete, `root` itself is gone.
pub fn delete_filtered(root: &Path, filter: impl Fn(&Path) -> bool) -> Result<()> {
    if !root.exists() {
        return Ok(());
    }
    for entry in walkdir::WalkDir::new(root).contents_first(true) {
        let entry = entry.map_err(io::Error::from)?;
        let path = entry.path();
        if !filter(path) {
            continue;
        }
        let removed = if entry.file_type().is_dir() {
            std::fs::remove_dir(path)
        } else {
            std::fs::remove_file(path)
        };
        match removed {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(classify_io(e, path)),
        }
    }
    Ok(())
}

fn create_dir_checked(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| classify_io(e, dir))
}

fn classify_io(err: io::Error, path: &Path) -> Error {
    if err.kind() == io::ErrorKind::PermissionDenied {
        Error::PermissionDenied {
            path: path.to_path_buf(),
        }
    } else {
        Error::Io(err)
    }
}
