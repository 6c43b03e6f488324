//! File helpers for assembling the dump.

use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use walkdir::WalkDir;

use crate::error::{InspectorError, Result};

/// Create `dir` and its parents; an existing directory is fine.
pub fn mkdir(dir: &Path) -> Result<()> {
    match fs::create_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Copy one file, creating the destination's parent directory.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        mkdir(parent)?;
    }
    fs::copy(src, dst)?;
    Ok(())
}

/// Recursively copy `src` into `dst`, leaving out files for which `exclude`
/// returns true. Returns the number of files copied.
///
/// Directories are always recreated, even if every file in them is
/// excluded. Symlinks are not followed.
pub fn copy_dir_filtered<F>(src: &Path, dst: &Path, exclude: F) -> Result<usize>
where
    F: Fn(&Path, &Metadata) -> bool,
{
    let mut copied = 0;
    for entry in WalkDir::new(src).follow_links(false) {
        let entry = entry.map_err(|e| {
            InspectorError::Io(e.into_io_error().unwrap_or_else(|| {
                std::io::Error::other(format!("cannot walk {}", src.display()))
            }))
        })?;

        let relative = entry.path().strip_prefix(src).map_err(anyhow::Error::from)?;
        let target = dst.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            mkdir(&target)?;
        } else if file_type.is_file() {
            let metadata = entry.metadata().map_err(|e| {
                InspectorError::Io(
                    e.into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("metadata unavailable")),
                )
            })?;
            if exclude(entry.path(), &metadata) {
                tracing::trace!("Excluded {}", entry.path().display());
                continue;
            }
            copy_file(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Exclusion predicate matching files last modified before `cutoff`.
pub fn modified_before(cutoff: SystemTime) -> impl Fn(&Path, &Metadata) -> bool {
    move |_, metadata| {
        metadata
            .modified()
            .map(|modified| modified < cutoff)
            .unwrap_or(false)
    }
}

/// Immediate children of `dir` whose file name satisfies `matches`.
///
/// A missing `dir` yields nothing.
pub fn children_matching<F>(dir: &Path, matches: F) -> Result<Vec<PathBuf>>
where
    F: Fn(&str) -> bool,
{
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut found = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_name().to_str().is_some_and(&matches) {
            found.push(entry.path());
        }
    }
    found.sort();
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn mkdir_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("a/b/c");
        mkdir(&dir).unwrap();
        mkdir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn mkdir_over_file_fails() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file");
        fs::write(&file, "x").unwrap();
        assert!(mkdir(&file).is_err());
    }

    #[test]
    fn copy_file_creates_parents() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src.txt");
        fs::write(&src, "hello").unwrap();

        let dst = temp.path().join("out/nested/dst.txt");
        copy_file(&src, &dst).unwrap();
        assert_eq!(fs::read_to_string(dst).unwrap(), "hello");
    }

    #[test]
    fn copy_dir_applies_exclusion() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(src.join("sub")).unwrap();
        fs::write(src.join("keep.log"), "k").unwrap();
        fs::write(src.join("sub/drop.tmp"), "d").unwrap();
        fs::write(src.join("sub/keep2.log"), "k").unwrap();

        let dst = temp.path().join("dst");
        let copied = copy_dir_filtered(&src, &dst, |path, _| {
            path.extension().is_some_and(|e| e == "tmp")
        })
        .unwrap();

        assert_eq!(copied, 2);
        assert!(dst.join("keep.log").exists());
        assert!(dst.join("sub/keep2.log").exists());
        assert!(!dst.join("sub/drop.tmp").exists());
    }

    #[test]
    fn modified_before_checks_mtime() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("fresh.log");
        fs::write(&file, "x").unwrap();
        let metadata = fs::metadata(&file).unwrap();

        let long_ago = SystemTime::now() - Duration::from_secs(14 * 24 * 60 * 60);
        assert!(!modified_before(long_ago)(&file, &metadata));

        let future = SystemTime::now() + Duration::from_secs(60);
        assert!(modified_before(future)(&file, &metadata));
    }

    #[test]
    fn children_matching_filters_names() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("IdeaIC2023.2")).unwrap();
        fs::create_dir(temp.path().join("GoLand2023.1")).unwrap();

        let found = children_matching(temp.path(), |n| n.contains("Idea")).unwrap();
        assert_eq!(found, vec![temp.path().join("IdeaIC2023.2")]);

        let missing = children_matching(&temp.path().join("nope"), |_| true).unwrap();
        assert!(missing.is_empty());
    }
}
