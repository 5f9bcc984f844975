//! File system helpers for publishing build output.

use anyhow::{Context, Result};
use jwalk::WalkDir;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const IGNORED_FILE_NAME: &[&str] = &[".DS_Store"];

/// Write `contents` to `path` through a sibling temporary file.
///
/// The rename is atomic on the same file system, so a concurrent reader sees
/// either the previous file or the complete new one.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("no parent directory for {}", path.display()))?;
    fs::create_dir_all(parent)
        .with_context(|| format!("failed to create directory {}", parent.display()))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    let tmp = parent.join(format!(".{}.{}.tmp", file_name, std::process::id()));

    let result = (|| -> std::io::Result<()> {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(contents)?;
        file.sync_all()?;
        fs::rename(&tmp, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result.with_context(|| format!("failed to write {}", path.display()))
}

/// Every regular file under `dir`, as `(path relative to dir, absolute path)`.
///
/// Sorted by relative path so output is deterministic.
pub fn collect_files(dir: &Path) -> Result<Vec<(PathBuf, PathBuf)>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).skip_hidden(false) {
        let entry = entry.with_context(|| format!("failed to walk {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if IGNORED_FILE_NAME.contains(&name.as_ref()) {
            continue;
        }
        let path = entry.path();
        let relative = path
            .strip_prefix(dir)
            .with_context(|| format!("{} is outside {}", path.display(), dir.display()))?
            .to_path_buf();
        files.push((relative, path));
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_creates_parents_and_replaces() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("privacy-policy/index.html");

        write_atomic(&target, b"old").unwrap();
        write_atomic(&target, b"new").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
        let leftovers: Vec<_> = fs::read_dir(target.parent().unwrap())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_collect_files_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("b.md"), "b").unwrap();
        fs::write(dir.path().join("a.md"), "a").unwrap();
        fs::write(dir.path().join("nested/c.md"), "c").unwrap();
        fs::write(dir.path().join(".DS_Store"), "").unwrap();

        let files = collect_files(dir.path()).unwrap();
        let relative: Vec<_> = files.iter().map(|(rel, _)| rel.clone()).collect();

        assert_eq!(
            relative,
            [
                PathBuf::from("a.md"),
                PathBuf::from("b.md"),
                PathBuf::from("nested/c.md")
            ]
        );
        assert!(files.iter().all(|(_, abs)| abs.is_absolute()));
    }
}
