//! Deterministic file discovery with directory pruning.
//!
//! Files are matched on an exact, case-sensitive suffix of their file name.
//! Traversal is sequential and sorted by file name so repeated runs list
//! files in the same order.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{DeadkwError, DeadkwResult};

/// Suffixes scanned when none are given.
pub const DEFAULT_FILE_TYPES: &[&str] = &[".txt", ".robot"];

/// Checks if a directory entry should be pruned (excluded from traversal).
#[inline]
fn is_excluded_dir(entry: &walkdir::DirEntry, excludes: &HashSet<&str>) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| excludes.contains(name))
}

/// Returns true if the file name ends with any of the suffixes.
pub fn matches_suffix(path: &Path, suffixes: &[impl AsRef<str>]) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .is_some_and(|name| suffixes.iter().any(|s| name.ends_with(s.as_ref())))
}

/// Gathers all files under `root` whose name ends with one of `suffixes`.
pub fn gather_files(root: &Path, suffixes: &[impl AsRef<str>]) -> DeadkwResult<Vec<PathBuf>> {
    gather_files_with_excludes(root, suffixes, &[] as &[&str])
}

/// Gathers matching files, skipping directories named in `excludes`.
///
/// Any traversal error (missing root, unreadable directory) is fatal.
pub fn gather_files_with_excludes(
    root: &Path,
    suffixes: &[impl AsRef<str>],
    excludes: &[impl AsRef<str>],
) -> DeadkwResult<Vec<PathBuf>> {
    let excludes: HashSet<&str> = excludes.iter().map(|e| e.as_ref()).collect();
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_excluded_dir(e, &excludes))
    {
        let entry = entry.map_err(|e| walk_error(root, e))?;
        // Follows symlinks, so linked suite files are scanned too
        if entry.path().is_file() && matches_suffix(entry.path(), suffixes) {
            files.push(entry.into_path());
        }
    }

    debug!(root = %root.display(), count = files.len(), "files gathered");
    Ok(files)
}

fn walk_error(root: &Path, err: walkdir::Error) -> DeadkwError {
    let path = err.path().unwrap_or(root).to_path_buf();
    match err.into_io_error() {
        Some(io) => DeadkwError::io(path, io),
        None => DeadkwError::Io {
            path,
            message: "filesystem loop detected".to_string(),
            source: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn create_test_tree() -> PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir()
            .join("deadkw_scan_test")
            .join(format!("{}_{}", std::process::id(), id));
        if dir.exists() {
            fs::remove_dir_all(&dir).ok();
        }

        // suite/
        //   a.robot
        //   notes.txt
        //   data.csv
        //   A.ROBOT
        //   nested/b.robot
        //   results/c.robot
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::create_dir_all(dir.join("results")).unwrap();
        fs::write(dir.join("a.robot"), "").unwrap();
        fs::write(dir.join("notes.txt"), "").unwrap();
        fs::write(dir.join("data.csv"), "").unwrap();
        fs::write(dir.join("A.ROBOT"), "").unwrap();
        fs::write(dir.join("nested/b.robot"), "").unwrap();
        fs::write(dir.join("results/c.robot"), "").unwrap();

        dir
    }

    fn names(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| {
                f.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_gather_default_types() {
        let dir = create_test_tree();
        let files = gather_files(&dir, DEFAULT_FILE_TYPES).unwrap();
        assert_eq!(
            names(&dir, &files),
            vec!["a.robot", "nested/b.robot", "notes.txt", "results/c.robot"]
        );
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_suffix_is_case_sensitive() {
        let dir = create_test_tree();
        let files = gather_files(&dir, &[".ROBOT"]).unwrap();
        assert_eq!(names(&dir, &files), vec!["A.ROBOT"]);
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_gather_with_excludes() {
        let dir = create_test_tree();
        let files = gather_files_with_excludes(&dir, &[".robot"], &["results"]).unwrap();
        assert_eq!(names(&dir, &files), vec!["a.robot", "nested/b.robot"]);
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_no_matching_files() {
        let dir = create_test_tree();
        let files = gather_files(&dir, &[".resource"]).unwrap();
        assert!(files.is_empty());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_root_is_error() {
        let missing = std::env::temp_dir().join("deadkw_scan_missing_root_dir");
        let err = gather_files(&missing, DEFAULT_FILE_TYPES).unwrap_err();
        assert!(matches!(err, DeadkwError::Io { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_file_is_listed() {
        let dir = create_test_tree();
        fs::create_dir_all(dir.join("shared")).unwrap();
        fs::write(
            dir.join("shared/common.resource"),
            "*** Keywords ***\nShared Step\n",
        )
        .unwrap();
        std::os::unix::fs::symlink(
            dir.join("shared/common.resource"),
            dir.join("nested/linked.robot"),
        )
        .unwrap();

        let files = gather_files(&dir, &[".robot"]).unwrap();
        assert!(names(&dir, &files).contains(&"nested/linked.robot".to_string()));

        let linked = dir.join("nested/linked.robot");
        let corpus = crate::declarations::Corpus::extract_all(&[linked.clone()]).unwrap();
        assert!(corpus.get(&linked).unwrap().keywords.contains("Shared Step"));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_matches_suffix() {
        assert!(matches_suffix(Path::new("x/keywords.resource"), &[".resource"]));
        assert!(matches_suffix(Path::new("plain.txt"), &["txt"]));
        assert!(!matches_suffix(Path::new("robot"), &[".robot"]));
    }
}
