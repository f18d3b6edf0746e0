//! Recursive fallback search under the container working directory
//!
//! Traversal is depth-first with directory entries sorted by file name, so
//! "first match" is stable across runs and across filesystems. Symlinks are
//! not followed and unreadable entries are skipped.

use crate::pattern::SearchPattern;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Default search root inside the image
pub const DEFAULT_SEARCH_ROOT: &str = "/app";

/// Default bound on the `.py` listing printed when nothing resolves
pub const DEFAULT_DIAGNOSTIC_LIMIT: usize = 10;

fn walk_files(root: &Path) -> impl Iterator<Item = DirEntry> {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!("skipping unreadable entry: {err}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
}

/// Every regular file under `root` whose name matches `pattern`, in traversal order
pub fn find_matches(root: &Path, pattern: &SearchPattern) -> Vec<PathBuf> {
    walk_files(root)
        .filter(|entry| pattern.matches_file_name(entry.path()))
        .map(DirEntry::into_path)
        .collect()
}

/// First `limit` Python files under `root`, for operator diagnostics
pub fn list_python_files(root: &Path, limit: usize) -> Vec<PathBuf> {
    walk_files(root)
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "py"))
        .take(limit)
        .map(DirEntry::into_path)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::DEFAULT_SEARCH_PATTERN;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "").unwrap();
        path
    }

    fn pattern() -> SearchPattern {
        SearchPattern::new(DEFAULT_SEARCH_PATTERN).unwrap()
    }

    #[test]
    fn finds_nested_match() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "ava_bot/mcp_server/fix_imports.py");
        let target = touch(dir.path(), "ava_bot/mcp_server/server_main.py");

        assert_eq!(find_matches(dir.path(), &pattern()), vec![target]);
    }

    #[test]
    fn matches_come_back_in_sorted_traversal_order() {
        let dir = TempDir::new().unwrap();
        let b = touch(dir.path(), "b/run_server.py");
        let a = touch(dir.path(), "a/run_server.py");
        let root_level = touch(dir.path(), "server.py");

        let found = find_matches(dir.path(), &pattern());
        assert_eq!(found, vec![a, b, root_level]);
    }

    #[test]
    fn directories_named_like_scripts_are_ignored() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("my_server.py")).unwrap();

        assert!(find_matches(dir.path(), &pattern()).is_empty());
    }

    #[test]
    fn missing_root_yields_nothing() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        assert!(find_matches(&missing, &pattern()).is_empty());
        assert!(list_python_files(&missing, 10).is_empty());
    }

    #[test]
    fn python_listing_is_bounded() {
        let dir = TempDir::new().unwrap();
        for i in 0..15 {
            touch(dir.path(), &format!("pkg/module_{i:02}.py"));
        }
        touch(dir.path(), "pkg/README.md");

        let listed = list_python_files(dir.path(), DEFAULT_DIAGNOSTIC_LIMIT);
        assert_eq!(listed.len(), DEFAULT_DIAGNOSTIC_LIMIT);
        assert!(listed.iter().all(|p| p.extension().unwrap() == "py"));
        assert!(listed[0].ends_with("pkg/module_00.py"));
    }
}
