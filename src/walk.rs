//! Directory traversal with skip policy.
//!
//! Walks the tree under a root in deterministic depth-first pre-order
//! (entries sorted by file name) and yields candidate file paths relative
//! to the root. Skip policy, applied at every entry:
//!
//! - anything whose name starts with `.` (hidden directories are pruned
//!   whole, hidden files skipped);
//! - a deny-list of directory names (VCS metadata, vendor/dependency
//!   directories, build output, editor config) anywhere in the tree;
//! - files whose lowercase extension looks binary (heuristic, intentionally
//!   permissive);
//! - files not matching the user's [`FilterSet`].
//!
//! Per-entry traversal errors are swallowed so one unreadable subtree never
//! kills the walk; an unreadable root fails [`Walker::new`] instead.

use std::path::{Path, PathBuf};

use ignore::{DirEntry, WalkBuilder};

use crate::error::SearchError;
use crate::filter::FilterSet;

/// Directory names never descended into, regardless of location.
pub const DEFAULT_SKIP_DIRS: &[&str] = &[
    ".git",
    ".svn",
    ".hg",
    "node_modules",
    "vendor",
    "third_party",
    "target",
    "dist",
    "build",
    "out",
    "bin",
    "obj",
    ".idea",
    ".vscode",
    "__pycache__",
];

/// File extensions treated as binary/media and never scanned.
/// Extension-based heuristic only — false negatives are expected and fine.
pub const DEFAULT_BINARY_EXTENSIONS: &[&str] = &[
    "exe", "dll", "so", "dylib", "a", "o", "lib", "pdb", "class", "jar", "wasm", "pyc", "png",
    "jpg", "jpeg", "gif", "bmp", "ico", "webp", "tiff", "mp3", "mp4", "avi", "mov", "mkv", "wav",
    "flac", "zip", "tar", "gz", "bz2", "xz", "7z", "rar", "pdf", "woff", "woff2", "ttf", "otf",
    "eot",
];

/// Static, immutable skip policy injected into the walker.
/// Tests substitute their own lists.
#[derive(Debug, Clone, Copy)]
pub struct SkipConfig {
    pub dirs: &'static [&'static str],
    pub extensions: &'static [&'static str],
}

impl Default for SkipConfig {
    fn default() -> Self {
        SkipConfig {
            dirs: DEFAULT_SKIP_DIRS,
            extensions: DEFAULT_BINARY_EXTENSIONS,
        }
    }
}

/// Lazy candidate-path producer. Yields root-relative paths of files that
/// survive the skip policy and the user filter.
pub struct Walker {
    root: PathBuf,
    inner: ignore::Walk,
    filters: FilterSet,
    skip: SkipConfig,
}

impl Walker {
    /// Build a walker over `root`. Fails only when the root itself cannot
    /// be read; everything below it is best-effort.
    pub fn new(root: &Path, filters: FilterSet, skip: SkipConfig) -> Result<Walker, SearchError> {
        std::fs::read_dir(root).map_err(|source| SearchError::RootAccess {
            path: root.to_path_buf(),
            source,
        })?;

        let mut builder = WalkBuilder::new(root);
        // The skip policy below is the complete exclusion rule; gitignore
        // semantics would make results depend on ambient ignore files.
        builder.standard_filters(false);
        builder.follow_links(false);
        builder.sort_by_file_name(|a: &std::ffi::OsStr, b: &std::ffi::OsStr| a.cmp(b));

        let skip_dirs = skip.dirs;
        builder.filter_entry(move |entry| keep_entry(entry, skip_dirs));

        Ok(Walker {
            root: root.to_path_buf(),
            inner: builder.build(),
            filters,
            skip,
        })
    }
}

impl Iterator for Walker {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(%err, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            if has_denied_extension(entry.path(), self.skip.extensions) {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(&self.root)
                .unwrap_or(entry.path())
                .to_path_buf();
            if !self.filters.matches(&rel) {
                continue;
            }
            return Some(rel);
        }
    }
}

/// Returning false for a directory prunes its whole subtree.
fn keep_entry(entry: &DirEntry, skip_dirs: &[&str]) -> bool {
    if entry.depth() == 0 {
        return true;
    }
    let name = entry.file_name().to_string_lossy();
    if name.starts_with('.') {
        return false;
    }
    if entry.file_type().is_some_and(|ft| ft.is_dir())
        && skip_dirs.iter().any(|d| name.eq_ignore_ascii_case(d))
    {
        return false;
    }
    true
}

fn has_denied_extension(path: &Path, denied: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_lowercase();
            denied.iter().any(|d| *d == ext)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn collect(root: &Path, filter_spec: &str, skip: SkipConfig) -> Vec<PathBuf> {
        let filters = FilterSet::parse(filter_spec).unwrap();
        Walker::new(root, filters, skip).unwrap().collect()
    }

    #[test]
    fn test_walk_yields_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("a.txt"), "x").unwrap();
        fs::write(dir.path().join("sub/b.txt"), "x").unwrap();

        let paths = collect(dir.path(), "*", SkipConfig::default());
        assert_eq!(paths, vec![PathBuf::from("a.txt"), PathBuf::from("sub/b.txt")]);
    }

    #[test]
    fn test_dot_directories_are_pruned_not_just_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".hidden/deep")).unwrap();
        fs::write(dir.path().join(".hidden/deep/secret.txt"), "x").unwrap();
        fs::write(dir.path().join("seen.txt"), "x").unwrap();

        let paths = collect(dir.path(), "*", SkipConfig::default());
        assert_eq!(paths, vec![PathBuf::from("seen.txt")]);
    }

    #[test]
    fn test_hidden_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".env"), "x").unwrap();
        fs::write(dir.path().join("visible.txt"), "x").unwrap();

        let paths = collect(dir.path(), "*", SkipConfig::default());
        assert_eq!(paths, vec![PathBuf::from("visible.txt")]);
    }

    #[test]
    fn test_deny_listed_directories_are_pruned() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("node_modules")).unwrap();
        fs::write(dir.path().join("node_modules/pkg.js"), "x").unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/main.js"), "x").unwrap();

        let paths = collect(dir.path(), "*", SkipConfig::default());
        assert_eq!(paths, vec![PathBuf::from("src/main.js")]);
    }

    #[test]
    fn test_binary_extensions_never_yielded() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("logo.PNG"), "x").unwrap();
        fs::write(dir.path().join("app.exe"), "x").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let paths = collect(dir.path(), "*", SkipConfig::default());
        assert_eq!(paths, vec![PathBuf::from("notes.txt")]);
    }

    #[test]
    fn test_filter_set_applied_to_candidates() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.go"), "x").unwrap();
        fs::write(dir.path().join("b.rs"), "x").unwrap();
        fs::write(dir.path().join("c.md"), "x").unwrap();

        let paths = collect(dir.path(), "*.go, *.rs", SkipConfig::default());
        assert_eq!(paths, vec![PathBuf::from("a.go"), PathBuf::from("b.rs")]);
    }

    #[test]
    fn test_injected_skip_config() {
        static DIRS: &[&str] = &["generated"];
        static EXTS: &[&str] = &["dat"];
        let skip = SkipConfig { dirs: DIRS, extensions: EXTS };

        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("generated")).unwrap();
        fs::write(dir.path().join("generated/g.txt"), "x").unwrap();
        fs::create_dir(dir.path().join("node_modules")).unwrap();
        fs::write(dir.path().join("node_modules/kept.js"), "x").unwrap();
        fs::write(dir.path().join("blob.dat"), "x").unwrap();
        fs::write(dir.path().join("kept.png"), "x").unwrap();

        let paths = collect(dir.path(), "*", skip);
        // Only the injected lists apply: node_modules and .png survive.
        assert_eq!(
            paths,
            vec![PathBuf::from("kept.png"), PathBuf::from("node_modules/kept.js")]
        );
    }

    #[test]
    fn test_walk_order_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["zeta.txt", "alpha.txt", "mid.txt"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        let first = collect(dir.path(), "*", SkipConfig::default());
        let second = collect(dir.path(), "*", SkipConfig::default());
        assert_eq!(first, second);
        assert_eq!(
            first,
            vec![
                PathBuf::from("alpha.txt"),
                PathBuf::from("mid.txt"),
                PathBuf::from("zeta.txt")
            ]
        );
    }

    #[test]
    fn test_unreadable_root_is_an_error() {
        let err = Walker::new(
            Path::new("/nonexistent/tgrep-root"),
            FilterSet::default(),
            SkipConfig::default(),
        )
        .err()
        .expect("missing root must fail");
        assert!(matches!(err, SearchError::RootAccess { .. }));
    }
}
