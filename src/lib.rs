//! # tgrep — interactive terminal search
//!
//! Searches the files under a root directory for a text pattern (regular
//! expression or literal) and serves matches with a contextual preview.
//! Every search re-walks the tree; there is no index and no cache.
//!
//! ## Library usage
//!
//! This crate is primarily an interactive terminal tool, but the search
//! engine is exposed as a library so the core can be benchmarked and
//! integration-tested without a terminal:
//!
//! ```
//! use tgrep::engine::Engine;
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(dir.path().join("a.txt"), "hello world\n").unwrap();
//!
//! let engine = Engine::new(dir.path());
//! let results = engine.search("hello", "*.txt").unwrap();
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].line, 1);
//! ```

use std::path::PathBuf;

pub mod engine;
pub mod error;
pub mod filter;
pub mod highlight;
pub mod pattern;
pub mod preview;
pub mod scan;
pub mod walk;

pub use error::SearchError;

// ─── Core public types ───────────────────────────────────────────────

/// One match occurrence. Immutable once constructed; the engine returns a
/// freshly allocated ordered `Vec<SearchResult>` per search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Path of the matching file, relative to the search root.
    pub file: PathBuf,
    /// 1-based line number.
    pub line: usize,
    /// 1-based byte offset of the match start within the line.
    pub column: usize,
    /// Full text of the matching line (not just the matched substring).
    pub content: String,
}

/// Read a file as a String, using lossy UTF-8 conversion for non-UTF8 files.
/// Returns `(content, was_lossy)` where `was_lossy` is true if replacement
/// characters were inserted. Keeps files with stray Windows-1252 bytes
/// (smart quotes in comments, etc.) searchable instead of dropping them.
pub fn read_file_lossy(path: &std::path::Path) -> std::io::Result<(String, bool)> {
    let raw = std::fs::read(path)?;
    match String::from_utf8(raw) {
        Ok(s) => Ok((s, false)),
        Err(e) => Ok((String::from_utf8_lossy(e.as_bytes()).into_owned(), true)),
    }
}
