//! Search engine: composes filter parsing, pattern compilation, traversal,
//! and per-file scanning into one synchronous call.
//!
//! A `search` call walks the whole tree and materializes its result set
//! before returning; there is no streaming and no cancellation. The engine
//! holds no mutable state — every call opens and closes its own files — so
//! concurrent calls are safe, merely wasteful.

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::error::SearchError;
use crate::filter::FilterSet;
use crate::pattern::Matcher;
use crate::scan::scan_file;
use crate::walk::{SkipConfig, Walker};
use crate::SearchResult;

/// One search root plus its (static) skip policy.
#[derive(Debug, Clone)]
pub struct Engine {
    root: PathBuf,
    skip: SkipConfig,
}

impl Engine {
    /// Engine over `root` with the default skip policy.
    pub fn new(root: impl Into<PathBuf>) -> Engine {
        Engine {
            root: root.into(),
            skip: SkipConfig::default(),
        }
    }

    /// Engine with an injected skip policy (used by tests).
    pub fn with_skip_config(root: impl Into<PathBuf>, skip: SkipConfig) -> Engine {
        Engine {
            root: root.into(),
            skip,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run one search. Returns the full ordered result set:
    /// traversal order, then line order, then column order.
    ///
    /// Fails only on a bad filter token (checked before any traversal) or
    /// an unreadable root. A query is never rejected — invalid regex syntax
    /// silently becomes a literal match. Per-file read errors are absorbed;
    /// the affected file contributes zero results.
    pub fn search(
        &self,
        query: &str,
        filter_spec: &str,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let start = Instant::now();

        // Fail fast: a bad filter must be reported before any file is touched.
        let filters = FilterSet::parse(filter_spec)?;
        let matcher = Matcher::compile(query);
        let walker = Walker::new(&self.root, filters, self.skip)?;

        let mut results = Vec::new();
        let mut scanned = 0usize;
        let mut skipped = 0usize;

        for rel in walker {
            match scan_file(&self.root, &rel, &matcher) {
                Ok(mut file_results) => {
                    scanned += 1;
                    results.append(&mut file_results);
                }
                Err(err) => {
                    skipped += 1;
                    tracing::debug!(path = %rel.display(), %err, "skipping unreadable file");
                }
            }
        }

        tracing::info!(
            query,
            literal = matcher.is_literal(),
            files_scanned = scanned,
            files_skipped = skipped,
            matches = results.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "search finished"
        );

        Ok(results)
    }
}
