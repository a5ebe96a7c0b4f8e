//! File filter: user glob tokens → a set of compiled glob predicates.
//!
//! Parsing rule: trim; an empty string or a lone `*` means "match
//! everything". Otherwise split on commas when any comma is present, else
//! on whitespace; drop empty/`*` tokens; every remaining token must be a
//! valid glob or the whole parse fails naming that token.
//!
//! Matching rule: an empty set matches every path. Otherwise any pattern
//! may match — patterns containing a path separator are tested against the
//! path relative to the search root, patterns without one against the
//! file's base name only.

use std::path::Path;

use globset::{Glob, GlobBuilder, GlobMatcher};

use crate::error::SearchError;

/// What part of a candidate path a pattern is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchSurface {
    BaseName,
    RelativePath,
}

#[derive(Debug, Clone)]
struct FilterPattern {
    token: String,
    matcher: GlobMatcher,
    surface: MatchSurface,
}

/// A parsed, compiled set of file filter patterns.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    patterns: Vec<FilterPattern>,
}

impl FilterSet {
    /// Parse a user filter string. Fails fast on the first token that is
    /// not a syntactically valid glob.
    pub fn parse(spec: &str) -> Result<FilterSet, SearchError> {
        let raw = spec.trim();
        if raw.is_empty() || raw == "*" {
            return Ok(FilterSet::default());
        }

        let tokens: Vec<&str> = if raw.contains(',') {
            raw.split(',').collect()
        } else {
            raw.split_whitespace().collect()
        };

        let mut patterns = Vec::with_capacity(tokens.len());
        for token in tokens {
            let token = token.trim();
            if token.is_empty() || token == "*" {
                continue;
            }
            patterns.push(compile_pattern(token)?);
        }

        Ok(FilterSet { patterns })
    }

    /// True if `rel_path` (relative to the search root) passes the filter.
    /// Pure: depends only on the path and the parsed set.
    pub fn matches(&self, rel_path: &Path) -> bool {
        if self.patterns.is_empty() {
            return true;
        }
        self.patterns.iter().any(|p| match p.surface {
            MatchSurface::BaseName => rel_path
                .file_name()
                .is_some_and(|name| p.matcher.is_match(Path::new(name))),
            MatchSurface::RelativePath => p.matcher.is_match(rel_path),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// The original tokens, in parse order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.token.as_str())
    }
}

fn compile_pattern(token: &str) -> Result<FilterPattern, SearchError> {
    let has_separator = token.contains(['/', '\\']);
    let glob = if has_separator {
        // Path-shaped pattern: `*` must not cross directory boundaries.
        GlobBuilder::new(token)
            .literal_separator(true)
            .build()
            .map_err(|source| SearchError::FilterParse {
                token: token.to_string(),
                source,
            })?
    } else {
        Glob::new(token).map_err(|source| SearchError::FilterParse {
            token: token.to_string(),
            source,
        })?
    };

    Ok(FilterPattern {
        token: token.to_string(),
        matcher: glob.compile_matcher(),
        surface: if has_separator {
            MatchSurface::RelativePath
        } else {
            MatchSurface::BaseName
        },
    })
}


// ─── Property-based tests (proptest) ─────────────────────────────────
