//! Pattern compiler: turns a query string into a matcher.
//!
//! A query that compiles as a regular expression becomes a regex-backed
//! matcher. A query that does not is silently treated as case-insensitive
//! literal text — a query is never rejected for bad regex syntax.

use memchr::memmem::Finder;
use regex::Regex;

/// A compiled query. The variant is selected once, at compile time,
/// not per line.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Valid regular expression.
    Regex(Regex),
    /// Fallback: the original query, lowercased, matched as a substring.
    Literal(String),
}

impl Matcher {
    /// Compile `query`. Infallible by design: invalid regex syntax
    /// degrades to a literal matcher over the raw query string.
    pub fn compile(query: &str) -> Matcher {
        match Regex::new(query) {
            Ok(re) => Matcher::Regex(re),
            Err(_) => {
                tracing::debug!(query, "not a valid regex; matching as literal text");
                Matcher::Literal(query.to_lowercase())
            }
        }
    }

    /// All matches within `line` as `(start, end)` byte spans, ordered by
    /// increasing start. Regex matches are non-overlapping as reported by
    /// the regex engine. Literal matches resume one byte past the previous
    /// match *start*, so overlapping occurrences are all reported.
    pub fn find_all(&self, line: &str) -> Vec<(usize, usize)> {
        match self {
            Matcher::Regex(re) => re.find_iter(line).map(|m| (m.start(), m.end())).collect(),
            Matcher::Literal(needle) => find_literal(line, needle),
        }
    }

    /// True if the query fell back to literal matching.
    pub fn is_literal(&self) -> bool {
        matches!(self, Matcher::Literal(_))
    }
}

/// Case-insensitive substring scan. `needle` must already be lowercased.
///
/// Offsets are reported against the lowercased copy of the line; for ASCII
/// text (and any text whose lowercasing preserves byte length) they are
/// exact offsets into the original line.
fn find_literal(line: &str, needle: &str) -> Vec<(usize, usize)> {
    if needle.is_empty() {
        return Vec::new();
    }
    let haystack = line.to_lowercase();
    let finder = Finder::new(needle.as_bytes());
    let bytes = haystack.as_bytes();

    let mut spans = Vec::new();
    let mut from = 0usize;
    while from < bytes.len() {
        match finder.find(&bytes[from..]) {
            Some(pos) => {
                let start = from + pos;
                spans.push((start, start + needle.len()));
                from = start + 1;
            }
            None => break,
        }
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_regex_compiles_to_regex_variant() {
        let m = Matcher::compile(r"fn \w+");
        assert!(!m.is_literal());
        assert_eq!(m.find_all("fn main() { fn_ptr }"), vec![(0, 7)]);
    }

    #[test]
    fn test_invalid_regex_falls_back_to_literal() {
        let m = Matcher::compile("[invalid");
        assert!(m.is_literal());
        assert_eq!(m.find_all("see [invalid token"), vec![(4, 12)]);
    }

    #[test]
    fn test_literal_is_case_insensitive() {
        let m = Matcher::compile("hello(");
        assert!(m.is_literal());
        assert_eq!(m.find_all("HELLO( and Hello("), vec![(0, 6), (11, 17)]);
    }

    #[test]
    fn test_literal_overlapping_occurrences_scan_past_start() {
        let m = Matcher::Literal("aa".to_string());
        // "aaa" contains "aa" at 0 and 1 when resuming past the match start.
        assert_eq!(m.find_all("aaa"), vec![(0, 2), (1, 3)]);
    }

    #[test]
    fn test_literal_multiple_occurrences_ordered() {
        let m = Matcher::Literal("lo".to_string());
        let spans = m.find_all("lo lo lo");
        assert_eq!(spans, vec![(0, 2), (3, 5), (6, 8)]);
    }

    #[test]
    fn test_regex_matches_are_non_overlapping_and_ordered() {
        let m = Matcher::compile("a+");
        let spans = m.find_all("aa b aaa");
        assert_eq!(spans, vec![(0, 2), (5, 8)]);
        for w in spans.windows(2) {
            assert!(w[0].1 <= w[1].0, "regex spans overlap: {:?}", w);
        }
    }

    #[test]
    fn test_empty_query_matches_nothing_as_literal() {
        let m = Matcher::Literal(String::new());
        assert!(m.find_all("anything").is_empty());
    }

    #[test]
    fn test_no_match_returns_empty() {
        let m = Matcher::compile("needle");
        assert!(m.find_all("haystack without it").is_empty());
    }
}

// ─── Property-based tests (proptest) ─────────────────────────────────
