//! Line matcher: scans one candidate file and emits match records.

use std::io;
use std::path::Path;

use crate::pattern::Matcher;
use crate::{SearchResult, read_file_lossy};

/// Scan `rel_path` (relative to `root`) line by line with the compiled
/// matcher. Every `(start, end)` span becomes one [`SearchResult`] with a
/// 1-based line number and `column = start + 1`.
///
/// An open/read failure is returned to the caller, which treats it as
/// "this file contributes no results" — never as a fatal search error.
pub fn scan_file(root: &Path, rel_path: &Path, matcher: &Matcher) -> io::Result<Vec<SearchResult>> {
    let (content, was_lossy) = read_file_lossy(&root.join(rel_path))?;
    if was_lossy {
        tracing::debug!(path = %rel_path.display(), "lossy UTF-8 conversion while scanning");
    }

    let mut results = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        for (start, _end) in matcher.find_all(line) {
            results.push(SearchResult {
                file: rel_path.to_path_buf(),
                line: idx + 1,
                column: start + 1,
                content: line.to_string(),
            });
        }
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn write_and_scan(content: &str, query: &str) -> Vec<SearchResult> {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("f.txt"), content).unwrap();
        let matcher = Matcher::compile(query);
        scan_file(dir.path(), Path::new("f.txt"), &matcher).unwrap()
    }

    #[test]
    fn test_single_match_fields() {
        let results = write_and_scan("first\nhello world\nlast\n", "hello");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].file, PathBuf::from("f.txt"));
        assert_eq!(results[0].line, 2);
        assert_eq!(results[0].column, 1);
        assert_eq!(results[0].content, "hello world");
    }

    #[test]
    fn test_multiple_occurrences_per_line_increasing_columns() {
        let results = write_and_scan("foo bar foo baz foo\n", "foo");
        assert_eq!(results.len(), 3);
        let columns: Vec<usize> = results.iter().map(|r| r.column).collect();
        assert_eq!(columns, vec![1, 9, 17]);
        for r in &results {
            assert_eq!(r.line, 1);
            // column points at a valid occurrence start
            assert!(r.content[r.column - 1..].starts_with("foo"));
        }
    }

    #[test]
    fn test_results_ordered_by_line_then_column() {
        let results = write_and_scan("b a\na a\n", "a");
        let positions: Vec<(usize, usize)> = results.iter().map(|r| (r.line, r.column)).collect();
        assert_eq!(positions, vec![(1, 3), (2, 1), (2, 3)]);
    }

    #[test]
    fn test_crlf_lines_have_no_trailing_cr() {
        let results = write_and_scan("one\r\ntwo match\r\n", "match");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].content, "two match");
    }

    #[test]
    fn test_regex_query_spans() {
        let results = write_and_scan("abc 123 xyz 456\n", r"\d+");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].column, 5);
        assert_eq!(results[1].column, 13);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let matcher = Matcher::compile("x");
        assert!(scan_file(dir.path(), Path::new("gone.txt"), &matcher).is_err());
    }

    #[test]
    fn test_no_matches_yields_empty_vec() {
        let results = write_and_scan("nothing here\n", "absent");
        assert!(results.is_empty());
    }
}
