//! Preview builder: context window around one match, formatted for display.
//!
//! Previews are best-effort UI content, never typed errors: an unreadable
//! file or an empty window produces a fixed sentinel string instead.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::SearchResult;
use crate::highlight;

/// Context radius used by the interactive UI.
pub const DEFAULT_CONTEXT: usize = 2;

const COULD_NOT_OPEN: &str = "Could not open preview";
const NO_PREVIEW: &str = "No preview available";

/// Render the context window around `result`: lines
/// `max(1, line - context) ..= line + context`, clipped to the file.
///
/// Each row is a 2-character marker (`"> "` on the matched line), a
/// 4-character right-aligned line number, a separator, then the line text
/// run through the highlighter. Reads at most `line + context` lines and
/// closes the file on every exit path.
pub fn preview(root: &Path, result: &SearchResult, context: usize) -> String {
    let file = match File::open(root.join(&result.file)) {
        Ok(f) => f,
        Err(_) => return COULD_NOT_OPEN.to_string(),
    };

    let start = result.line.saturating_sub(context).max(1);
    let end = result.line + context;

    let mut rows = Vec::with_capacity(end - start + 1);
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line_num = idx + 1;
        if line_num > end {
            break;
        }
        let line = match line {
            Ok(l) => l,
            // Undecodable or truncated read: keep whatever we already have.
            Err(_) => break,
        };
        if line_num < start {
            continue;
        }

        let marker = if line_num == result.line { "> " } else { "  " };
        let text = highlight::highlight(&result.file, line.trim_end_matches('\r'));
        rows.push(format!("{marker}{line_num:>4} | {text}"));
    }

    if rows.is_empty() {
        return NO_PREVIEW.to_string();
    }
    rows.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn result_at(file: &str, line: usize) -> SearchResult {
        SearchResult {
            file: PathBuf::from(file),
            line,
            column: 1,
            content: String::new(),
        }
    }

    fn five_line_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("f.txt"), "one\ntwo\nthree\nfour\nfive\n").unwrap();
        dir
    }

    #[test]
    fn test_window_centers_on_match() {
        let dir = five_line_dir();
        let out = preview(dir.path(), &result_at("f.txt", 3), 2);
        assert_eq!(
            out,
            "     1 | one\n     2 | two\n>    3 | three\n     4 | four\n     5 | five"
        );
    }

    #[test]
    fn test_window_clipped_at_file_start() {
        let dir = five_line_dir();
        let out = preview(dir.path(), &result_at("f.txt", 1), 2);
        let lines: Vec<&str> = out.lines().collect();
        // Never a line <= 0: window is 1..=3.
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with(">    1 | "));
        assert!(lines[2].contains("3 | three"));
    }

    #[test]
    fn test_window_clipped_at_file_end() {
        let dir = five_line_dir();
        let out = preview(dir.path(), &result_at("f.txt", 5), 2);
        let lines: Vec<&str> = out.lines().collect();
        // Window is 3..=5; nothing past the last line.
        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with(">    5 | "));
    }

    #[test]
    fn test_marker_only_on_matched_line() {
        let dir = five_line_dir();
        let out = preview(dir.path(), &result_at("f.txt", 3), 1);
        let markers: Vec<bool> = out.lines().map(|l| l.starts_with("> ")).collect();
        assert_eq!(markers, vec![false, true, false]);
    }

    #[test]
    fn test_missing_file_sentinel() {
        let dir = tempfile::tempdir().unwrap();
        let out = preview(dir.path(), &result_at("gone.txt", 1), 2);
        assert_eq!(out, COULD_NOT_OPEN);
    }

    #[test]
    fn test_empty_file_sentinel() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("empty.txt"), "").unwrap();
        let out = preview(dir.path(), &result_at("empty.txt", 1), 2);
        assert_eq!(out, NO_PREVIEW);
    }

    #[test]
    fn test_match_past_end_of_file_sentinel() {
        // File shrank between search and preview.
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("short.txt"), "only\n").unwrap();
        let out = preview(dir.path(), &result_at("short.txt", 9), 2);
        assert_eq!(out, NO_PREVIEW);
    }

    #[test]
    fn test_zero_context_single_row() {
        let dir = five_line_dir();
        let out = preview(dir.path(), &result_at("f.txt", 2), 0);
        assert_eq!(out, ">    2 | two");
    }
}
