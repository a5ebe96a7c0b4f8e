//! Lexical syntax highlighting for preview lines.
//!
//! A grammar is chosen by file extension, then by a shebang sniff, else the
//! line passes through untouched. Each line is parsed on its own and leaf
//! tokens are wrapped in ANSI color escapes from a fixed theme. Cosmetic
//! only: any failure at any stage returns the unmodified line, never an
//! error.

use std::path::Path;

use tree_sitter::{Language, Node, Parser};

// Fixed dark theme, 24-bit escapes.
const COLOR_KEYWORD: &str = "\x1b[38;2;199;146;234m";
const COLOR_STRING: &str = "\x1b[38;2;195;232;141m";
const COLOR_NUMBER: &str = "\x1b[38;2;247;140;108m";
const COLOR_COMMENT: &str = "\x1b[38;2;106;115;125m";
const COLOR_TYPE: &str = "\x1b[38;2;130;170;255m";
const RESET: &str = "\x1b[0m";

/// Highlight one line of `path`. Falls back to the plain line whenever no
/// grammar is identified or tokenization fails.
pub fn highlight(path: &Path, line: &str) -> String {
    if line.is_empty() {
        return String::new();
    }
    let Some(language) = language_for_path(path).or_else(|| sniff_language(line)) else {
        return line.to_string();
    };
    colorize(&language, line).unwrap_or_else(|| line.to_string())
}

/// Remove ANSI CSI escape sequences. The visible text of a highlighted
/// line is always exactly the input line.
pub fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Skip "[ ... final byte" of a CSI sequence.
            if chars.next() == Some('[') {
                for f in chars.by_ref() {
                    if ('\x40'..='\x7e').contains(&f) {
                        break;
                    }
                }
            }
            continue;
        }
        out.push(c);
    }
    out
}

fn language_for_path(path: &Path) -> Option<Language> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "rs" => Some(tree_sitter_rust::LANGUAGE.into()),
        "go" => Some(tree_sitter_go::LANGUAGE.into()),
        "py" | "pyi" => Some(tree_sitter_python::LANGUAGE.into()),
        "cs" => Some(tree_sitter_c_sharp::LANGUAGE.into()),
        // The TypeScript grammar handles plain JavaScript as well.
        "ts" | "mts" | "cts" | "js" | "mjs" | "cjs" => {
            Some(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
        }
        "tsx" | "jsx" => Some(tree_sitter_typescript::LANGUAGE_TSX.into()),
        _ => None,
    }
}

/// Content-based fallback when the extension identifies nothing.
fn sniff_language(line: &str) -> Option<Language> {
    if line.starts_with("#!") && line.contains("python") {
        return Some(tree_sitter_python::LANGUAGE.into());
    }
    None
}

fn colorize(language: &Language, line: &str) -> Option<String> {
    let mut parser = Parser::new();
    parser.set_language(language).ok()?;
    let tree = parser.parse(line, None)?;

    let mut spans: Vec<(usize, usize, &'static str)> = Vec::new();
    collect_spans(tree.root_node(), &mut spans);
    if spans.is_empty() {
        return Some(line.to_string());
    }

    let mut out = String::with_capacity(line.len() * 2);
    let mut cursor = 0usize;
    for (start, end, color) in spans {
        if start < cursor || end > line.len() {
            // Malformed span: give up on coloring this line.
            return None;
        }
        out.push_str(line.get(cursor..start)?);
        out.push_str(color);
        out.push_str(line.get(start..end)?);
        out.push_str(RESET);
        cursor = end;
    }
    out.push_str(line.get(cursor..)?);
    Some(out)
}

/// Depth-first token collection. Strings and comments are taken whole
/// (their children are quotes and content nodes); other containers recurse.
fn collect_spans(node: Node, spans: &mut Vec<(usize, usize, &'static str)>) {
    let kind = node.kind();

    let container_color = if kind.contains("comment") {
        Some(COLOR_COMMENT)
    } else if kind.contains("string") || kind.contains("char") {
        Some(COLOR_STRING)
    } else {
        None
    };
    if let Some(color) = container_color {
        if node.start_byte() < node.end_byte() {
            spans.push((node.start_byte(), node.end_byte(), color));
        }
        return;
    }

    if node.child_count() == 0 {
        if let Some(color) = classify_leaf(&node, kind) {
            if node.start_byte() < node.end_byte() {
                spans.push((node.start_byte(), node.end_byte(), color));
            }
        }
        return;
    }

    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            collect_spans(child, spans);
        }
    }
}

fn classify_leaf(node: &Node, kind: &str) -> Option<&'static str> {
    if kind.contains("number") || kind.contains("integer") || kind.contains("float") {
        return Some(COLOR_NUMBER);
    }
    if kind == "type_identifier" || kind == "primitive_type" {
        return Some(COLOR_TYPE);
    }
    // Anonymous purely-alphabetic tokens are the grammar's keywords
    // ("fn", "func", "def", "return", ...).
    if !node.is_named() && kind.chars().all(|c| c.is_ascii_alphabetic() || c == '_') {
        return Some(COLOR_KEYWORD);
    }
    None
}


// ─── Property-based tests (proptest) ─────────────────────────────────
