//! Screen rendering.
//!
//! Draws the whole frame with queued crossterm commands and one flush.
//! Preview lines may already carry ANSI color escapes from the
//! highlighter; they are passed through to the terminal and clipped by
//! visible width, never by byte length.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use tgrep::SearchResult;

use super::state::{App, Focus};

// Dark theme, same palette across every panel.
const BG_SURFACE: Color = Color::Rgb { r: 17, g: 17, b: 17 };
const BG_SURFACE_ALT: Color = Color::Rgb { r: 10, g: 10, b: 10 };
const BG_SELECTED: Color = Color::Rgb { r: 10, g: 37, b: 64 };
const FG_TEXT: Color = Color::Rgb { r: 250, g: 250, b: 250 };
const FG_MUTED: Color = Color::Rgb { r: 161, g: 161, b: 170 };
const FG_ACCENT: Color = Color::Rgb { r: 0, g: 112, b: 243 };

const MIN_WIDTH: u16 = 70;
const MIN_HEIGHT: u16 = 18;

const QUERY_HINT: &str = "Type a regex or plain text and press Enter";
const HELP_LINE: &str = "Tab switch input | Enter search | Up/Down move | Esc quit";

pub fn draw<W: Write>(out: &mut W, app: &App) -> io::Result<()> {
    queue!(out, ResetColor, Clear(ClearType::All), MoveTo(0, 0))?;

    if app.width < MIN_WIDTH || app.height < MIN_HEIGHT {
        queue!(
            out,
            Print(format!("Terminal too small. Resize to at least {MIN_WIDTH}x{MIN_HEIGHT}."))
        )?;
        return out.flush();
    }

    let width = app.width as usize;

    bar(out, 0, width, BG_SURFACE, FG_TEXT, true, " tgrep  -  fast local search")?;

    title(out, 2, app.focus == Focus::Query, "Query")?;
    input_line(out, 3, width, &app.query, QUERY_HINT, app.focus == Focus::Query)?;
    title(out, 4, app.focus == Focus::Files, "Files (glob)")?;
    input_line(out, 5, width, &app.file_query, "*", app.focus == Focus::Files)?;

    let files_shown = if app.file_query.is_empty() { "*" } else { &app.file_query };
    let status = if app.searching {
        format!("searching recursively in cwd (files: {files_shown})...")
    } else {
        format!("cwd: .   files: {files_shown}   results: {}", app.results.len())
    };
    bar(out, 6, width, BG_SURFACE, FG_MUTED, false, &status)?;

    let body_top: u16 = 8;
    let results_width = (width * 62 / 100).max(32);
    let preview_width = width.saturating_sub(results_width + 1).max(24);
    draw_results(out, app, body_top, results_width)?;
    draw_preview(out, app, body_top, results_width as u16 + 1, preview_width)?;

    let footer = match &app.error {
        Some(err) => format!("error: {err}"),
        None => HELP_LINE.to_string(),
    };
    bar(out, app.height - 1, width, BG_SURFACE, FG_MUTED, false, &footer)?;

    out.flush()
}

fn draw_results<W: Write>(out: &mut W, app: &App, top: u16, panel_width: usize) -> io::Result<()> {
    bar_at(out, 0, top, panel_width, BG_SURFACE, FG_TEXT, true, &format_columns("File", "Line", "Col", "Snippet", panel_width))?;

    if app.results.is_empty() {
        queue!(
            out,
            MoveTo(0, top + 1),
            SetForegroundColor(FG_MUTED),
            Print("No matches yet"),
            ResetColor
        )?;
        return Ok(());
    }

    let start = app.list_offset.min(app.results.len() - 1);
    let end = (start + app.visible_rows()).min(app.results.len());
    for (row, i) in (start..end).enumerate() {
        let bg = if i == app.selected {
            BG_SELECTED
        } else if row % 2 == 1 {
            BG_SURFACE
        } else {
            BG_SURFACE_ALT
        };
        let text = format_row(&app.results[i], panel_width);
        bar_at(out, 0, top + 1 + row as u16, panel_width, bg, FG_TEXT, false, &text)?;
    }
    Ok(())
}

fn draw_preview<W: Write>(
    out: &mut W,
    app: &App,
    top: u16,
    x: u16,
    panel_width: usize,
) -> io::Result<()> {
    bar_at(out, x, top, panel_width, BG_SURFACE, FG_TEXT, true, "Preview")?;

    let max_lines = app.panel_height().saturating_sub(1);
    for (i, line) in app.preview.lines().take(max_lines).enumerate() {
        queue!(
            out,
            MoveTo(x, top + 1 + i as u16),
            SetForegroundColor(FG_TEXT),
            Print(clip_visible(line, panel_width)),
            ResetColor
        )?;
    }
    Ok(())
}

fn title<W: Write>(out: &mut W, row: u16, focused: bool, text: &str) -> io::Result<()> {
    let fg = if focused { FG_ACCENT } else { FG_MUTED };
    queue!(
        out,
        MoveTo(0, row),
        SetForegroundColor(fg),
        SetAttribute(Attribute::Bold),
        Print(text),
        SetAttribute(Attribute::Reset),
        ResetColor
    )
}

fn input_line<W: Write>(
    out: &mut W,
    row: u16,
    width: usize,
    value: &str,
    hint: &str,
    focused: bool,
) -> io::Result<()> {
    let marker_fg = if focused { FG_ACCENT } else { FG_MUTED };
    queue!(
        out,
        MoveTo(0, row),
        SetBackgroundColor(BG_SURFACE_ALT),
        SetForegroundColor(marker_fg),
        Print("> ")
    )?;
    if value.is_empty() && !focused {
        queue!(out, SetForegroundColor(FG_MUTED), Print(pad_right(hint, width.saturating_sub(2))))?;
    } else {
        let text = format!("{value}_");
        queue!(out, SetForegroundColor(FG_TEXT), Print(pad_right(&text, width.saturating_sub(2))))?;
    }
    queue!(out, ResetColor)
}

fn bar<W: Write>(
    out: &mut W,
    row: u16,
    width: usize,
    bg: Color,
    fg: Color,
    bold: bool,
    text: &str,
) -> io::Result<()> {
    bar_at(out, 0, row, width, bg, fg, bold, text)
}

#[allow(clippy::too_many_arguments)]
fn bar_at<W: Write>(
    out: &mut W,
    x: u16,
    row: u16,
    width: usize,
    bg: Color,
    fg: Color,
    bold: bool,
    text: &str,
) -> io::Result<()> {
    queue!(out, MoveTo(x, row), SetBackgroundColor(bg), SetForegroundColor(fg))?;
    if bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    queue!(out, Print(pad_right(&truncate_right(text, width), width)))?;
    if bold {
        queue!(out, SetAttribute(Attribute::Reset))?;
    }
    queue!(out, ResetColor)
}

// ─── Row formatting ──────────────────────────────────────────────────

fn column_widths(width: usize) -> (usize, usize, usize, usize) {
    let file_w = (width * 36 / 100).max(10);
    let line_w = 6;
    let col_w = 5;
    let snippet_w = width.saturating_sub(file_w + line_w + col_w + 3).max(10);
    (file_w, line_w, col_w, snippet_w)
}

fn format_columns(file: &str, line: &str, col: &str, snippet: &str, width: usize) -> String {
    let (file_w, line_w, col_w, snippet_w) = column_widths(width);
    format!(
        "{} {} {} {}",
        pad_right(file, file_w),
        pad_right(line, line_w),
        pad_right(col, col_w),
        pad_right(snippet, snippet_w)
    )
}

fn format_row(result: &SearchResult, width: usize) -> String {
    let (file_w, _, _, snippet_w) = column_widths(width);
    let file = truncate_left(&result.file.display().to_string(), file_w);
    let snippet = result.content.trim();
    let snippet = if snippet.is_empty() { " " } else { snippet };
    format_columns(
        &file,
        &result.line.to_string(),
        &result.column.to_string(),
        &truncate_right(snippet, snippet_w),
        width,
    )
}

// ─── Width-aware string helpers ──────────────────────────────────────

fn pad_right(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len() + width - len);
    out.push_str(s);
    for _ in len..width {
        out.push(' ');
    }
    out
}

fn truncate_right(s: &str, width: usize) -> String {
    if width <= 3 || s.chars().count() <= width {
        return s.to_string();
    }
    let head: String = s.chars().take(width - 3).collect();
    format!("{head}...")
}

fn truncate_left(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if width <= 3 || len <= width {
        return s.to_string();
    }
    let tail: String = s.chars().skip(len - (width - 3)).collect();
    format!("...{tail}")
}

/// Clip a line to `width` visible columns, passing ANSI escape sequences
/// through without counting them. Always closes with a reset so an open
/// color cannot bleed into the next cell.
fn clip_visible(s: &str, width: usize) -> String {
    let mut out = String::with_capacity(s.len());
    let mut visible = 0usize;
    let mut had_escape = false;
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            had_escape = true;
            out.push(c);
            if chars.peek() == Some(&'[') {
                out.push(chars.next().unwrap());
                for f in chars.by_ref() {
                    out.push(f);
                    if ('\x40'..='\x7e').contains(&f) {
                        break;
                    }
                }
            }
            continue;
        }
        if visible >= width {
            break;
        }
        out.push(c);
        visible += 1;
    }
    if had_escape {
        out.push_str("\x1b[0m");
    }
    out
}
