//! Syntax and word-diff highlighting, computed once at startup.
//!
//! [`highlight_model`] returns one styled `Line<'static>` per navigation row, in
//! the same file → metadata → hunk order `NavigationIndex` flattens to, so the
//! diff panel can index it with a row number. The text carries no marker or
//! gutter; the diff panel adds those.
//!
//! Code rows get syntect highlighting chosen by file extension. A run of
//! deletions directly followed by a run of additions is paired line by line and
//! rendered with `similar` word-level emphasis instead.

use std::path::Path;
use std::sync::LazyLock;

use diffnote_core::diff::{DiffLine, DiffModel, Hunk, LineKind};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use similar::{ChangeTag, TextDiff};
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};

use crate::theme::Theme;

static SYNTAXES: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_nonewlines);
static THEMES: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const SYNTAX_THEME: &str = "base16-ocean.dark";

/// Builds the styled rows for the whole model.
///
/// # Arguments
///
/// * `model` — the parsed diff
/// * `theme` — active color theme (header rows and word-diff colors)
pub fn highlight_model(model: &DiffModel, theme: &Theme) -> Vec<Line<'static>> {
    let mut rows = Vec::new();
    for file in model.files() {
        let header_style = Style::default().fg(theme.diff_file_header);
        rows.extend(file.meta.iter().map(|l| Line::styled(l.text().to_owned(), header_style)));

        let syntax = syntax_for(&file.path);
        for hunk in &file.hunks {
            rows.extend(highlight_hunk(hunk, syntax, theme));
        }
    }
    rows
}

/// Picks a syntax by file extension, plain text when unknown.
fn syntax_for(path: &str) -> &'static SyntaxReference {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| SYNTAXES.find_syntax_by_extension(ext))
        .unwrap_or_else(|| SYNTAXES.find_syntax_plain_text())
}

fn highlight_hunk(hunk: &Hunk, syntax: &SyntaxReference, theme: &Theme) -> Vec<Line<'static>> {
    // Fresh highlighter per hunk: parse state does not carry across gaps.
    let mut highlighter = THEMES
        .themes
        .get(SYNTAX_THEME)
        .or_else(|| THEMES.themes.values().next())
        .map(|t| HighlightLines::new(syntax, t));

    let mut lines: Vec<Line<'static>> = hunk
        .lines
        .iter()
        .map(|line| match line.kind() {
            LineKind::HunkHeader | LineKind::FileHeader => Line::styled(
                line.text().to_owned(),
                Style::default().fg(theme.diff_hunk_header),
            ),
            kind => match highlighter.as_mut() {
                Some(h) => Line::from(syntax_spans(line.text(), h)),
                None => Line::styled(line.text().to_owned(), Style::default().fg(kind_color(kind, theme))),
            },
        })
        .collect();

    let kinds: Vec<LineKind> = hunk.lines.iter().map(DiffLine::kind).collect();
    for (old, new) in pair_changes(&kinds) {
        let (old_spans, new_spans) =
            word_diff_spans(hunk.lines[old].text(), hunk.lines[new].text(), theme);
        lines[old] = Line::from(old_spans);
        lines[new] = Line::from(new_spans);
    }
    lines
}

fn kind_color(kind: LineKind, theme: &Theme) -> Color {
    match kind {
        LineKind::Addition => theme.diff_added,
        LineKind::Deletion => theme.diff_removed,
        LineKind::Context => theme.diff_context,
        LineKind::FileHeader => theme.diff_file_header,
        LineKind::HunkHeader => theme.diff_hunk_header,
    }
}

/// Pairs each deletion run with the addition run directly after it.
///
/// Returns `(deletion_index, addition_index)` pairs; surplus lines on either
/// side stay unpaired.
pub fn pair_changes(kinds: &[LineKind]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    let mut i = 0;
    while i < kinds.len() {
        if kinds[i] != LineKind::Deletion {
            i += 1;
            continue;
        }
        let deletions = i;
        while i < kinds.len() && kinds[i] == LineKind::Deletion {
            i += 1;
        }
        let additions = i;
        while i < kinds.len() && kinds[i] == LineKind::Addition {
            i += 1;
        }
        pairs.extend((deletions..additions).zip(additions..i));
    }
    pairs
}

/// Converts a syntect (Style, &str) pair to an owned ratatui Span.
///
/// Only the foreground is kept so the cursor row background shows through.
fn syntect_to_span(style: syntect::highlighting::Style, content: &str) -> Span<'static> {
    let fg = style.foreground;
    let mut ratatui_style = Style::default();
    if fg.a > 0 {
        ratatui_style = ratatui_style.fg(Color::Rgb(fg.r, fg.g, fg.b));
    }
    if style.font_style.contains(FontStyle::BOLD) {
        ratatui_style = ratatui_style.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        ratatui_style = ratatui_style.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        ratatui_style = ratatui_style.add_modifier(Modifier::UNDERLINED);
    }
    Span::styled(content.to_owned(), ratatui_style)
}

/// Highlights one line of code. Falls back to a plain span on error.
fn syntax_spans(code: &str, h: &mut HighlightLines) -> Vec<Span<'static>> {
    let ranges = h.highlight_line(code, &SYNTAXES).unwrap_or_default();
    let spans: Vec<Span<'static>> =
        ranges.into_iter().map(|(style, text)| syntect_to_span(style, text)).collect();
    if spans.is_empty() {
        vec![Span::raw(code.to_owned())]
    } else {
        spans
    }
}

/// Computes word-level spans for a deletion/addition pair.
///
/// Changed words are bold and underlined; unchanged words use the plain diff
/// color of their side.
fn word_diff_spans(
    old_line: &str,
    new_line: &str,
    theme: &Theme,
) -> (Vec<Span<'static>>, Vec<Span<'static>>) {
    let diff = TextDiff::from_words(old_line, new_line);
    let mut old_spans: Vec<Span<'static>> = Vec::new();
    let mut new_spans: Vec<Span<'static>> = Vec::new();
    let emphasis = Modifier::BOLD | Modifier::UNDERLINED;

    for op in diff.ops() {
        for change in diff.iter_inline_changes(op) {
            for (emphasized, value) in change.iter_strings_lossy() {
                let text = value.into_owned();
                let style = |color: Color| {
                    let base = Style::default().fg(color);
                    if emphasized { base.add_modifier(emphasis) } else { base }
                };
                match change.tag() {
                    ChangeTag::Delete => {
                        old_spans.push(Span::styled(text, style(theme.diff_removed)));
                    }
                    ChangeTag::Insert => {
                        new_spans.push(Span::styled(text, style(theme.diff_added)));
                    }
                    ChangeTag::Equal => {
                        old_spans.push(Span::styled(text.clone(), style(theme.diff_removed)));
                        new_spans.push(Span::styled(text, style(theme.diff_added)));
                    }
                }
            }
        }
    }
    (old_spans, new_spans)
}
