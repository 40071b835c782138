//! Diff panel renderer for diffnote.
//!
//! Renders the centre panel with a List widget and manual virtual scrolling: only
//! the rows from `state.diff_scroll` down to the bottom of the viewport are
//! materialized per frame, so rendering is O(viewport) not O(total rows).
//!
//! Each code row gets a gutter with both line numbers, a comment marker and the
//! diff marker. A commented row is followed by one inline row showing the
//! comment text, which is why scrolling works with per-row heights.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
};

use diffnote_core::comments::CommentStore;
use diffnote_core::diff::{DiffLine, LineKind};

use crate::app::AppState;
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

/// Width of one line-number column.
const NUMBER_WIDTH: usize = 5;

/// Gutter glyph on rows that carry a comment.
const COMMENT_GLYPH: &str = "●";

/// Returns the first row to draw so that `cursor` is fully visible.
///
/// Keeps `scroll` when the cursor already fits, otherwise scrolls the minimum
/// amount. `height(i)` is the number of screen lines row `i` occupies.
///
/// # Arguments
///
/// * `scroll` — first row drawn in the previous frame
/// * `cursor` — navigation row under the cursor
/// * `viewport` — number of screen lines available
/// * `height` — screen lines used by a row (1, or 2 with an inline comment)
pub fn scroll_to_cursor(
    scroll: usize,
    cursor: usize,
    viewport: usize,
    height: impl Fn(usize) -> usize,
) -> usize {
    if scroll > cursor {
        return cursor;
    }
    let mut used = height(cursor);
    let mut earliest = cursor;
    while earliest > 0 && used + height(earliest - 1) <= viewport {
        earliest -= 1;
        used += height(earliest);
    }
    scroll.max(earliest)
}

/// Renders the diff centre panel.
///
/// Updates `state.diff_scroll` so the cursor row stays visible, then draws the
/// visible window. An empty diff shows a placeholder.
///
/// # Arguments
///
/// * `frame` — current render frame
/// * `area` — the `Rect` for the centre panel (includes borders)
/// * `state` — app state; `diff_scroll` is written back
/// * `theme` — active color theme
pub fn render_diff(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let title = match state.session.navigation().file_index() {
        Some(idx) => format!(" {} ", state.session.model().files()[idx].path),
        None => " Diff ".to_owned(),
    };
    let block = panel_block(title, !state.is_editing(), theme);
    let inner = inner_rect(area);
    let viewport = usize::from(inner.height);
    frame.render_widget(block, area);

    let session = &state.session;
    let nav = session.navigation();
    if nav.is_empty() {
        let msg = "No changes to review. Press q to finish.";
        frame.render_widget(List::new([ListItem::new(Line::raw(msg))]), inner);
        return;
    }

    let model = session.model();
    let comments = session.comments();
    let row_height = |i: usize| {
        let commented = nav
            .line(model, i)
            .and_then(DiffLine::identity)
            .is_some_and(|id| comments.contains(&id));
        1 + usize::from(commented)
    };
    let cursor = nav.position();
    let scroll = scroll_to_cursor(state.diff_scroll, cursor, viewport, row_height);

    let mut items: Vec<ListItem> = Vec::with_capacity(viewport);
    let mut row = scroll;
    while items.len() < viewport && row < nav.len() {
        let Some(line) = nav.line(model, row) else { break };
        let highlighted = state.rows.get(row).cloned().unwrap_or_else(|| Line::raw(line.text().to_owned()));
        let mut rendered = render_row(line, highlighted, comments, theme);
        if row == cursor {
            rendered = rendered.patch_style(Style::default().bg(theme.cursor_bg));
        }
        items.push(ListItem::new(rendered));

        if let Some(comment) = line.identity().and_then(|id| comments.get(&id)) {
            items.push(ListItem::new(comment_row(&comment.content, theme)));
        }
        row += 1;
    }

    frame.render_widget(List::new(items), inner);
    state.diff_scroll = scroll;
}

/// Gutter + marker + highlighted text for one row.
fn render_row<'a>(
    line: &DiffLine,
    highlighted: Line<'a>,
    comments: &CommentStore,
    theme: &Theme,
) -> Line<'a> {
    let number = |n: Option<u32>| match n {
        Some(n) => format!("{n:>NUMBER_WIDTH$}"),
        None => " ".repeat(NUMBER_WIDTH),
    };

    if line.kind().is_header() {
        let gutter = " ".repeat(NUMBER_WIDTH * 2 + 5);
        let mut spans = vec![Span::raw(gutter)];
        spans.extend(highlighted.spans);
        return Line::from(spans).style(Style::default().add_modifier(Modifier::BOLD));
    }

    let commented = line.identity().is_some_and(|id| comments.contains(&id));
    let marker_color = match line.kind() {
        LineKind::Addition => theme.diff_added,
        LineKind::Deletion => theme.diff_removed,
        _ => theme.diff_context,
    };
    let mut spans = vec![
        Span::styled(
            format!("{} {} ", number(line.old_line_no()), number(line.new_line_no())),
            Style::default().fg(theme.gutter),
        ),
        Span::styled(
            if commented { COMMENT_GLYPH } else { " " },
            Style::default().fg(theme.comment_marker),
        ),
        Span::styled(
            format!("{} ", line.kind().marker().unwrap_or(' ')),
            Style::default().fg(marker_color),
        ),
    ];
    spans.extend(highlighted.spans);
    Line::from(spans)
}

fn comment_row(content: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::raw(" ".repeat(NUMBER_WIDTH * 2 + 2)),
        Span::styled(
            format!("└─ {content}"),
            Style::default().fg(theme.comment).add_modifier(Modifier::ITALIC),
        ),
    ])
}
