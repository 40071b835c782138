//! Comments panel renderer for diffnote.
//!
//! Lists every comment in export order (file, line, side). The comment on the
//! cursor line, if any, is selected.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState},
};

use diffnote_core::comments::Comment;
use diffnote_core::diff::Side;

use crate::app::AppState;
use crate::theme::Theme;
use crate::ui::layout::panel_block;

/// Renders the comments right panel.
///
/// # Arguments
///
/// * `frame` — current render frame
/// * `area` — the `Rect` for the right panel (includes borders)
/// * `state` — read-only app state
/// * `theme` — active color theme
pub fn render_comments(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let comments = state.session.comments().sorted();
    let title = if comments.is_empty() {
        "Comments".to_owned()
    } else {
        format!("Comments ({})", comments.len())
    };
    let block = panel_block(title, false, theme);

    let current = state.session.current();
    let selected = current
        .identity()
        .and_then(|id| comments.iter().position(|c| &c.identity == id));

    let items: Vec<ListItem> = if comments.is_empty() {
        vec![
            ListItem::new(Line::raw("No comments yet.")),
            ListItem::new(Line::raw("Press c on a line to add one.")),
        ]
    } else {
        comments.iter().map(|c| comment_item(c, theme)).collect()
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut list_state = ListState::default().with_selected(selected);

    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Two-line entry: `path:line` (with `(old)` for deleted lines), then the text.
fn comment_item(comment: &Comment, theme: &Theme) -> ListItem<'static> {
    let side = match comment.identity.side {
        Side::Old => " (old)",
        Side::New => "",
    };
    let location = Line::from(Span::styled(
        format!("{}:{}{side}", comment.identity.file_path, comment.identity.line),
        Style::default().fg(theme.gutter).add_modifier(Modifier::BOLD),
    ));
    let content = Line::from(Span::styled(
        format!("  {}", comment.content),
        Style::default().fg(theme.comment),
    ));
    ListItem::new(vec![location, content])
}
