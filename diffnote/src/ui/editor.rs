//! Comment edit box.
//!
//! Single-line input drawn below the panels while the session is editing. The
//! text scrolls horizontally so the terminal cursor always stays inside the box.

use ratatui::{
    Frame,
    layout::{Position, Rect},
    widgets::Paragraph,
};

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use diffnote_core::session::{EditKind, Mode};

use crate::app::AppState;
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

/// First display cell to show so `column` fits in a box `width` cells wide.
pub fn horizontal_offset(column: usize, width: usize) -> usize {
    column.saturating_sub(width.saturating_sub(1))
}

/// The part of `text` visible in a box `width` cells wide, and the cursor's
/// cell within the box.
///
/// `before_cursor` is the prefix of `text` left of the cursor. Offsets are in
/// display cells, so wide characters take two; a wide character cut by the
/// left edge is dropped whole.
pub fn visible_window<'t>(text: &'t str, before_cursor: &str, width: usize) -> (&'t str, usize) {
    let column = before_cursor.width();
    let offset = horizontal_offset(column, width);
    let mut skipped = 0;
    let mut start = text.len();
    for (idx, c) in text.char_indices() {
        if skipped >= offset {
            start = idx;
            break;
        }
        skipped += c.width().unwrap_or(0);
    }
    (&text[start..], column.saturating_sub(skipped))
}

/// Renders the edit box and places the terminal cursor in it.
///
/// Does nothing unless the session is editing.
///
/// # Arguments
///
/// * `frame` — current render frame
/// * `area` — the `Rect` reserved by `compute_layout` (index 3)
/// * `state` — read-only app state
/// * `theme` — active color theme
pub fn render_editor(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let Mode::Editing(edit) = state.session.mode() else {
        return;
    };
    let verb = match edit.kind {
        EditKind::Create => "New comment",
        EditKind::Edit => "Edit comment",
    };
    let title = format!(
        " {verb} on {}:{}  (Enter save, Esc cancel) ",
        edit.identity.file_path, edit.identity.line
    );
    frame.render_widget(panel_block(title, true, theme), area);

    let inner = inner_rect(area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }
    let (visible, cursor_x) =
        visible_window(edit.buffer.text(), edit.buffer.before_cursor(), usize::from(inner.width));
    frame.render_widget(Paragraph::new(visible), inner);

    let x = u16::try_from(cursor_x).unwrap_or(inner.width - 1).min(inner.width - 1);
    frame.set_cursor_position(Position { x: inner.x + x, y: inner.y });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_does_not_scroll() {
        assert_eq!(horizontal_offset(0, 40), 0);
        assert_eq!(horizontal_offset(39, 40), 0);
    }

    #[test]
    fn long_text_scrolls_to_keep_cursor_visible() {
        assert_eq!(horizontal_offset(40, 40), 1);
        assert_eq!(horizontal_offset(100, 40), 61);
    }

    #[test]
    fn wide_characters_take_two_cells() {
        let text = "日本語";
        let (visible, x) = visible_window(text, text, 40);
        assert_eq!(visible, text);
        assert_eq!(x, 6);

        let (visible, x) = visible_window(text, "日", 40);
        assert_eq!(visible, text);
        assert_eq!(x, 2);
    }

    #[test]
    fn wide_text_scrolls_by_cells() {
        // Cursor at cell 6 in a 4-cell box: offset 3 cuts into 本, which is
        // dropped whole.
        let text = "日本語";
        let (visible, x) = visible_window(text, text, 4);
        assert_eq!(visible, "語");
        assert_eq!(x, 2);
    }

    #[test]
    fn ascii_window_matches_offset() {
        let text = "abcdefghij";
        let (visible, x) = visible_window(text, text, 4);
        assert_eq!(visible, "hij");
        assert_eq!(x, 3);
    }

    #[test]
    fn zero_width_box_does_not_underflow() {
        assert_eq!(horizontal_offset(5, 0), 5);
    }
}
