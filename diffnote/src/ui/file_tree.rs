//! File list panel renderer for diffnote.
//!
//! Each entry shows a status badge (M/A/D/R), the path, `+N/-N` change counts
//! and the number of comments anchored in the file. The file holding the
//! cursor is selected.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState},
};

use diffnote_core::diff::{FileDiff, FileStatus};

use crate::app::AppState;
use crate::theme::Theme;
use crate::ui::layout::panel_block;

/// Paths longer than this are shortened from the left.
const MAX_PATH_CHARS: usize = 28;

/// Renders the file-list left panel.
///
/// # Arguments
///
/// * `frame` — current render frame
/// * `area` — the `Rect` for the left panel (includes borders)
/// * `state` — read-only app state
/// * `theme` — active color theme
pub fn render_file_list(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let files = state.session.model().files();
    let title = if files.is_empty() {
        "Files".to_owned()
    } else {
        format!("Files ({})", files.len())
    };
    let block = panel_block(title, false, theme);

    let items: Vec<ListItem> = if files.is_empty() {
        vec![ListItem::new(Line::raw("No files"))]
    } else {
        let comments = state.session.comments();
        files
            .iter()
            .map(|f| file_item(f, comments.count_for_file(&f.path), theme))
            .collect()
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(theme.border_active).add_modifier(Modifier::BOLD));
    let mut list_state = ListState::default().with_selected(state.session.navigation().file_index());

    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Converts a file into a styled ListItem.
///
/// Format: `[M] src/main.rs  +42 -7  ●2`.
fn file_item(file: &FileDiff, comments: usize, theme: &Theme) -> ListItem<'static> {
    let badge_color = match file.status {
        FileStatus::Added => theme.file_added,
        FileStatus::Deleted => theme.file_removed,
        FileStatus::Renamed => theme.file_renamed,
        FileStatus::Modified => theme.file_modified,
    };
    let mut spans = vec![
        Span::styled(format!("[{}] ", file.status.badge()), Style::default().fg(badge_color)),
        Span::raw(shorten_path(&file.path, MAX_PATH_CHARS)),
    ];

    if file.binary {
        spans.push(Span::styled("  binary", Style::default().fg(theme.gutter)));
    } else if file.additions() > 0 || file.deletions() > 0 {
        spans.push(Span::styled(
            format!("  +{} -{}", file.additions(), file.deletions()),
            Style::default().fg(theme.gutter),
        ));
    }
    if comments > 0 {
        spans.push(Span::styled(
            format!("  ●{comments}"),
            Style::default().fg(theme.comment_marker),
        ));
    }
    ListItem::new(Line::from(spans))
}

/// Keeps the last `max - 3` characters behind a `...` prefix.
fn shorten_path(path: &str, max: usize) -> String {
    let len = path.chars().count();
    if len <= max {
        return path.to_owned();
    }
    let tail: String = path.chars().skip(len - (max - 3)).collect();
    format!("...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_paths_are_unchanged() {
        assert_eq!(shorten_path("src/main.rs", 28), "src/main.rs");
    }

    #[test]
    fn long_paths_keep_their_tail() {
        let shortened = shorten_path("crates/very/deeply/nested/module/file.rs", 20);
        assert_eq!(shortened.chars().count(), 20);
        assert!(shortened.starts_with("..."));
        assert!(shortened.ends_with("module/file.rs"));
    }

    #[test]
    fn multibyte_paths_do_not_split_characters() {
        let shortened = shorten_path("docs/日本語/ドキュメント/説明書.md", 10);
        assert_eq!(shortened.chars().count(), 10);
        assert!(shortened.ends_with("説明書.md"));
    }
}
