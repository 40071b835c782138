//! UI rendering module for diffnote.
//!
//! `render()` is the single entry point called by the event loop's
//! `terminal.draw()` closure. Layout arithmetic lives in `layout.rs`; each
//! panel has its own file.

mod comments;
mod diff_view;
mod editor;
mod file_tree;
mod help;
pub mod keybindings;
mod layout;

use ratatui::Frame;

use crate::app::AppState;
use crate::theme::Theme;
use layout::{compute_layout, inner_rect, render_status_bar};

/// Renders one complete frame: file list, diff, comments, editor and status bar.
///
/// The diff viewport height is written back into `state` before drawing so
/// that PageUp/PageDown on the *next* keypress move by a full panel.
///
/// # Arguments
///
/// * `frame` — current render frame provided by `terminal.draw()`
/// * `state` — mutable reference to app state (viewport height is cached here)
/// * `theme` — active color theme
pub fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let [left, center, right, editor_area, status_bar] =
        compute_layout(frame.area(), state.is_editing());

    state.diff_viewport_height = inner_rect(center).height;

    if left.width > 0 {
        file_tree::render_file_list(frame, left, state, theme);
    }
    diff_view::render_diff(frame, center, state, theme);
    if right.width > 0 {
        comments::render_comments(frame, right, state, theme);
    }
    if editor_area.height > 0 {
        editor::render_editor(frame, editor_area, state, theme);
    }
    render_status_bar(frame, status_bar, state, theme);

    // Overlay last so it draws on top of the panels.
    if state.help_visible {
        help::render_help_overlay(frame, theme, state.help_scroll);
    }
}
