//! Responsive panel layout for diffnote.
//!
//! Pure layout arithmetic, recomputed inside every `terminal.draw()` so each frame
//! reflects the current terminal size.
//!
//! # Panel geometry
//!
//! At `>= 120` columns the file list, diff and comments panels are all visible
//! (22 / 53 / 25 percent). Below 120 columns both side panels collapse and the
//! diff fills the full width. While a comment is being edited a 3-row edit box
//! sits between the panels and the 1-row status bar.
//!
//! `Spacing::Overlap(1)` combined with `Block::merge_borders(MergeStrategy::Fuzzy)`
//! makes adjacent panel borders share a single column and merge their junctions.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Rect, Spacing},
    style::{Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use diffnote_core::navigation::Cursor;

use crate::app::{AppState, FlashLevel};
use crate::theme::Theme;

/// Terminal width below which the side panels collapse.
pub const WIDE_LAYOUT_MIN_WIDTH: u16 = 120;

/// Height of the comment edit box, borders included.
pub const EDITOR_HEIGHT: u16 = 3;

/// Returns `[left, center, right, editor, status_bar]` `Rect`s for the current frame.
///
/// Collapsed panels come back with zero width; the editor has zero height
/// unless `editing` is set.
///
/// # Arguments
///
/// * `area` — the full frame area
/// * `editing` — `true` while a comment is being edited
pub fn compute_layout(area: Rect, editing: bool) -> [Rect; 5] {
    let editor_height = if editing { EDITOR_HEIGHT } else { 0 };
    let [main_area, editor, status_bar] = area.layout(&Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(editor_height),
        Constraint::Length(1),
    ]));

    let horizontal = if area.width >= WIDE_LAYOUT_MIN_WIDTH {
        Layout::horizontal([
            Constraint::Percentage(22),
            Constraint::Percentage(53),
            Constraint::Percentage(25),
        ])
    } else {
        Layout::horizontal([Constraint::Length(0), Constraint::Fill(1), Constraint::Length(0)])
    }
    .spacing(Spacing::Overlap(1));

    let [left, center, right] = main_area.layout(&horizontal);
    [left, center, right, editor, status_bar]
}

/// Returns the inner `Rect` of a panel after removing the 1-cell border on each side.
///
/// # Arguments
///
/// * `area` — the outer `Rect` of the panel (including borders)
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin { vertical: 1, horizontal: 1 })
}

/// Builds a bordered `Block` for a panel.
///
/// `BorderType::Thick` marks the panel receiving input, `BorderType::Plain` the
/// rest. `MergeStrategy::Fuzzy` is required because `Exact` produces wrong
/// junctions when `Thick` and `Plain` borders meet.
///
/// # Arguments
///
/// * `title` — panel title shown in the top border
/// * `is_active` — `true` when this panel receives the keyboard input
/// * `theme` — active color theme (supplies `border_active` / `border_inactive`)
pub fn panel_block<'a>(title: impl Into<Line<'a>>, is_active: bool, theme: &Theme) -> Block<'a> {
    let border_style = if is_active {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_active { BorderType::Thick } else { BorderType::Plain };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
        .merge_borders(MergeStrategy::Fuzzy)
}

/// Renders the 1-row status bar at the bottom of the terminal.
///
/// Shows the mode, the cursor location and the comment count, followed by the
/// current flash message or a help hint.
///
/// # Arguments
///
/// * `frame` — current render frame
/// * `area` — the 1-row `Rect` returned by `compute_layout` (index 4)
/// * `state` — read-only app state
/// * `theme` — active color theme
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let (mode_text, mode_fg) = if state.is_editing() {
        (" EDIT ", theme.status_mode_insert)
    } else {
        (" NAVIGATE ", theme.status_mode_normal)
    };
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let nav = state.session.navigation();
    let location = match state.session.current() {
        Cursor::Empty => "no changes".to_owned(),
        Cursor::Header(line) => format!("{}  header", line.file_path()),
        Cursor::Line { identity, .. } => format!("{}:{}", identity.file_path, identity.line),
    };
    let count = state.session.comments().len();
    let noun = if count == 1 { "comment" } else { "comments" };

    let mut spans = vec![
        Span::styled(mode_text, bold.fg(mode_fg)),
        Span::raw(format!(" {location} ")),
        Span::raw(format!("│ {}/{} ", (nav.position() + 1).min(nav.len()), nav.len())),
        Span::raw(format!("│ {count} {noun} ")),
    ];
    match &state.flash {
        Some(flash) => {
            let color = match flash.level {
                FlashLevel::Info => theme.flash_info,
                FlashLevel::Warn => theme.flash_warn,
            };
            spans.push(Span::styled(format!("│ {}", flash.text), bold.fg(color)));
        }
        None => spans.push(Span::raw("│ ? help")),
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}
