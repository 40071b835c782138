//! Help overlay renderer for diffnote.
//!
//! Draws a centred modal over the panels. `Clear` erases the area first, so the
//! overlay is drawn in the same `terminal.draw()` pass as everything else.

use ratatui::{
    Frame,
    layout::Constraint,
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

/// Renders the help overlay as a centred modal.
///
/// Skipped on terminals narrower than 60 columns, where the centred area would
/// be too small to read.
///
/// # Arguments
///
/// * `frame` — current render frame provided by `terminal.draw()`
/// * `theme` — active color theme (supplies `border_active` for the modal border)
/// * `help_scroll` — vertical scroll offset
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    if frame.area().width < 60 {
        return;
    }

    let overlay_area = frame
        .area()
        .centered(Constraint::Percentage(70), Constraint::Percentage(80));

    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Help  (j/k scroll, ? or Esc to close) ")
        .border_style(Style::default().fg(theme.border_active));

    frame.render_widget(
        Paragraph::new(help_text())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((help_scroll, 0)),
        overlay_area,
    );
}

fn help_text() -> Text<'static> {
    Text::from(vec![
        Line::from("Navigation"),
        Line::from("  j / k / ↓ / ↑           Move one line"),
        Line::from("  PgDn / PgUp, Ctrl-f / b  Move one page"),
        Line::from("  g / G, Home / End        First / last line"),
        Line::from("  ] / [                    Next / previous hunk"),
        Line::from("  } / {                    Next / previous file"),
        Line::from("  mouse wheel              Move three lines"),
        Line::from(""),
        Line::from("Comments"),
        Line::from("  c                        New comment on this line"),
        Line::from("  e                        Edit this line's comment"),
        Line::from("  d                        Delete this line's comment"),
        Line::from(""),
        Line::from("While editing"),
        Line::from("  Enter                    Save (an empty comment is discarded)"),
        Line::from("  Esc / Ctrl-c             Cancel"),
        Line::from("  ← / →, Home / End        Move within the text"),
        Line::from("  Backspace / Delete       Delete a character"),
        Line::from(""),
        Line::from("General"),
        Line::from("  ?                        Open / close this help"),
        Line::from("  q / Ctrl-c               Finish and write the feedback file"),
    ])
}
