//! Central application state for diffnote.
//!
//! `AppState` owns the [`ReviewSession`] plus everything that exists only for
//! display: the pre-highlighted rows, scroll offsets, cached viewport heights,
//! the help overlay and the status-bar flash message. Rendering reads it; the
//! keybinding dispatcher mutates it through [`AppState::apply`].

use std::time::{Duration, Instant};

use diffnote_core::session::{EditKind, Input, Mode, Outcome, ReviewSession};
use ratatui::text::Line;

/// How long a flash message stays in the status bar.
pub const FLASH_TTL: Duration = Duration::from_secs(3);

/// Severity of a flash message; selects its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Info,
    Warn,
}

/// A transient status-bar message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub text: String,
    pub level: FlashLevel,
    pub expires_at: Instant,
}

/// All mutable UI state passed through every render cycle.
pub struct AppState {
    pub session: ReviewSession,
    /// One styled line per navigation row.
    pub rows: Vec<Line<'static>>,

    /// First navigation row drawn in the diff panel.
    pub diff_scroll: usize,
    /// Inner height of the diff panel after borders, cached after each render.
    pub diff_viewport_height: u16,
    /// Fixed page size from config; `None` pages by the viewport height.
    pub page_size: Option<u16>,

    pub help_visible: bool,
    /// Vertical scroll offset of the help overlay.
    pub help_scroll: u16,

    pub flash: Option<Flash>,
}

impl AppState {
    /// Wraps a fresh session and its highlighted rows.
    ///
    /// # Arguments
    ///
    /// * `session` — the review session over the parsed diff
    /// * `rows` — output of `highlight::highlight_model` for the same model
    /// * `page_size` — fixed PageUp/PageDown distance, if configured
    pub fn new(session: ReviewSession, rows: Vec<Line<'static>>, page_size: Option<u16>) -> Self {
        Self {
            session,
            rows,
            diff_scroll: 0,
            diff_viewport_height: 0,
            page_size,
            help_visible: false,
            help_scroll: 0,
            flash: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.session.mode(), Mode::Editing(_))
    }

    /// Rows moved by one page.
    ///
    /// Uses the configured size, else the viewport height cached from the
    /// previous render. Never zero.
    pub fn page_rows(&self) -> usize {
        usize::from(self.page_size.unwrap_or(self.diff_viewport_height).max(1))
    }

    /// Feeds one input to the session and flashes its outcome.
    pub fn apply(&mut self, input: Input) -> Outcome {
        let outcome = self.session.handle(input);
        if let Some((text, level)) = describe(outcome) {
            self.set_flash(text, level, Instant::now());
        }
        outcome
    }

    pub fn set_flash(&mut self, text: impl Into<String>, level: FlashLevel, now: Instant) {
        self.flash = Some(Flash { text: text.into(), level, expires_at: now + FLASH_TTL });
    }

    /// Drops the flash message once it has expired. Called on every tick.
    pub fn tick(&mut self, now: Instant) {
        if self.flash.as_ref().is_some_and(|f| now >= f.expires_at) {
            self.flash = None;
        }
    }

    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
        self.help_scroll = 0;
    }

    pub fn scroll_help(&mut self, delta: i32) {
        self.help_scroll = if delta < 0 {
            self.help_scroll.saturating_sub(delta.unsigned_abs() as u16)
        } else {
            self.help_scroll.saturating_add(delta as u16)
        };
    }
}

/// Status-bar text for outcomes worth announcing.
fn describe(outcome: Outcome) -> Option<(&'static str, FlashLevel)> {
    match outcome {
        Outcome::Saved => Some(("Comment saved", FlashLevel::Info)),
        Outcome::Deleted => Some(("Comment deleted", FlashLevel::Info)),
        Outcome::Cancelled => Some(("Edit cancelled", FlashLevel::Info)),
        Outcome::NothingToDelete => Some(("No comment on this line", FlashLevel::Warn)),
        Outcome::NotCommentable => Some(("Header rows cannot be commented", FlashLevel::Warn)),
        Outcome::EditStarted(EditKind::Edit) => Some(("Editing comment", FlashLevel::Info)),
        Outcome::EditStarted(EditKind::Create)
        | Outcome::Unchanged
        | Outcome::Moved
        | Outcome::Typed
        | Outcome::Quit => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use diffnote_core::diff::{parse_diff, MalformedPolicy};

    fn state() -> AppState {
        let text = "--- a/f.txt\n+++ b/f.txt\n@@ -1 +1 @@\n-old\n+new\n";
        let model = parse_diff(text, MalformedPolicy::Abort).unwrap().model;
        AppState::new(ReviewSession::new(model), Vec::new(), None)
    }

    #[test]
    fn outcomes_flash_and_expire() {
        let mut state = state();
        state.apply(Input::First);
        assert!(state.flash.is_none());

        state.apply(Input::Delete);
        let flash = state.flash.clone().unwrap();
        assert_eq!(flash.text, "Header rows cannot be commented");
        assert_eq!(flash.level, FlashLevel::Warn);

        state.tick(flash.expires_at - Duration::from_millis(1));
        assert!(state.flash.is_some());
        state.tick(flash.expires_at);
        assert!(state.flash.is_none());
    }

    #[test]
    fn page_rows_prefers_configured_size() {
        let mut state = state();
        assert_eq!(state.page_rows(), 1);
        state.diff_viewport_height = 30;
        assert_eq!(state.page_rows(), 30);
        state.page_size = Some(10);
        assert_eq!(state.page_rows(), 10);
    }

    #[test]
    fn help_scroll_saturates() {
        let mut state = state();
        state.toggle_help();
        assert!(state.help_visible);
        state.scroll_help(-3);
        assert_eq!(state.help_scroll, 0);
        state.scroll_help(5);
        state.scroll_help(-2);
        assert_eq!(state.help_scroll, 3);
        state.toggle_help();
        assert!(!state.help_visible);
        assert_eq!(state.help_scroll, 0);
    }
}
