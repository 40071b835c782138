//! Keybinding dispatcher for diffnote.
//!
//! Translates crossterm key and mouse events into session [`Input`]s and returns
//! a `KeyAction` telling the event loop whether to continue or quit. The help
//! overlay is UI-only and handled here; every other key goes through the
//! session, which decides what it means in its current mode.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use diffnote_core::session::Input;

use crate::app::AppState;

/// Rows moved per mouse-wheel notch.
pub const WHEEL_ROWS: isize = 3;

/// Control-flow signal returned from the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Keep running the event loop.
    Continue,
    /// The session has finished; export and exit.
    Quit,
}

/// Dispatches a key event according to the help overlay and session mode.
///
/// # Arguments
///
/// * `key`   — the raw crossterm key event (code + modifiers)
/// * `state` — mutable reference to all UI state
pub fn handle_key(key: KeyEvent, state: &mut AppState) -> KeyAction {
    if state.help_visible {
        return handle_help(key, state);
    }
    if state.is_editing() {
        return dispatch(editing_input(key), state);
    }
    if key.code == KeyCode::Char('?') {
        state.toggle_help();
        return KeyAction::Continue;
    }
    let page = state.page_rows();
    dispatch(navigation_input(key, page), state)
}

fn dispatch(input: Option<Input>, state: &mut AppState) -> KeyAction {
    match input {
        Some(input) if state.apply(input).is_quit() => KeyAction::Quit,
        _ => KeyAction::Continue,
    }
}

// ---------------------------------------------------------------------------
// Navigating
// ---------------------------------------------------------------------------

/// Maps a key pressed while navigating to a session input.
///
/// Returns `None` for unbound keys.
///
/// # Arguments
///
/// * `key`  — the raw crossterm key event
/// * `page` — rows per PageUp / PageDown
pub fn navigation_input(key: KeyEvent, page: usize) -> Option<Input> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let input = match key.code {
        KeyCode::Char('c') if ctrl => Input::Quit,
        KeyCode::Char('f') if ctrl => Input::Page { direction: 1, size: page },
        KeyCode::Char('b') if ctrl => Input::Page { direction: -1, size: page },
        _ if ctrl => return None,

        KeyCode::Up | KeyCode::Char('k') => Input::Move(-1),
        KeyCode::Down | KeyCode::Char('j') => Input::Move(1),
        KeyCode::PageUp => Input::Page { direction: -1, size: page },
        KeyCode::PageDown => Input::Page { direction: 1, size: page },
        KeyCode::Home | KeyCode::Char('g') => Input::First,
        KeyCode::End | KeyCode::Char('G') => Input::Last,
        KeyCode::Char('[') => Input::PrevHunk,
        KeyCode::Char(']') => Input::NextHunk,
        KeyCode::Char('{') => Input::PrevFile,
        KeyCode::Char('}') => Input::NextFile,

        KeyCode::Char('c') => Input::Create,
        KeyCode::Char('e') => Input::Edit,
        KeyCode::Char('d') => Input::Delete,
        KeyCode::Char('q') => Input::Quit,
        _ => return None,
    };
    Some(input)
}

// ---------------------------------------------------------------------------
// Editing
// ---------------------------------------------------------------------------

/// Maps a key pressed while editing a comment to a session input.
///
/// Printable characters (with or without Shift) are inserted verbatim.
pub fn editing_input(key: KeyEvent) -> Option<Input> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let input = match key.code {
        KeyCode::Char('c') if ctrl => Input::Cancel,
        KeyCode::Char(c) if !ctrl && !alt => Input::Insert(c),
        KeyCode::Enter => Input::Confirm,
        KeyCode::Esc => Input::Cancel,
        KeyCode::Backspace => Input::Backspace,
        KeyCode::Delete => Input::DeleteForward,
        KeyCode::Left => Input::CursorLeft,
        KeyCode::Right => Input::CursorRight,
        KeyCode::Home => Input::CursorHome,
        KeyCode::End => Input::CursorEnd,
        _ => return None,
    };
    Some(input)
}

// ---------------------------------------------------------------------------
// Help overlay
// ---------------------------------------------------------------------------

/// Handles a key while the help overlay is visible.
///
/// `?`, `Esc` and `q` close the overlay; j/k scroll it. Nothing reaches the
/// session.
fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => state.scroll_help(1),
        KeyCode::Char('k') | KeyCode::Up => state.scroll_help(-1),
        KeyCode::Char('g') | KeyCode::Home => state.help_scroll = 0,
        KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc => state.toggle_help(),
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// Mouse events
// ---------------------------------------------------------------------------

/// Handles a mouse event: the wheel moves the cursor (or scrolls the help).
///
/// # Arguments
///
/// * `mouse` — the crossterm mouse event
/// * `state` — mutable reference to all UI state
pub fn handle_mouse(mouse: MouseEvent, state: &mut AppState) -> KeyAction {
    let delta = match mouse.kind {
        MouseEventKind::ScrollUp => -WHEEL_ROWS,
        MouseEventKind::ScrollDown => WHEEL_ROWS,
        _ => return KeyAction::Continue,
    };
    if state.help_visible {
        state.scroll_help(delta as i32);
        KeyAction::Continue
    } else {
        dispatch(Some(Input::Move(delta)), state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crossterm::event::KeyEventState;
    use diffnote_core::diff::{parse_diff, MalformedPolicy};
    use diffnote_core::session::{Mode, ReviewSession};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn state() -> AppState {
        let text = "--- a/f.txt\n+++ b/f.txt\n@@ -1,2 +1,2 @@\n keep\n-old\n+new\n";
        let model = parse_diff(text, MalformedPolicy::Abort).unwrap().model;
        AppState::new(ReviewSession::new(model), Vec::new(), None)
    }

    #[test]
    fn navigation_keys_map_to_inputs() {
        assert_eq!(navigation_input(key(KeyCode::Char('j')), 10), Some(Input::Move(1)));
        assert_eq!(navigation_input(key(KeyCode::Up), 10), Some(Input::Move(-1)));
        assert_eq!(
            navigation_input(key(KeyCode::PageDown), 10),
            Some(Input::Page { direction: 1, size: 10 })
        );
        assert_eq!(
            navigation_input(ctrl('b'), 7),
            Some(Input::Page { direction: -1, size: 7 })
        );
        assert_eq!(navigation_input(key(KeyCode::Char('G')), 10), Some(Input::Last));
        assert_eq!(navigation_input(key(KeyCode::Char('}')), 10), Some(Input::NextFile));
        assert_eq!(navigation_input(key(KeyCode::Char('c')), 10), Some(Input::Create));
        assert_eq!(navigation_input(ctrl('c'), 10), Some(Input::Quit));
        assert_eq!(navigation_input(ctrl('d'), 10), None);
        assert_eq!(navigation_input(key(KeyCode::Char('x')), 10), None);
    }

    #[test]
    fn editing_keys_map_to_inputs() {
        assert_eq!(editing_input(key(KeyCode::Char('q'))), Some(Input::Insert('q')));
        assert_eq!(
            editing_input(KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT)),
            Some(Input::Insert('Q'))
        );
        assert_eq!(editing_input(key(KeyCode::Enter)), Some(Input::Confirm));
        assert_eq!(editing_input(key(KeyCode::Esc)), Some(Input::Cancel));
        assert_eq!(editing_input(ctrl('c')), Some(Input::Cancel));
        assert_eq!(editing_input(key(KeyCode::Delete)), Some(Input::DeleteForward));
        assert_eq!(editing_input(ctrl('x')), None);
        assert_eq!(editing_input(key(KeyCode::Tab)), None);
    }

    #[test]
    fn comment_round_trip_through_keys() {
        let mut state = state();
        assert_eq!(handle_key(key(KeyCode::Char('c')), &mut state), KeyAction::Continue);
        assert!(state.is_editing());
        for c in "q?d".chars() {
            handle_key(key(KeyCode::Char(c)), &mut state);
        }
        handle_key(key(KeyCode::Enter), &mut state);

        assert_eq!(state.session.mode(), &Mode::Navigating);
        let comments = state.session.comments().sorted();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].content, "q?d");
    }

    #[test]
    fn help_overlay_swallows_keys() {
        let mut state = state();
        handle_key(key(KeyCode::Char('?')), &mut state);
        assert!(state.help_visible);

        let position = state.session.navigation().position();
        handle_key(key(KeyCode::Char('j')), &mut state);
        assert_eq!(state.help_scroll, 1);
        assert_eq!(state.session.navigation().position(), position);

        assert_eq!(handle_key(key(KeyCode::Char('q')), &mut state), KeyAction::Continue);
        assert!(!state.help_visible);
        assert!(!state.session.is_finished());
    }

    #[test]
    fn q_quits_only_while_navigating() {
        let mut state = state();
        handle_key(key(KeyCode::Char('e')), &mut state);
        assert_eq!(handle_key(key(KeyCode::Char('q')), &mut state), KeyAction::Continue);
        handle_key(key(KeyCode::Esc), &mut state);
        assert_eq!(handle_key(key(KeyCode::Char('q')), &mut state), KeyAction::Quit);
        assert!(state.session.is_finished());
    }

    #[test]
    fn wheel_moves_three_rows() {
        let mut state = state();
        let mouse = |kind| MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse(mouse(MouseEventKind::ScrollUp), &mut state);
        assert_eq!(state.session.navigation().position(), 0);
        handle_mouse(mouse(MouseEventKind::ScrollDown), &mut state);
        assert_eq!(state.session.navigation().position(), 3);
    }
}
