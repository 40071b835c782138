//! The review session state machine.
//!
//! [`ReviewSession`] is the single object owning everything a session touches:
//! the parsed diff, the navigation index and the comment store. It is driven
//! one [`Input`] at a time; each call to [`ReviewSession::handle`] runs a whole
//! transition before returning. [`ReviewSession::finish`] consumes the session
//! and produces the exported record.
//!
//! The comment store changes only on `Delete` while navigating or `Confirm`
//! while editing. Movement and cancellation never touch it.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::comments::CommentStore;
use crate::diff::{DiffModel, LineIdentity};
use crate::export::{build_feedback, Feedback};
use crate::navigation::{Cursor, NavigationIndex};

/// A discrete user request, already decoded from whatever input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Move the cursor by a signed number of rows.
    Move(isize),
    /// Move by `direction * size` rows.
    Page { direction: isize, size: usize },
    First,
    Last,
    NextHunk,
    PrevHunk,
    NextFile,
    PrevFile,
    /// Start a new comment on the cursor line.
    Create,
    /// Edit the cursor line's comment (creates one if absent).
    Edit,
    /// Delete the cursor line's comment.
    Delete,
    /// Abandon the comment being edited.
    Cancel,
    /// Store the comment being edited.
    Confirm,
    /// End the session.
    Quit,
    Insert(char),
    Backspace,
    DeleteForward,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
}

/// Whether an edit started from scratch or from an existing comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Create,
    Edit,
}

/// Single-line text buffer with a byte-offset cursor on a char boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    text: String,
    cursor: usize,
}

impl EditBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer pre-filled with `text`, cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of characters before the cursor.
    pub fn cursor_column(&self) -> usize {
        self.text[..self.cursor].chars().count()
    }

    /// The text left of the cursor.
    pub fn before_cursor(&self) -> &str {
        &self.text[..self.cursor]
    }

    pub fn insert(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some((idx, _)) = self.text[..self.cursor].char_indices().next_back() {
            self.text.remove(idx);
            self.cursor = idx;
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.text.len() {
            self.text.remove(self.cursor);
        }
    }

    pub fn left(&mut self) {
        if let Some((idx, _)) = self.text[..self.cursor].char_indices().next_back() {
            self.cursor = idx;
        }
    }

    pub fn right(&mut self) {
        if let Some(c) = self.text[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.text.len();
    }
}

/// The in-progress edit while in [`Mode::Editing`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    pub kind: EditKind,
    pub identity: LineIdentity,
    /// Navigation row of the target line.
    pub row: usize,
    pub buffer: EditBuffer,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Navigating,
    Editing(EditState),
    /// Quit was requested; no further input is processed.
    Finished,
}

/// What a single [`ReviewSession::handle`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing changed (no-op input for the current mode).
    Unchanged,
    Moved,
    EditStarted(EditKind),
    /// The edit buffer changed.
    Typed,
    /// The edit was abandoned (explicitly, or by confirming a blank buffer).
    Cancelled,
    Saved,
    Deleted,
    /// Delete was requested on a line without a comment.
    NothingToDelete,
    /// A comment action targeted a header row or an empty diff.
    NotCommentable,
    Quit,
}

impl Outcome {
    pub fn is_quit(self) -> bool {
        self == Outcome::Quit
    }
}

/// One interactive review over a parsed diff.
#[derive(Debug, Clone)]
pub struct ReviewSession {
    model: DiffModel,
    nav: NavigationIndex,
    comments: CommentStore,
    mode: Mode,
}

impl ReviewSession {
    /// Starts a session in [`Mode::Navigating`] with an empty comment store.
    pub fn new(model: DiffModel) -> Self {
        let nav = NavigationIndex::new(&model);
        Self { model, nav, comments: CommentStore::new(), mode: Mode::Navigating }
    }

    pub fn model(&self) -> &DiffModel {
        &self.model
    }

    pub fn navigation(&self) -> &NavigationIndex {
        &self.nav
    }

    pub fn comments(&self) -> &CommentStore {
        &self.comments
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.mode, Mode::Finished)
    }

    /// The row under the cursor.
    pub fn current(&self) -> Cursor<'_> {
        self.nav.current(&self.model)
    }

    /// Applies one input and reports what happened.
    pub fn handle(&mut self, input: Input) -> Outcome {
        let outcome = match self.mode {
            Mode::Navigating => self.handle_navigating(input),
            Mode::Editing(_) => self.handle_editing(input),
            Mode::Finished => Outcome::Unchanged,
        };
        debug!(?input, ?outcome, "session input");
        outcome
    }

    fn handle_navigating(&mut self, input: Input) -> Outcome {
        match input {
            Input::Move(delta) => self.nav.move_by(delta),
            Input::Page { direction, size } => self.nav.page(direction, size),
            Input::First => self.nav.first(),
            Input::Last => self.nav.last(),
            Input::NextHunk => self.nav.next_hunk(),
            Input::PrevHunk => self.nav.prev_hunk(),
            Input::NextFile => self.nav.next_file(),
            Input::PrevFile => self.nav.prev_file(),
            Input::Create => return self.begin_edit(EditKind::Create),
            Input::Edit => return self.begin_edit(EditKind::Edit),
            Input::Delete => return self.delete_current(),
            Input::Quit => {
                self.mode = Mode::Finished;
                return Outcome::Quit;
            }
            Input::Cancel
            | Input::Confirm
            | Input::Insert(_)
            | Input::Backspace
            | Input::DeleteForward
            | Input::CursorLeft
            | Input::CursorRight
            | Input::CursorHome
            | Input::CursorEnd => return Outcome::Unchanged,
        }
        Outcome::Moved
    }

    /// Enters editing on the cursor line.
    ///
    /// `Create` always starts empty. `Edit` pre-fills from an existing comment
    /// and falls back to `Create` when the line has none.
    fn begin_edit(&mut self, requested: EditKind) -> Outcome {
        let Some(identity) = self.current().identity().cloned() else {
            return Outcome::NotCommentable;
        };
        let existing = match requested {
            EditKind::Create => None,
            EditKind::Edit => self.comments.get(&identity).map(|c| c.content.clone()),
        };
        let (kind, buffer) = match existing {
            Some(content) => (EditKind::Edit, EditBuffer::with_text(content)),
            None => (EditKind::Create, EditBuffer::new()),
        };
        self.mode = Mode::Editing(EditState { kind, identity, row: self.nav.position(), buffer });
        Outcome::EditStarted(kind)
    }

    fn delete_current(&mut self) -> Outcome {
        let Some(identity) = self.current().identity().cloned() else {
            return Outcome::NotCommentable;
        };
        match self.comments.remove(&identity) {
            Some(_) => Outcome::Deleted,
            None => Outcome::NothingToDelete,
        }
    }

    fn handle_editing(&mut self, input: Input) -> Outcome {
        match input {
            Input::Cancel => {
                self.mode = Mode::Navigating;
                Outcome::Cancelled
            }
            Input::Confirm => self.confirm_edit(),
            Input::Insert(c) => self.edit_buffer(|b| b.insert(c)),
            Input::Backspace => self.edit_buffer(EditBuffer::backspace),
            Input::DeleteForward => self.edit_buffer(EditBuffer::delete_forward),
            Input::CursorLeft => self.edit_buffer(EditBuffer::left),
            Input::CursorRight => self.edit_buffer(EditBuffer::right),
            Input::CursorHome => self.edit_buffer(EditBuffer::home),
            Input::CursorEnd => self.edit_buffer(EditBuffer::end),
            _ => Outcome::Unchanged,
        }
    }

    fn edit_buffer(&mut self, f: impl FnOnce(&mut EditBuffer)) -> Outcome {
        match &mut self.mode {
            Mode::Editing(edit) => {
                f(&mut edit.buffer);
                Outcome::Typed
            }
            _ => Outcome::Unchanged,
        }
    }

    /// Stores the trimmed buffer on the edit target.
    ///
    /// A blank buffer is treated as a cancel so an empty comment is never stored.
    fn confirm_edit(&mut self) -> Outcome {
        let Mode::Editing(edit) = std::mem::take(&mut self.mode) else {
            return Outcome::Unchanged;
        };
        let content = edit.buffer.text().trim();
        if content.is_empty() {
            return Outcome::Cancelled;
        }
        let Some(line) = self.nav.line(&self.model, edit.row) else {
            return Outcome::NotCommentable;
        };
        match self.comments.upsert(line, content) {
            Ok(_) => Outcome::Saved,
            Err(_) => Outcome::NotCommentable,
        }
    }

    /// Ends the session and builds the exported record, stamped with `now`.
    pub fn finish(self, diff_command: &str, now: DateTime<Utc>) -> Feedback {
        build_feedback(&self.comments, diff_command, now)
    }
}
