//! Integration tests for the review session state machine.

mod common;

use chrono::{DateTime, TimeZone, Utc};
use common::{move_to, session, type_text, MULTI_FILE, SCENARIO};
use diffnote_core::comments::Comment;
use diffnote_core::diff::{DiffModel, LineKind};
use diffnote_core::export::DEFAULT_DIFF_COMMAND;
use diffnote_core::session::{EditKind, Input, Mode, Outcome, ReviewSession};
use pretty_assertions::assert_eq;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
}

fn snapshot(session: &ReviewSession) -> Vec<Comment> {
    session.comments().sorted().into_iter().cloned().collect()
}

fn comment_on(session: &mut ReviewSession, text: &str) {
    assert_eq!(session.handle(Input::Create), Outcome::EditStarted(EditKind::Create));
    type_text(session, text);
    assert_eq!(session.handle(Input::Confirm), Outcome::Saved);
}

#[test]
fn comment_on_added_line_is_exported() {
    let mut session = session(SCENARIO);
    move_to(&mut session, |l| l.new_line_no() == Some(12));
    comment_on(&mut session, "Consider adding error handling here");

    assert_eq!(session.handle(Input::Quit), Outcome::Quit);
    assert!(session.is_finished());

    let feedback = session.finish(DEFAULT_DIFF_COMMAND, fixed_now());
    assert_eq!(feedback.diff_command, "git diff HEAD");
    assert_eq!(feedback.timestamp, "2025-03-14T09:26:53.000000Z");
    assert_eq!(feedback.comments.len(), 1);

    let comment = &feedback.comments[0];
    assert_eq!(comment.file, "web/check.js");
    assert_eq!(comment.line, 12);
    assert_eq!(comment.hunk, "@@ -10,5 +10,7 @@");
    assert_eq!(comment.content, "Consider adding error handling here");
    assert_eq!(comment.context, "return true;");
}

#[test]
fn empty_diff_quits_with_no_comments() {
    let mut session = ReviewSession::new(DiffModel::default());
    assert_eq!(session.handle(Input::Move(1)), Outcome::Moved);
    assert_eq!(session.handle(Input::Create), Outcome::NotCommentable);
    assert_eq!(session.handle(Input::Quit), Outcome::Quit);

    let feedback = session.finish(DEFAULT_DIFF_COMMAND, Utc::now());
    assert!(feedback.comments.is_empty());
    assert!(DateTime::parse_from_rfc3339(&feedback.timestamp).is_ok());
}

#[test]
fn cancel_leaves_store_untouched() {
    let mut session = session(MULTI_FILE);
    comment_on(&mut session, "existing");
    let before = snapshot(&session);

    // Cancel a fresh comment on another line.
    session.handle(Input::Move(2));
    session.handle(Input::Create);
    type_text(&mut session, "discard me");
    assert_eq!(session.handle(Input::Cancel), Outcome::Cancelled);
    assert_eq!(snapshot(&session), before);

    // Cancel an edit of the existing comment after changing its text.
    session.handle(Input::Move(-2));
    assert_eq!(session.handle(Input::Edit), Outcome::EditStarted(EditKind::Edit));
    for _ in 0..3 {
        session.handle(Input::Backspace);
    }
    type_text(&mut session, "changed");
    assert_eq!(session.handle(Input::Cancel), Outcome::Cancelled);
    assert_eq!(snapshot(&session), before);
    assert_eq!(session.mode(), &Mode::Navigating);
}

#[test]
fn edit_prefills_and_replaces() {
    let mut session = session(SCENARIO);
    comment_on(&mut session, "draft");

    session.handle(Input::Edit);
    match session.mode() {
        Mode::Editing(edit) => {
            assert_eq!(edit.kind, EditKind::Edit);
            assert_eq!(edit.buffer.text(), "draft");
            assert_eq!(edit.buffer.cursor_column(), 5);
        }
        other => panic!("expected editing, got {other:?}"),
    }
    type_text(&mut session, " v2");
    assert_eq!(session.handle(Input::Confirm), Outcome::Saved);

    let comments = snapshot(&session);
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].content, "draft v2");
}

#[test]
fn create_on_commented_line_starts_empty_and_overwrites() {
    let mut session = session(SCENARIO);
    comment_on(&mut session, "old text");

    session.handle(Input::Create);
    match session.mode() {
        Mode::Editing(edit) => assert_eq!(edit.buffer.text(), ""),
        other => panic!("expected editing, got {other:?}"),
    }
    type_text(&mut session, "new text");
    session.handle(Input::Confirm);

    let comments = snapshot(&session);
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].content, "new text");
}

#[test]
fn edit_without_comment_acts_as_create() {
    let mut session = session(SCENARIO);
    assert_eq!(session.handle(Input::Edit), Outcome::EditStarted(EditKind::Create));
}

#[test]
fn comment_actions_on_header_rows_are_no_ops() {
    let mut session = session(SCENARIO);
    session.handle(Input::First);
    assert_eq!(session.current().line().map(|l| l.kind()), Some(LineKind::FileHeader));

    assert_eq!(session.handle(Input::Create), Outcome::NotCommentable);
    assert_eq!(session.handle(Input::Edit), Outcome::NotCommentable);
    assert_eq!(session.handle(Input::Delete), Outcome::NotCommentable);
    assert_eq!(session.mode(), &Mode::Navigating);
    assert!(session.comments().is_empty());
}

#[test]
fn delete_removes_only_the_cursor_comment() {
    let mut session = session(SCENARIO);
    comment_on(&mut session, "first");
    session.handle(Input::Move(1));
    comment_on(&mut session, "second");
    assert_eq!(session.comments().len(), 2);

    assert_eq!(session.handle(Input::Delete), Outcome::Deleted);
    assert_eq!(session.handle(Input::Delete), Outcome::NothingToDelete);

    let comments = snapshot(&session);
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].content, "first");
}

#[test]
fn blank_confirm_is_a_cancel() {
    let mut session = session(SCENARIO);
    session.handle(Input::Create);
    type_text(&mut session, "   ");
    assert_eq!(session.handle(Input::Confirm), Outcome::Cancelled);
    assert!(session.comments().is_empty());
    assert_eq!(session.mode(), &Mode::Navigating);
}

#[test]
fn confirmed_content_is_trimmed() {
    let mut session = session(SCENARIO);
    session.handle(Input::Create);
    type_text(&mut session, "  spaced out \t");
    session.handle(Input::Confirm);
    assert_eq!(snapshot(&session)[0].content, "spaced out");
}

#[test]
fn navigation_keys_are_ignored_while_editing() {
    let mut session = session(SCENARIO);
    let start = session.navigation().position();
    session.handle(Input::Create);

    assert_eq!(session.handle(Input::Move(3)), Outcome::Unchanged);
    assert_eq!(session.handle(Input::NextHunk), Outcome::Unchanged);
    assert_eq!(session.handle(Input::Quit), Outcome::Unchanged);
    assert_eq!(session.navigation().position(), start);
    assert!(matches!(session.mode(), Mode::Editing(_)));
}

#[test]
fn editing_keys_are_ignored_while_navigating() {
    let mut session = session(SCENARIO);
    for input in [Input::Insert('x'), Input::Backspace, Input::Confirm, Input::Cancel] {
        assert_eq!(session.handle(input), Outcome::Unchanged);
    }
    assert!(session.comments().is_empty());
}

#[test]
fn finished_session_ignores_input() {
    let mut session = session(SCENARIO);
    session.handle(Input::Quit);
    let position = session.navigation().position();

    assert_eq!(session.handle(Input::Move(1)), Outcome::Unchanged);
    assert_eq!(session.handle(Input::Create), Outcome::Unchanged);
    assert_eq!(session.navigation().position(), position);
}

#[test]
fn movement_never_touches_comments() {
    let mut session = session(MULTI_FILE);
    comment_on(&mut session, "anchor");
    let before = snapshot(&session);

    for input in [
        Input::Move(7),
        Input::Page { direction: 1, size: 12 },
        Input::Last,
        Input::PrevHunk,
        Input::PrevFile,
        Input::NextFile,
        Input::First,
        Input::Move(-3),
    ] {
        assert_eq!(session.handle(input), Outcome::Moved);
        assert_eq!(snapshot(&session), before);
    }
}

#[test]
fn edit_buffer_moves_by_characters() {
    let mut session = session(SCENARIO);
    session.handle(Input::Create);
    type_text(&mut session, "héllo");
    session.handle(Input::CursorHome);
    session.handle(Input::CursorRight);
    session.handle(Input::DeleteForward);
    session.handle(Input::CursorEnd);
    session.handle(Input::CursorLeft);
    session.handle(Input::Backspace);
    session.handle(Input::Insert('!'));

    match session.mode() {
        Mode::Editing(edit) => {
            assert_eq!(edit.buffer.text(), "hl!o");
            assert_eq!(edit.buffer.cursor_column(), 3);
        }
        other => panic!("expected editing, got {other:?}"),
    }
}
