//! Integration tests for the flattened navigation index.

mod common;

use common::{parse, MULTI_FILE, SCENARIO};
use diffnote_core::diff::{DiffModel, LineKind};
use diffnote_core::navigation::{clamp_cursor, Cursor, NavigationIndex};
use pretty_assertions::assert_eq;

#[test]
fn clamp_cursor_stays_in_bounds() {
    assert_eq!(clamp_cursor(0, 0, 5), 0);
    assert_eq!(clamp_cursor(0, 0, -5), 0);
    assert_eq!(clamp_cursor(3, 5, 1), 4);
    assert_eq!(clamp_cursor(3, 5, 10), 4);
    assert_eq!(clamp_cursor(3, 5, -10), 0);
    assert_eq!(clamp_cursor(2, 5, 0), 2);
    assert_eq!(clamp_cursor(2, 5, isize::MIN), 0);
    assert_eq!(clamp_cursor(2, 5, isize::MAX), 4);
}

#[test]
fn rows_follow_file_then_hunk_order() {
    let model = parse(MULTI_FILE);
    let nav = NavigationIndex::new(&model);

    let expected: Vec<&str> = model
        .files()
        .iter()
        .flat_map(|f| f.meta.iter().chain(f.hunks.iter().flat_map(|h| h.lines.iter())))
        .map(|l| l.text())
        .collect();
    let actual: Vec<&str> = (0..nav.len())
        .map(|i| nav.line(&model, i).unwrap().text())
        .collect();
    assert_eq!(actual, expected);
    assert_eq!(nav.len(), 30);
}

#[test]
fn cursor_starts_on_first_code_row() {
    let model = parse(SCENARIO);
    let nav = NavigationIndex::new(&model);
    assert_eq!(nav.position(), 5);
    match nav.current(&model) {
        Cursor::Line { line, identity } => {
            assert_eq!(line.kind(), LineKind::Context);
            assert_eq!(identity.line, 10);
        }
        other => panic!("expected a code row, got {other:?}"),
    }
}

#[test]
fn header_rows_are_navigable_but_not_commentable() {
    let model = parse(SCENARIO);
    let mut nav = NavigationIndex::new(&model);
    nav.move_by(-1);
    let cursor = nav.current(&model);
    assert!(matches!(cursor, Cursor::Header(l) if l.kind() == LineKind::HunkHeader));
    assert!(cursor.identity().is_none());

    nav.first();
    assert!(matches!(nav.current(&model), Cursor::Header(l) if l.kind() == LineKind::FileHeader));
}

#[test]
fn empty_model_never_panics() {
    let model = DiffModel::default();
    let mut nav = NavigationIndex::new(&model);
    assert!(nav.is_empty());

    nav.move_by(1);
    nav.move_by(-1);
    nav.page(1, 20);
    nav.page(-1, 20);
    nav.first();
    nav.last();
    nav.next_hunk();
    nav.prev_hunk();
    nav.next_file();
    nav.prev_file();

    assert_eq!(nav.position(), 0);
    assert_eq!(nav.current(&model), Cursor::Empty);
    assert_eq!(nav.file_index(), None);
}

#[test]
fn arbitrary_moves_keep_cursor_in_bounds() {
    let model = parse(MULTI_FILE);
    let mut nav = NavigationIndex::new(&model);

    // Small LCG so the sequence is varied but reproducible.
    let mut seed: u64 = 0x5eed;
    for _ in 0..2_000 {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let delta = ((seed >> 33) % 81) as isize - 40;
        match (seed >> 20) % 6 {
            0 => nav.page(delta.signum(), (seed % 25) as usize),
            1 => nav.next_hunk(),
            2 => nav.prev_file(),
            _ => nav.move_by(delta),
        }
        assert!(nav.position() < nav.len(), "cursor {} escaped", nav.position());
    }
}

#[test]
fn paging_clamps_at_both_ends() {
    let model = parse(MULTI_FILE);
    let mut nav = NavigationIndex::new(&model);
    nav.first();

    nav.page(1, 10);
    assert_eq!(nav.position(), 10);
    nav.page(-1, 100);
    assert_eq!(nav.position(), 0);
    nav.page(1, usize::MAX);
    assert_eq!(nav.position(), 29);
}

#[test]
fn hunk_jumps_stop_at_first_and_last() {
    let model = parse(MULTI_FILE);
    let mut nav = NavigationIndex::new(&model);

    let mut visited = Vec::new();
    for _ in 0..3 {
        nav.next_hunk();
        visited.push(nav.position());
    }
    assert_eq!(visited, vec![15, 23, 23]);

    visited.clear();
    for _ in 0..3 {
        nav.prev_hunk();
        visited.push(nav.position());
    }
    assert_eq!(visited, vec![15, 4, 4]);
}

#[test]
fn file_jumps_land_on_file_starts() {
    let model = parse(MULTI_FILE);
    let mut nav = NavigationIndex::new(&model);
    nav.first();

    nav.next_file();
    assert_eq!((nav.position(), nav.file_index()), (11, Some(1)));
    nav.next_file();
    assert_eq!((nav.position(), nav.file_index()), (27, Some(2)));
    nav.next_file();
    assert_eq!(nav.position(), 27);

    nav.prev_file();
    nav.move_by(3);
    assert_eq!(nav.position(), 14);
    nav.prev_file();
    assert_eq!(nav.position(), 11);
    nav.prev_file();
    assert_eq!(nav.position(), 0);
}
