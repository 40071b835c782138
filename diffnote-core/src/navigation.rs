//! Flattened, cursor-addressable view over a [`DiffModel`].
//!
//! The index owns no line data: each row is a pair of indices into the model it
//! was built from, and every accessor takes that model by shared reference.
//! Cursor movement clamps at both ends and never wraps.

use crate::diff::{DiffLine, DiffModel, LineIdentity};

/// Location of one navigable row inside the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRef {
    /// Index into `DiffModel::files()`.
    pub file: usize,
    pub slot: RowSlot,
}

/// Where inside a file a row lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSlot {
    /// Index into `FileDiff::meta`.
    Meta(usize),
    /// Index into `FileDiff::hunks[hunk].lines`.
    Hunk { hunk: usize, line: usize },
}

/// What the cursor currently rests on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cursor<'m> {
    /// The diff has no rows.
    Empty,
    /// A file or hunk header: navigable but not commentable.
    Header(&'m DiffLine),
    /// A code row and its comment anchor.
    Line { line: &'m DiffLine, identity: LineIdentity },
}

impl<'m> Cursor<'m> {
    pub fn identity(&self) -> Option<&LineIdentity> {
        match self {
            Cursor::Line { identity, .. } => Some(identity),
            Cursor::Empty | Cursor::Header(_) => None,
        }
    }

    pub fn line(&self) -> Option<&'m DiffLine> {
        match self {
            Cursor::Line { line, .. } | Cursor::Header(line) => Some(*line),
            Cursor::Empty => None,
        }
    }
}

/// Moves `cursor` by `delta`, clamped to `[0, len - 1]`.
///
/// Returns 0 for an empty sequence. Pure: depends only on its arguments.
pub fn clamp_cursor(cursor: usize, len: usize, delta: isize) -> usize {
    if len == 0 {
        return 0;
    }
    let target = if delta < 0 {
        cursor.saturating_sub(delta.unsigned_abs())
    } else {
        cursor.saturating_add(delta.unsigned_abs())
    };
    target.min(len - 1)
}

/// Ordered row sequence plus the cursor position within it.
#[derive(Debug, Clone, Default)]
pub struct NavigationIndex {
    rows: Vec<RowRef>,
    /// Row index of every hunk header, ascending.
    hunk_offsets: Vec<usize>,
    /// Row index of the first row of every non-empty file, ascending.
    file_offsets: Vec<usize>,
    cursor: usize,
}

impl NavigationIndex {
    /// Flattens `model` file by file: metadata rows, then each hunk's rows
    /// (header first).
    ///
    /// The cursor starts on the first commentable row, or row 0 if there is none.
    pub fn new(model: &DiffModel) -> Self {
        let mut rows = Vec::new();
        let mut hunk_offsets = Vec::new();
        let mut file_offsets = Vec::new();

        for (file_idx, file) in model.files().iter().enumerate() {
            let file_start = rows.len();
            rows.extend((0..file.meta.len()).map(|i| RowRef { file: file_idx, slot: RowSlot::Meta(i) }));
            for (hunk_idx, hunk) in file.hunks.iter().enumerate() {
                hunk_offsets.push(rows.len());
                rows.extend((0..hunk.lines.len()).map(|line| RowRef {
                    file: file_idx,
                    slot: RowSlot::Hunk { hunk: hunk_idx, line },
                }));
            }
            if rows.len() > file_start {
                file_offsets.push(file_start);
            }
        }

        let mut index = Self { rows, hunk_offsets, file_offsets, cursor: 0 };
        index.cursor = index.first_commentable(model).unwrap_or(0);
        index
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Current cursor row. Always 0 on an empty index.
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn rows(&self) -> &[RowRef] {
        &self.rows
    }

    /// Moves the cursor by `delta` rows, clamping at both ends.
    pub fn move_by(&mut self, delta: isize) {
        self.cursor = clamp_cursor(self.cursor, self.rows.len(), delta);
    }

    /// Moves the cursor by `direction * page_size` rows, clamping at both ends.
    pub fn page(&mut self, direction: isize, page_size: usize) {
        let size = isize::try_from(page_size).unwrap_or(isize::MAX);
        self.move_by(direction.saturating_mul(size));
    }

    pub fn first(&mut self) {
        self.cursor = 0;
    }

    pub fn last(&mut self) {
        self.cursor = self.rows.len().saturating_sub(1);
    }

    /// Jumps to the next hunk header below the cursor; stays put on the last hunk.
    pub fn next_hunk(&mut self) {
        if let Some(&row) = self.hunk_offsets.iter().find(|&&row| row > self.cursor) {
            self.cursor = row;
        }
    }

    /// Jumps to the nearest hunk header above the cursor; stays put on the first.
    pub fn prev_hunk(&mut self) {
        if let Some(&row) = self.hunk_offsets.iter().rev().find(|&&row| row < self.cursor) {
            self.cursor = row;
        }
    }

    /// Jumps to the first row of the next file; stays put in the last file.
    pub fn next_file(&mut self) {
        if let Some(&row) = self.file_offsets.iter().find(|&&row| row > self.cursor) {
            self.cursor = row;
        }
    }

    /// Jumps to the first row of the current file, or of the previous file when
    /// already there.
    pub fn prev_file(&mut self) {
        if let Some(&row) = self.file_offsets.iter().rev().find(|&&row| row < self.cursor) {
            self.cursor = row;
        }
    }

    /// Index of the file owning the cursor row, `None` on an empty index.
    pub fn file_index(&self) -> Option<usize> {
        self.rows.get(self.cursor).map(|r| r.file)
    }

    /// Resolves row `index` against the model the index was built from.
    pub fn line<'m>(&self, model: &'m DiffModel, index: usize) -> Option<&'m DiffLine> {
        let row = self.rows.get(index)?;
        let file = model.files().get(row.file)?;
        match row.slot {
            RowSlot::Meta(i) => file.meta.get(i),
            RowSlot::Hunk { hunk, line } => file.hunks.get(hunk)?.lines.get(line),
        }
    }

    /// Returns the row under the cursor and, for code rows, its identity.
    pub fn current<'m>(&self, model: &'m DiffModel) -> Cursor<'m> {
        match self.line(model, self.cursor) {
            None => Cursor::Empty,
            Some(line) => match line.identity() {
                Some(identity) => Cursor::Line { line, identity },
                None => Cursor::Header(line),
            },
        }
    }

    /// Row index of the first code row, if any.
    pub fn first_commentable(&self, model: &DiffModel) -> Option<usize> {
        (0..self.rows.len())
            .find(|&i| self.line(model, i).is_some_and(DiffLine::is_commentable))
    }
}
