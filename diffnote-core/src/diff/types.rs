//! Owned data types for a parsed unified diff.
//!
//! All types here are fully owned (no borrowed lifetimes) so a parsed model can
//! be stored in the session for its whole lifetime. The model is built once by
//! the parser and only ever handed out by shared reference afterwards.

use crate::error::InvalidLine;

/// The category of a single diff row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Unchanged line present on both sides (` ` marker).
    Context,
    /// Line present only after the change (`+` marker).
    Addition,
    /// Line present only before the change (`-` marker).
    Deletion,
    /// File metadata outside any hunk (`diff --git`, `index`, `---`, `+++`, ...).
    FileHeader,
    /// The `@@ -a,b +c,d @@` line opening a hunk.
    HunkHeader,
}

impl LineKind {
    /// Returns `true` for rows that can be navigated to but never commented on.
    pub fn is_header(self) -> bool {
        matches!(self, LineKind::FileHeader | LineKind::HunkHeader)
    }

    /// The unified-diff marker character for code rows, `None` for header rows.
    pub fn marker(self) -> Option<char> {
        match self {
            LineKind::Context => Some(' '),
            LineKind::Addition => Some('+'),
            LineKind::Deletion => Some('-'),
            LineKind::FileHeader | LineKind::HunkHeader => None,
        }
    }
}

/// Which version of the file a line number refers to.
///
/// `Old` sorts before `New` so a deletion and an addition sharing a number come
/// out in pre-change order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    /// The pre-change file (only pure deletions are anchored here).
    Old,
    /// The post-change file (additions and context lines).
    New,
}

/// Stable key anchoring a comment to one diff line.
///
/// Field order matters: the derived `Ord` sorts by path, then line, then side,
/// which is exactly the export order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineIdentity {
    pub file_path: String,
    pub line: u32,
    pub side: Side,
}

/// One rendered row of the diff.
///
/// Fields are private so the line-number invariant checked in [`DiffLine::new`]
/// cannot be broken after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    kind: LineKind,
    text: String,
    old_line_no: Option<u32>,
    new_line_no: Option<u32>,
    file_path: String,
    hunk_header: String,
}

impl DiffLine {
    /// Builds a row, validating that line numbers match the kind.
    ///
    /// Additions carry only `new`, deletions only `old`, context lines both and
    /// header rows neither.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidLine`] when the supplied numbers contradict `kind`.
    pub fn new(
        kind: LineKind,
        text: impl Into<String>,
        old_line_no: Option<u32>,
        new_line_no: Option<u32>,
        file_path: impl Into<String>,
        hunk_header: impl Into<String>,
    ) -> Result<Self, InvalidLine> {
        let valid = match kind {
            LineKind::Context => old_line_no.is_some() && new_line_no.is_some(),
            LineKind::Addition => old_line_no.is_none() && new_line_no.is_some(),
            LineKind::Deletion => old_line_no.is_some() && new_line_no.is_none(),
            LineKind::FileHeader | LineKind::HunkHeader => {
                old_line_no.is_none() && new_line_no.is_none()
            }
        };
        if !valid {
            return Err(InvalidLine { kind, old: old_line_no, new: new_line_no });
        }
        Ok(Self {
            kind,
            text: text.into(),
            old_line_no,
            new_line_no,
            file_path: file_path.into(),
            hunk_header: hunk_header.into(),
        })
    }

    pub fn kind(&self) -> LineKind {
        self.kind
    }

    /// Content without the leading marker; the full raw line for header rows.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn old_line_no(&self) -> Option<u32> {
        self.old_line_no
    }

    pub fn new_line_no(&self) -> Option<u32> {
        self.new_line_no
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    /// Header line of the owning hunk; empty for file metadata rows.
    pub fn hunk_header(&self) -> &str {
        &self.hunk_header
    }

    pub fn is_commentable(&self) -> bool {
        !self.kind.is_header()
    }

    /// Returns the comment anchor for this row, or `None` for header rows.
    ///
    /// The new-side number wins when present, so context lines are anchored to
    /// the post-change file and only pure deletions use the old side.
    pub fn identity(&self) -> Option<LineIdentity> {
        if self.kind.is_header() {
            return None;
        }
        let (line, side) = match (self.new_line_no, self.old_line_no) {
            (Some(n), _) => (n, Side::New),
            (None, Some(o)) => (o, Side::Old),
            (None, None) => return None,
        };
        Some(LineIdentity { file_path: self.file_path.clone(), line, side })
    }
}

/// Parsed `@@ -old_start,old_len +new_start,new_len @@` ranges.
///
/// An omitted length in the header means 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HunkRange {
    pub old_start: u32,
    pub old_len: u32,
    pub new_start: u32,
    pub new_len: u32,
}

/// One `@@` block of a file diff.
///
/// `lines[0]` is always the hunk's own [`LineKind::HunkHeader`] row; the code
/// rows follow in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    /// The raw header line, trailing whitespace trimmed.
    pub header: String,
    pub range: HunkRange,
    pub lines: Vec<DiffLine>,
}

impl Hunk {
    /// Number of rows carrying an old-side line number.
    pub fn old_count(&self) -> u32 {
        self.lines.iter().filter(|l| l.old_line_no.is_some()).count() as u32
    }

    /// Number of rows carrying a new-side line number.
    pub fn new_count(&self) -> u32 {
        self.lines.iter().filter(|l| l.new_line_no.is_some()).count() as u32
    }

    /// Returns `true` when content matches the lengths declared in the header.
    pub fn is_balanced(&self) -> bool {
        self.old_count() == self.range.old_len && self.new_count() == self.range.new_len
    }
}

/// How a file changed, derived from the git extended header lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileStatus {
    #[default]
    Modified,
    Added,
    Deleted,
    Renamed,
}

impl FileStatus {
    /// Single-character badge used by the file list (`M`, `A`, `D`, `R`).
    pub fn badge(self) -> char {
        match self {
            FileStatus::Modified => 'M',
            FileStatus::Added => 'A',
            FileStatus::Deleted => 'D',
            FileStatus::Renamed => 'R',
        }
    }
}

/// All rows belonging to one file of the diff.
///
/// Binary and mode-only changes have an empty `hunks` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub path: String,
    pub status: FileStatus,
    pub binary: bool,
    /// Metadata rows (`FileHeader` kind) in input order.
    pub meta: Vec<DiffLine>,
    pub hunks: Vec<Hunk>,
}

impl FileDiff {
    pub fn additions(&self) -> usize {
        self.code_lines().filter(|l| l.kind == LineKind::Addition).count()
    }

    pub fn deletions(&self) -> usize {
        self.code_lines().filter(|l| l.kind == LineKind::Deletion).count()
    }

    fn code_lines(&self) -> impl Iterator<Item = &DiffLine> {
        self.hunks.iter().flat_map(|h| h.lines.iter())
    }
}

/// The immutable result of parsing one diff text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffModel {
    files: Vec<FileDiff>,
}

impl DiffModel {
    pub(crate) fn from_files(files: Vec<FileDiff>) -> Self {
        Self { files }
    }

    pub fn files(&self) -> &[FileDiff] {
        &self.files
    }

    /// Returns `true` when the diff contains no files at all.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn hunk_count(&self) -> usize {
        self.files.iter().map(|f| f.hunks.len()).sum()
    }
}
