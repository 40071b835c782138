//! Unified-diff parser.
//!
//! Scans the text line by line, tracking the current file and the current hunk.
//! Hunk content is consumed strictly against the lengths declared in the `@@`
//! header: a hunk closes when both remaining counts reach zero, and any hunk
//! whose content cannot satisfy its header is reported as a [`MalformedHunk`]
//! instead of being miscounted.

use tracing::{debug, warn};

use super::header::{clean_path, parse_diff_git_line, parse_hunk_header};
use super::types::{DiffLine, DiffModel, FileDiff, FileStatus, Hunk, HunkRange, LineKind};
use crate::error::{InvalidLine, MalformedHunk, ParseError};

/// Path used for hunks that appear before any file header.
const UNKNOWN_PATH: &str = "unknown";

/// What to do when a hunk's content does not match its header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Drop the hunk from the model and record it in [`ParsedDiff::skipped`].
    #[default]
    Skip,
    /// Fail the whole parse with [`ParseError::MalformedHunk`].
    Abort,
}

/// Result of a successful parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDiff {
    pub model: DiffModel,
    /// Hunks dropped under [`MalformedPolicy::Skip`], in input order.
    pub skipped: Vec<MalformedHunk>,
}

/// Parses unified-diff text into a [`DiffModel`].
///
/// Empty or whitespace-only input yields an empty model, not an error. Every
/// hunk in the returned model satisfies the count invariant: the number of
/// rows with an old (new) line number equals the declared old (new) length.
///
/// # Errors
///
/// Under [`MalformedPolicy::Abort`], returns [`ParseError::MalformedHunk`] for
/// the first hunk whose content contradicts its header.
pub fn parse_diff(text: &str, policy: MalformedPolicy) -> Result<ParsedDiff, ParseError> {
    let mut parser = Parser::new(policy);
    for raw in text.lines() {
        parser.feed(raw)?;
    }
    parser.finish()
}

/// A file section whose rows are still being collected.
///
/// Metadata is kept as raw text until the section closes because the final
/// path is only known once `+++` / `rename to` lines have been seen.
struct PendingFile {
    path: String,
    status: FileStatus,
    binary: bool,
    meta: Vec<String>,
    hunks: Vec<Hunk>,
    /// `true` until the first hunk header of the section.
    in_header: bool,
}

impl PendingFile {
    fn new(path: String) -> Self {
        Self {
            path,
            status: FileStatus::default(),
            binary: false,
            meta: Vec::new(),
            hunks: Vec::new(),
            in_header: true,
        }
    }

    /// Records an extended-header line, updating status and path as needed.
    fn note_metadata(&mut self, raw: &str) {
        if raw.starts_with("new file mode") {
            self.status = FileStatus::Added;
        } else if raw.starts_with("deleted file mode") {
            self.status = FileStatus::Deleted;
        } else if let Some(to) = raw.strip_prefix("rename to ") {
            self.status = FileStatus::Renamed;
            self.path = to.trim().to_owned();
        } else if raw.starts_with("rename from ") {
            self.status = FileStatus::Renamed;
        } else if raw.starts_with("Binary files ") || raw == "GIT binary patch" {
            self.binary = true;
        }
        self.meta.push(raw.to_owned());
    }

    fn into_file_diff(self) -> Result<FileDiff, InvalidLine> {
        let PendingFile { path, status, binary, meta, hunks, .. } = self;
        let meta = meta
            .into_iter()
            .map(|text| DiffLine::new(LineKind::FileHeader, text, None, None, path.as_str(), ""))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FileDiff { path, status, binary, meta, hunks })
    }
}

/// A hunk being filled against its declared lengths.
struct PendingHunk {
    header: String,
    range: HunkRange,
    lines: Vec<DiffLine>,
    old_next: u32,
    new_next: u32,
    old_left: u32,
    new_left: u32,
    /// First content line that did not fit the declared lengths.
    excess: Option<String>,
}

impl PendingHunk {
    fn is_complete(&self) -> bool {
        self.old_left == 0 && self.new_left == 0
    }

    fn mark_excess(&mut self, raw: &str) {
        if self.excess.is_none() {
            self.excess = Some(format!("content beyond declared lengths: {raw:?}"));
        }
    }

    /// Offers `raw` to the hunk as content.
    ///
    /// Returns `Ok(true)` when the line was consumed (as a row, a no-newline
    /// marker, or excess content) and `Ok(false)` when it belongs to the
    /// structural scanner.
    fn accept(&mut self, raw: &str, path: &str) -> Result<bool, InvalidLine> {
        if raw.starts_with('\\') {
            return Ok(true);
        }

        if self.is_complete() {
            let excess = match raw.as_bytes().first() {
                Some(b'+') => !raw.starts_with("+++ "),
                Some(b'-') => !raw.starts_with("--- "),
                Some(b' ') => true,
                _ => false,
            };
            if excess {
                self.mark_excess(raw);
            }
            return Ok(excess);
        }

        let (kind, text) = match raw.as_bytes().first() {
            Some(b'+') => (LineKind::Addition, &raw[1..]),
            Some(b'-') => (LineKind::Deletion, &raw[1..]),
            Some(b' ') => (LineKind::Context, &raw[1..]),
            // Editors that strip trailing whitespace turn empty context lines
            // into empty lines.
            None if self.old_left > 0 && self.new_left > 0 => (LineKind::Context, ""),
            _ => return Ok(false),
        };

        let (old, new) = match kind {
            LineKind::Deletion if self.old_left > 0 => (Some(self.old_next), None),
            LineKind::Addition if self.new_left > 0 => (None, Some(self.new_next)),
            LineKind::Context if self.old_left > 0 && self.new_left > 0 => {
                (Some(self.old_next), Some(self.new_next))
            }
            _ => {
                self.mark_excess(raw);
                return Ok(true);
            }
        };

        if old.is_some() {
            self.old_next = self.old_next.saturating_add(1);
            self.old_left -= 1;
        }
        if new.is_some() {
            self.new_next = self.new_next.saturating_add(1);
            self.new_left -= 1;
        }
        self.lines
            .push(DiffLine::new(kind, text, old, new, path, self.header.as_str())?);
        Ok(true)
    }

    /// Describes why the hunk cannot be accepted, if it cannot.
    fn problem(&self) -> Option<String> {
        if let Some(excess) = &self.excess {
            return Some(excess.clone());
        }
        if !self.is_complete() {
            return Some(format!(
                "declared -{} +{} lines, found -{} +{}",
                self.range.old_len,
                self.range.new_len,
                self.range.old_len - self.old_left,
                self.range.new_len - self.new_left,
            ));
        }
        None
    }

    fn into_hunk(self) -> Hunk {
        Hunk { header: self.header, range: self.range, lines: self.lines }
    }
}

enum HunkState {
    /// No hunk has been opened in the current file section.
    Idle,
    Open(PendingHunk),
    /// The last header was unreadable; lines are dropped until the next boundary.
    Discarding,
}

struct Parser {
    policy: MalformedPolicy,
    files: Vec<FileDiff>,
    current: Option<PendingFile>,
    hunk: HunkState,
    skipped: Vec<MalformedHunk>,
}

impl Parser {
    fn new(policy: MalformedPolicy) -> Self {
        Self {
            policy,
            files: Vec::new(),
            current: None,
            hunk: HunkState::Idle,
            skipped: Vec::new(),
        }
    }

    fn feed(&mut self, raw: &str) -> Result<(), ParseError> {
        if let HunkState::Open(hunk) = &mut self.hunk {
            let path = self.current.as_ref().map_or(UNKNOWN_PATH, |f| f.path.as_str());
            if hunk.accept(raw, path)? {
                return Ok(());
            }
        }

        // `--- ` ends the discard too: plain `diff -u` input has no other
        // marker for the next file.
        if matches!(self.hunk, HunkState::Discarding)
            && !(raw.starts_with("@@") || raw.starts_with("diff ") || raw.starts_with("--- "))
        {
            return Ok(());
        }

        if raw.starts_with("@@") {
            self.close_hunk()?;
            self.open_hunk(raw)?;
        } else if raw.starts_with("diff ") {
            self.close_file()?;
            let path = match raw.strip_prefix("diff --git ") {
                Some(rest) => parse_diff_git_line(rest),
                // `diff -ru a/x b/x`: the `+++` line refines this later.
                None => raw.split_whitespace().last().and_then(clean_path),
            };
            let mut file = PendingFile::new(path.unwrap_or_else(|| UNKNOWN_PATH.to_owned()));
            file.meta.push(raw.to_owned());
            self.current = Some(file);
        } else if let Some(rest) = raw.strip_prefix("--- ") {
            let in_header = matches!(&self.current, Some(f) if f.in_header);
            if !in_header {
                self.close_file()?;
                let path = clean_path(rest).unwrap_or_else(|| UNKNOWN_PATH.to_owned());
                self.current = Some(PendingFile::new(path));
            }
            let file = self.current_file();
            if clean_path(rest).is_none() {
                file.status = FileStatus::Added;
            }
            file.meta.push(raw.to_owned());
        } else if let Some(rest) = raw.strip_prefix("+++ ") {
            let in_header = matches!(&self.current, Some(f) if f.in_header);
            if !in_header {
                self.close_file()?;
            }
            let file = self.current_file();
            match clean_path(rest) {
                Some(path) => file.path = path,
                None => file.status = FileStatus::Deleted,
            }
            file.meta.push(raw.to_owned());
        } else if raw.trim().is_empty() {
            // Blank separators outside a hunk carry nothing.
        } else if let Some(file) = self.current.as_mut() {
            if file.in_header {
                file.note_metadata(raw);
            } else {
                // Trailer text after the last hunk, e.g. `Only in dir: name`.
                debug!(line = raw, file = %file.path, "ignoring text after a hunk");
            }
        } else {
            debug!(line = raw, "ignoring text before the first file section");
        }
        Ok(())
    }

    fn current_file(&mut self) -> &mut PendingFile {
        self.current
            .get_or_insert_with(|| PendingFile::new(UNKNOWN_PATH.to_owned()))
    }

    fn open_hunk(&mut self, raw: &str) -> Result<(), ParseError> {
        let header = raw.trim_end().to_owned();
        let file = self.current_file();
        file.in_header = false;
        let path = file.path.clone();

        match parse_hunk_header(&header) {
            Some(range) => {
                let header_row = DiffLine::new(
                    LineKind::HunkHeader,
                    header.as_str(),
                    None,
                    None,
                    path.as_str(),
                    header.as_str(),
                )?;
                self.hunk = HunkState::Open(PendingHunk {
                    header,
                    range,
                    lines: vec![header_row],
                    old_next: range.old_start,
                    new_next: range.new_start,
                    old_left: range.old_len,
                    new_left: range.new_len,
                    excess: None,
                });
            }
            None => {
                self.hunk = HunkState::Discarding;
                self.reject(MalformedHunk {
                    file: path,
                    header,
                    reason: "unreadable hunk header".to_owned(),
                })?;
            }
        }
        Ok(())
    }

    /// Validates the open hunk and moves it into the current file.
    fn close_hunk(&mut self) -> Result<(), ParseError> {
        let HunkState::Open(hunk) = std::mem::replace(&mut self.hunk, HunkState::Idle) else {
            return Ok(());
        };
        let file = self.current_file();
        match hunk.problem() {
            None => {
                file.hunks.push(hunk.into_hunk());
                Ok(())
            }
            Some(reason) => {
                let malformed = MalformedHunk { file: file.path.clone(), header: hunk.header, reason };
                self.reject(malformed)
            }
        }
    }

    fn close_file(&mut self) -> Result<(), ParseError> {
        self.close_hunk()?;
        self.hunk = HunkState::Idle;
        if let Some(file) = self.current.take() {
            self.files.push(file.into_file_diff()?);
        }
        Ok(())
    }

    fn reject(&mut self, malformed: MalformedHunk) -> Result<(), ParseError> {
        match self.policy {
            MalformedPolicy::Abort => Err(ParseError::MalformedHunk(malformed)),
            MalformedPolicy::Skip => {
                warn!(file = %malformed.file, header = %malformed.header, reason = %malformed.reason, "skipping malformed hunk");
                self.skipped.push(malformed);
                Ok(())
            }
        }
    }

    fn finish(mut self) -> Result<ParsedDiff, ParseError> {
        self.close_file()?;
        let model = DiffModel::from_files(self.files);
        debug!(files = model.files().len(), hunks = model.hunk_count(), skipped = self.skipped.len(), "parsed diff");
        Ok(ParsedDiff { model, skipped: self.skipped })
    }
}
